//! Core match types: players, dice, configuration, state.
//!
//! Nothing here knows about snakes or ladders beyond the `Square` a player
//! stands on. Movement rules live in `engine`.

pub mod config;
pub mod player;
pub mod rng;
pub mod state;

pub use config::MatchConfig;
pub use player::{
    Controller, Marker, Player, PlayerId, PlayerOverrides, Roster, DEFAULT_MARKERS, MAX_PLAYERS,
    MIN_PLAYERS,
};
pub use rng::{DiceRng, Roll};
pub use state::{MatchState, Phase, TurnOutcome, TurnRecord};
