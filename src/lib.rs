//! # snake-ladder
//!
//! Rules engine for a 10×10 snakes-and-ladders race for two to four players.
//!
//! ## Design Principles
//!
//! 1. **Pure Movement**: `resolve_move` is a plain function of board, square
//!    and roll. Everything else builds on it.
//!
//! 2. **Pull-Based Turns**: A turn is a sequence of events the caller pulls
//!    from `Match`. The engine never sleeps; front-ends pace the events.
//!
//! 3. **One Roll at a Time**: Roll requests during a turn, or after a win,
//!    are ignored rather than queued.
//!
//! ## Modules
//!
//! - `board`: Squares, grid coordinates, snakes and ladders
//! - `core`: Players, dice, configuration, match state
//! - `engine`: Movement, the turn state machine, pacing drivers
//! - `error`: Crate error types

pub mod board;
pub mod core;
pub mod engine;
pub mod error;

// Re-export commonly used types
pub use crate::board::{GridCoord, Jump, JumpKind, Square, Topology};

pub use crate::core::{
    Controller, DiceRng, Marker, MatchConfig, MatchState, Phase, Player, PlayerId,
    PlayerOverrides, Roll, Roster, TurnRecord,
};

pub use crate::engine::{
    autoplay, play_automated_turn, play_turn, resolve_move, Match, MatchEvent, NoPacer, Pacer,
    Pacing, RollRequest, RollTrigger, ThreadPacer, Upcoming,
};

pub use crate::error::{Error, Result, TopologyError};
