//! Movement rules and the turn engine.
//!
//! - `movement`: resolving a roll, and the step plan a view animates
//! - `turn`: the per-match state machine (`Match`)
//! - `pacing`: delays between events, and drivers that apply them

pub mod movement;
pub mod pacing;
pub mod turn;

pub use movement::{advance_with_steps, resolve_move, Step, StepKind, StepPlan};
pub use pacing::{autoplay, play_automated_turn, play_turn, NoPacer, Pacer, Pacing, ThreadPacer};
pub use turn::{
    AutomatedTrigger, IgnoreReason, Match, MatchEvent, RollRequest, RollTrigger, Upcoming,
};
