//! Board topology: squares, snakes and ladders, grid layout.
//!
//! Everything here is pure and stateless. The standard topology is loaded
//! once per process via `Topology::standard()`.

pub mod grid;
pub mod square;
pub mod topology;

pub use grid::{GridCoord, BOARD_SIDE};
pub use square::Square;
pub use topology::{Jump, JumpKind, Topology, STANDARD_SETBACKS, STANDARD_SHORTCUTS};
