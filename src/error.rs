//! Error types.
//!
//! The turn engine itself is total over valid squares and rolls. Errors only
//! arise at construction boundaries: building a `Square` or `Roll` from an
//! arbitrary integer, validating a custom `Topology`, or loading a saved
//! `MatchState`.

/// Reasons a shortcut/setback table is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    #[error("square {0} appears twice in the same table")]
    Duplicate(u8),

    #[error("square {0} is both a shortcut and a setback source")]
    BothTables(u8),

    #[error("square {0} maps to itself")]
    SelfLoop(u8),

    #[error("square {0} is reserved and cannot be a remap source")]
    Reserved(u8),

    #[error("entry {from} -> {to} leaves the board")]
    OutOfRange { from: u8, to: u8 },

    #[error("entry {from} -> {to} goes the wrong way for its table")]
    WrongDirection { from: u8, to: u8 },

    #[error("entry {from} -> {to} lands on another remap source")]
    Chained { from: u8, to: u8 },
}

/// Crate error type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("square {0} is outside 0..=100")]
    InvalidSquare(i64),

    #[error("roll {0} is outside 1..=6")]
    InvalidRoll(i64),

    #[error("grid coordinate ({column}, {row}) is outside the 10x10 board")]
    InvalidCoordinate { column: u8, row: u8 },

    #[error("invalid topology: {0}")]
    Topology(#[from] TopologyError),

    #[error("invalid match state: {0}")]
    InvalidState(&'static str),
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;
