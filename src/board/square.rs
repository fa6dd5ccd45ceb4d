//! Square index on the board.
//!
//! `Square(0)` is the off-board start, `Square(100)` is the winning square.
//! A tentative position past 100 is never materialised: `advanced_by`
//! returns `None` and the move is void.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A board square in `0..=100`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Square(u8);

impl Square {
    /// Highest square value.
    pub const MAX: u8 = 100;

    /// Off-board start position.
    pub const START: Square = Square(0);

    /// Terminal winning square.
    pub const FINISH: Square = Square(Self::MAX);

    /// Create a square, rejecting values above 100.
    pub fn new(value: u8) -> Result<Self> {
        if value > Self::MAX {
            return Err(Error::InvalidSquare(i64::from(value)));
        }
        Ok(Self(value))
    }

    /// Raw square number.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_start(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_finish(self) -> bool {
        self.0 == Self::MAX
    }

    /// Square reached after `steps` unit steps, or `None` past the finish.
    #[must_use]
    pub fn advanced_by(self, steps: u8) -> Option<Square> {
        let target = u16::from(self.0) + u16::from(steps);
        (target <= u16::from(Self::MAX)).then(|| Square(target as u8))
    }

    /// Every square from the start to the finish, in order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..=Self::MAX).map(Square)
    }

    /// On-board squares `1..=100`.
    pub fn on_board() -> impl Iterator<Item = Square> {
        (1..=Self::MAX).map(Square)
    }

    pub(crate) const fn from_raw(value: u8) -> Self {
        Self(value)
    }
}

impl TryFrom<u8> for Square {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Square> for u8 {
    fn from(square: Square) -> Self {
        square.0
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
