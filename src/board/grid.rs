//! Square <-> grid coordinate mapping for the 10x10 serpentine board.
//!
//! Square 1 sits in the bottom-left corner. Rows alternate direction: the
//! bottom row reads left-to-right, the one above it right-to-left, and so on
//! up to square 100 in the top-left corner. `row` counts from the top, so the
//! bottom row is row 9.

use serde::{Deserialize, Serialize};

use super::Square;
use crate::error::{Error, Result};

/// Number of cells along each side of the board.
pub const BOARD_SIDE: u8 = 10;

/// A cell on the rendered board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    /// 0 = leftmost column.
    pub column: u8,
    /// 0 = top row.
    pub row: u8,
}

impl GridCoord {
    /// Create a coordinate, rejecting cells outside the board.
    pub fn new(column: u8, row: u8) -> Result<Self> {
        if column >= BOARD_SIDE || row >= BOARD_SIDE {
            return Err(Error::InvalidCoordinate { column, row });
        }
        Ok(Self { column, row })
    }

    /// Where a token on `square` is drawn.
    ///
    /// The off-board start shares the bottom-left cell with square 1.
    #[must_use]
    pub fn from_square(square: Square) -> Self {
        if square.is_start() {
            return Self {
                column: 0,
                row: BOARD_SIDE - 1,
            };
        }

        let index = square.value() - 1;
        let row_from_bottom = index / BOARD_SIDE;
        let column_in_row = index % BOARD_SIDE;
        let column = if row_from_bottom % 2 == 0 {
            column_in_row
        } else {
            BOARD_SIDE - 1 - column_in_row
        };

        Self {
            column,
            row: BOARD_SIDE - 1 - row_from_bottom,
        }
    }

    /// The on-board square drawn at this cell.
    #[must_use]
    pub fn to_square(self) -> Square {
        let row_from_bottom = self.row_from_bottom();
        let column_in_row = if row_from_bottom % 2 == 0 {
            self.column
        } else {
            BOARD_SIDE - 1 - self.column
        };
        Square::from_raw(row_from_bottom * BOARD_SIDE + column_in_row + 1)
    }

    /// Row index counted upward from the bottom edge.
    #[must_use]
    pub const fn row_from_bottom(self) -> u8 {
        BOARD_SIDE - 1 - self.row
    }
}
