//! Shortcut (ladder) and setback (snake) tables.
//!
//! Landing on a table key moves the token to the mapped square. Exactly one
//! remap applies per landing: values are never keys, so there is no chaining.

use std::sync::OnceLock;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::Square;
use crate::error::{Result, TopologyError};

/// Snake head -> tail on the standard board.
pub const STANDARD_SETBACKS: [(u8, u8); 11] = [
    (21, 3),
    (24, 7),
    (35, 9),
    (50, 11),
    (53, 15),
    (60, 23),
    (75, 44),
    (89, 48),
    (93, 25),
    (97, 65),
    (99, 58),
];

/// Ladder foot -> top on the standard board.
pub const STANDARD_SHORTCUTS: [(u8, u8); 10] = [
    (4, 16),
    (12, 33),
    (18, 22),
    (26, 37),
    (42, 61),
    (49, 51),
    (55, 74),
    (82, 98),
    (85, 95),
    (88, 92),
];

/// Which table a remap came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JumpKind {
    /// Ladder: moves the token up.
    Shortcut,
    /// Snake: moves the token down.
    Setback,
}

/// A single remap triggered by landing on a table key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jump {
    pub from: Square,
    pub to: Square,
    pub kind: JumpKind,
}

/// Immutable shortcut/setback tables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Topology {
    shortcuts: FxHashMap<Square, Square>,
    setbacks: FxHashMap<Square, Square>,
}

impl Topology {
    /// Build a topology from `(from, to)` pairs, validating every entry.
    ///
    /// Sources may not be `0` or `100`, targets must be on the board,
    /// shortcuts must go up and setbacks down, a square may be a key only
    /// once across both tables, and no target may itself be a key.
    pub fn new(shortcuts: &[(u8, u8)], setbacks: &[(u8, u8)]) -> Result<Self> {
        let tables = [
            (shortcuts, JumpKind::Shortcut),
            (setbacks, JumpKind::Setback),
        ];
        for (table, kind) in tables {
            let mut seen = FxHashSet::default();
            for &(from, to) in table {
                Self::check_entry(from, to, kind)?;
                if !seen.insert(from) {
                    return Err(TopologyError::Duplicate(from).into());
                }
            }
        }

        let topology = Self::from_pairs(shortcuts, setbacks);

        if let Some(square) = topology
            .shortcuts
            .keys()
            .find(|square| topology.setbacks.contains_key(*square))
        {
            return Err(TopologyError::BothTables(square.value()).into());
        }

        for (from, to) in topology.shortcuts.iter().chain(topology.setbacks.iter()) {
            if topology.is_source(*to) {
                return Err(TopologyError::Chained {
                    from: from.value(),
                    to: to.value(),
                }
                .into());
            }
        }

        Ok(topology)
    }

    /// The standard board, initialised once per process.
    pub fn standard() -> &'static Topology {
        static STANDARD: OnceLock<Topology> = OnceLock::new();
        STANDARD.get_or_init(|| Self::from_pairs(&STANDARD_SHORTCUTS, &STANDARD_SETBACKS))
    }

    /// A board with no snakes or ladders.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    fn from_pairs(shortcuts: &[(u8, u8)], setbacks: &[(u8, u8)]) -> Self {
        let collect = |pairs: &[(u8, u8)]| {
            pairs
                .iter()
                .map(|&(from, to)| (Square::from_raw(from), Square::from_raw(to)))
                .collect::<FxHashMap<_, _>>()
        };
        Self {
            shortcuts: collect(shortcuts),
            setbacks: collect(setbacks),
        }
    }

    fn check_entry(from: u8, to: u8, kind: JumpKind) -> std::result::Result<(), TopologyError> {
        if from == 0 || from == Square::MAX {
            return Err(TopologyError::Reserved(from));
        }
        if from > Square::MAX || to == 0 || to > Square::MAX {
            return Err(TopologyError::OutOfRange { from, to });
        }
        if from == to {
            return Err(TopologyError::SelfLoop(from));
        }
        let upward = to > from;
        if upward != (kind == JumpKind::Shortcut) {
            return Err(TopologyError::WrongDirection { from, to });
        }
        Ok(())
    }

    /// The remap triggered by landing on `square`, if any.
    #[must_use]
    pub fn jump(&self, square: Square) -> Option<Jump> {
        if let Some(&to) = self.setbacks.get(&square) {
            return Some(Jump {
                from: square,
                to,
                kind: JumpKind::Setback,
            });
        }
        self.shortcuts.get(&square).map(|&to| Jump {
            from: square,
            to,
            kind: JumpKind::Shortcut,
        })
    }

    /// Remap `square` through the tables once.
    #[must_use]
    pub fn apply(&self, square: Square) -> Square {
        self.jump(square).map_or(square, |jump| jump.to)
    }

    /// Is `square` a key of either table?
    #[must_use]
    pub fn is_source(&self, square: Square) -> bool {
        self.setbacks.contains_key(&square) || self.shortcuts.contains_key(&square)
    }

    /// Ladders, sorted by foot.
    #[must_use]
    pub fn shortcuts(&self) -> Vec<(Square, Square)> {
        Self::sorted(&self.shortcuts)
    }

    /// Snakes, sorted by head.
    #[must_use]
    pub fn setbacks(&self) -> Vec<(Square, Square)> {
        Self::sorted(&self.setbacks)
    }

    fn sorted(table: &FxHashMap<Square, Square>) -> Vec<(Square, Square)> {
        let mut pairs: Vec<_> = table.iter().map(|(&from, &to)| (from, to)).collect();
        pairs.sort_unstable();
        pairs
    }
}
