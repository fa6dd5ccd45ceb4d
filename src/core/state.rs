//! Match state: the roster-generic model a view renders from.
//!
//! ## MatchState
//!
//! - Players in turn order, with their current squares
//! - Index of the player whose turn it is
//! - Last revealed dice value
//! - Phase, winner, busy flag
//! - Turn history
//!
//! Only the turn engine mutates it. Readers get plain accessors.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId, Roster, MAX_PLAYERS, MIN_PLAYERS};
use super::rng::Roll;
use crate::board::{JumpKind, Square};
use crate::error::{Error, Result};

/// Match phase. `Won` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    InProgress,
    Won,
}

/// One completed turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Turn number (starts at 1).
    pub turn: u32,
    pub player: PlayerId,
    pub roll: Roll,
    pub from: Square,
    pub to: Square,
    /// Snake or ladder taken at the end of the walk.
    pub jump: Option<JumpKind>,
    /// The roll would have passed 100, so the token stayed put.
    pub overshoot: bool,
}

/// What happened to the turn order after a turn completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The mover reached 100.
    Won(PlayerId),
    /// The turn passed to the given player.
    Next(PlayerId),
}

/// Authoritative state of one match.
///
/// Deserialized states are checked against the invariants the engine keeps;
/// see `TryFrom<SavedState>`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SavedState")]
pub struct MatchState {
    players: Vec<Player>,
    current: usize,
    dice: Option<Roll>,
    phase: Phase,
    winner: Option<PlayerId>,
    rolling: bool,
    turn_number: u32,
    history: Vector<TurnRecord>,
}

/// Unchecked wire form of a `MatchState`.
#[derive(Deserialize)]
struct SavedState {
    players: Vec<Player>,
    current: usize,
    dice: Option<Roll>,
    phase: Phase,
    winner: Option<PlayerId>,
    rolling: bool,
    turn_number: u32,
    history: Vector<TurnRecord>,
}

impl TryFrom<SavedState> for MatchState {
    type Error = Error;

    fn try_from(saved: SavedState) -> Result<Self> {
        let count = saved.players.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(Error::InvalidState("player count outside 2..=4"));
        }
        if PlayerId::all(count).ne(saved.players.iter().map(|p| p.id)) {
            return Err(Error::InvalidState("player ids out of seat order"));
        }
        if saved.current >= count {
            return Err(Error::InvalidState("current seat out of range"));
        }
        if usize::try_from(saved.turn_number).ok() != Some(saved.history.len() + 1) {
            return Err(Error::InvalidState("turn number does not follow history"));
        }

        let mut finished = saved.players.iter().filter(|p| p.position.is_finish());
        let on_finish = (finished.next().map(|p| p.id), finished.next().is_some());
        let current_id = saved.players[saved.current].id;
        let consistent = match (saved.phase, saved.winner, on_finish) {
            (Phase::InProgress, None, (None, _)) => true,
            (Phase::Won, Some(winner), (Some(id), false)) => {
                winner == id && winner == current_id && !saved.rolling
            }
            _ => false,
        };
        if !consistent {
            return Err(Error::InvalidState(
                "phase, winner and finish square disagree",
            ));
        }

        Ok(Self {
            players: saved.players,
            current: saved.current,
            dice: saved.dice,
            phase: saved.phase,
            winner: saved.winner,
            rolling: saved.rolling,
            turn_number: saved.turn_number,
            history: saved.history,
        })
    }
}

impl MatchState {
    /// Fresh state: everyone on the start square, seat 0 to move.
    #[must_use]
    pub fn new(roster: Roster) -> Self {
        Self {
            players: roster.into_players(),
            current: 0,
            dice: None,
            phase: Phase::InProgress,
            winner: None,
            rolling: false,
            turn_number: 1,
            history: Vector::new(),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// `(id, square)` for every player, in seat order.
    pub fn positions(&self) -> impl Iterator<Item = (PlayerId, Square)> + '_ {
        self.players.iter().map(|p| (p.id, p.position))
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// Last revealed roll. `None` before the first roll and while a new roll
    /// is shaking.
    #[must_use]
    pub fn dice(&self) -> Option<Roll> {
        self.dice
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Won
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// A roll or its movement is in flight.
    #[must_use]
    pub fn is_rolling(&self) -> bool {
        self.rolling
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Completed turns, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<TurnRecord> {
        &self.history
    }

    #[must_use]
    pub fn last_turn(&self) -> Option<&TurnRecord> {
        self.history.last()
    }

    // === Engine-only mutation ===

    pub(crate) fn begin_roll(&mut self) {
        self.dice = None;
        self.rolling = true;
    }

    pub(crate) fn reveal_dice(&mut self, roll: Roll) {
        self.dice = Some(roll);
    }

    pub(crate) fn move_current(&mut self, square: Square) {
        self.players[self.current].position = square;
    }

    /// Record the turn, then rotate or declare the winner.
    pub(crate) fn complete_turn(&mut self, record: TurnRecord) -> TurnOutcome {
        let mover = self.players[self.current].id;
        let won = record.to.is_finish();
        self.history.push_back(record);
        self.rolling = false;
        self.turn_number += 1;

        if won {
            self.phase = Phase::Won;
            self.winner = Some(mover);
            TurnOutcome::Won(mover)
        } else {
            self.current = (self.current + 1) % self.players.len();
            TurnOutcome::Next(self.players[self.current].id)
        }
    }

    /// Back to a fresh match with the same roster.
    pub(crate) fn reset(&mut self) {
        for player in &mut self.players {
            player.position = Square::START;
        }
        self.current = 0;
        self.dice = None;
        self.phase = Phase::InProgress;
        self.winner = None;
        self.rolling = false;
        self.turn_number = 1;
        self.history.clear();
    }
}
