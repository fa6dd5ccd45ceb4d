//! The per-match turn state machine.
//!
//! A turn runs in two calls:
//!
//! 1. `request_roll` accepts or ignores a roll request. Accepting sets the
//!    busy flag, clears the shown dice and plans the move.
//! 2. `next_event` is pulled until the turn ends. The first event reveals the
//!    dice, then each walk/snap step moves the current player's token, and the
//!    last event either passes the turn on or declares the winner.
//!
//! A view calls `upcoming` between pulls to decide how long to pause.
//! Requests that arrive while a turn is in flight, or after the match is won,
//! are ignored rather than queued.
//!
//! ```
//! use snake_ladder::core::{MatchConfig, Roll, Roster};
//! use snake_ladder::engine::{Match, MatchEvent, RollRequest, RollTrigger};
//!
//! let mut game = Match::new(Roster::for_player_count(2), MatchConfig::instant());
//! let roll = Roll::new(3).unwrap();
//! assert_eq!(game.request_roll_with(RollTrigger::Human, roll), RollRequest::Accepted);
//!
//! let mut squares = Vec::new();
//! while let Some(event) = game.next_event() {
//!     if let MatchEvent::Step { step, .. } = event {
//!         squares.push(step.square.value());
//!     }
//! }
//! assert_eq!(squares, vec![1, 2, 3]);
//! assert_eq!(game.state().current_index(), 1);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::movement::{Step, StepKind, StepPlan};
use crate::board::Topology;
use crate::core::{
    DiceRng, MatchConfig, MatchState, PlayerId, Roll, Roster, TurnOutcome, TurnRecord,
};

/// Where a roll request came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RollTrigger {
    /// A user pressed the roll control.
    Human,
    /// The driver rolled for an automated player.
    Automated,
}

/// Why a roll request was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// The match already has a winner.
    MatchOver,
    /// Another roll for this match has not finished moving.
    RollInFlight,
    /// The trigger does not match the current player's controller.
    NotYourTurn,
}

/// Answer to a roll request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollRequest {
    Accepted,
    Ignored(IgnoreReason),
}

/// One-shot signal that an automated player should roll.
///
/// Armed once per turn transition onto an automated player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatedTrigger {
    pub player: PlayerId,
    pub turn: u32,
}

/// What the next `next_event` call will do. Drivers map this to a pause.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Upcoming {
    /// Reveal the dice.
    Reveal,
    /// Move one square.
    Walk,
    /// Jump along a snake or ladder.
    Snap,
    /// End the turn.
    Settle,
}

/// Observable progress of a turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// Dice revealed for the current player.
    Rolled { player: PlayerId, roll: Roll },
    /// The current player's token moved.
    Step { player: PlayerId, step: Step },
    /// Turn finished without a win; `next` is now current.
    TurnEnded { record: TurnRecord, next: PlayerId },
    /// Turn finished on square 100. The match is over.
    Won { record: TurnRecord, winner: PlayerId },
}

#[derive(Clone, Debug)]
struct InFlight {
    roll: Roll,
    plan: StepPlan,
    revealed: bool,
}

/// A match: state, dice, board and the in-flight turn.
#[derive(Clone, Debug)]
pub struct Match {
    state: MatchState,
    topology: Topology,
    rng: DiceRng,
    config: MatchConfig,
    in_flight: Option<InFlight>,
    automated_trigger: Option<AutomatedTrigger>,
}

impl Match {
    /// Start a match on the standard board.
    ///
    /// Dice are seeded from `config.seed`, or from entropy when unset.
    #[must_use]
    pub fn new(roster: Roster, config: MatchConfig) -> Self {
        let rng = config.seed.map_or_else(DiceRng::from_entropy, DiceRng::new);
        Self::with_rng(roster, config, rng)
    }

    /// Start a match with an explicit dice stream.
    #[must_use]
    pub fn with_rng(roster: Roster, config: MatchConfig, rng: DiceRng) -> Self {
        info!(players = roster.len(), seed = rng.seed(), "match created");
        let mut game = Self {
            state: MatchState::new(roster),
            topology: Topology::standard().clone(),
            rng,
            config,
            in_flight: None,
            automated_trigger: None,
        };
        game.arm_automated_trigger();
        game
    }

    /// Play on a custom board instead of the standard one.
    #[must_use]
    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[must_use]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Seed of the dice stream, for replaying a match.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    // === Rolling ===

    /// Ask to roll for the current player.
    pub fn request_roll(&mut self, trigger: RollTrigger) -> RollRequest {
        if let Some(reason) = self.check_roll(trigger) {
            return Self::ignore(trigger, reason);
        }
        let roll = self.rng.roll_die();
        self.start_turn(roll)
    }

    /// Ask to roll with a predetermined die value (scripted dice, replays).
    ///
    /// Subject to the same checks as `request_roll`; the dice stream is not
    /// advanced.
    pub fn request_roll_with(&mut self, trigger: RollTrigger, roll: Roll) -> RollRequest {
        if let Some(reason) = self.check_roll(trigger) {
            return Self::ignore(trigger, reason);
        }
        self.start_turn(roll)
    }

    fn check_roll(&self, trigger: RollTrigger) -> Option<IgnoreReason> {
        if self.state.is_over() {
            return Some(IgnoreReason::MatchOver);
        }
        if self.state.is_rolling() {
            return Some(IgnoreReason::RollInFlight);
        }
        let automated = self.state.current_player().is_automated();
        match (trigger, automated) {
            (RollTrigger::Human, true) | (RollTrigger::Automated, false) => {
                Some(IgnoreReason::NotYourTurn)
            }
            _ => None,
        }
    }

    fn ignore(trigger: RollTrigger, reason: IgnoreReason) -> RollRequest {
        debug!(?trigger, ?reason, "roll request ignored");
        RollRequest::Ignored(reason)
    }

    fn start_turn(&mut self, roll: Roll) -> RollRequest {
        let player = self.state.current_player();
        let plan = StepPlan::new(&self.topology, player.position, roll);
        debug!(player = %player.id, from = %player.position, "roll accepted");

        self.state.begin_roll();
        self.automated_trigger = None;
        self.in_flight = Some(InFlight {
            roll,
            plan,
            revealed: false,
        });
        RollRequest::Accepted
    }

    // === Advancing ===

    /// A turn has been accepted and has not finished yet.
    #[must_use]
    pub fn is_turn_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// What the next `next_event` call will do, if a turn is in flight.
    #[must_use]
    pub fn upcoming(&self) -> Option<Upcoming> {
        let in_flight = self.in_flight.as_ref()?;
        if !in_flight.revealed {
            return Some(Upcoming::Reveal);
        }
        Some(match in_flight.plan.peek().map(|step| step.kind) {
            Some(StepKind::Walk) => Upcoming::Walk,
            Some(StepKind::Snap(_)) => Upcoming::Snap,
            None => Upcoming::Settle,
        })
    }

    /// Advance the in-flight turn by one event.
    ///
    /// Returns `None` when no turn is in flight.
    pub fn next_event(&mut self) -> Option<MatchEvent> {
        let player = self.state.current_player().id;
        let in_flight = self.in_flight.as_mut()?;

        if !in_flight.revealed {
            in_flight.revealed = true;
            let roll = in_flight.roll;
            self.state.reveal_dice(roll);
            if in_flight.plan.is_void() {
                debug!(%player, %roll, "roll overshoots the finish, token stays");
            } else {
                debug!(%player, %roll, "dice revealed");
            }
            return Some(MatchEvent::Rolled { player, roll });
        }

        if let Some(step) = in_flight.plan.next() {
            self.state.move_current(step.square);
            match step.kind {
                StepKind::Walk => trace!(%player, square = %step.square, "step"),
                StepKind::Snap(kind) => debug!(%player, ?kind, to = %step.square, "jump"),
            }
            return Some(MatchEvent::Step { player, step });
        }

        let InFlight { roll, plan, .. } = self.in_flight.take()?;
        Some(self.finish_turn(player, roll, &plan))
    }

    fn finish_turn(&mut self, player: PlayerId, roll: Roll, plan: &StepPlan) -> MatchEvent {
        let record = TurnRecord {
            turn: self.state.turn_number(),
            player,
            roll,
            from: plan.start(),
            to: plan.destination(),
            jump: plan.jump(),
            overshoot: plan.is_void(),
        };

        match self.state.complete_turn(record.clone()) {
            TurnOutcome::Won(winner) => {
                info!(%winner, turns = record.turn, "match won");
                MatchEvent::Won { record, winner }
            }
            TurnOutcome::Next(next) => {
                debug!(%player, to = %record.to, %next, "turn ended");
                self.arm_automated_trigger();
                MatchEvent::TurnEnded { record, next }
            }
        }
    }

    // === Automated players ===

    fn arm_automated_trigger(&mut self) {
        let current = self.state.current_player();
        self.automated_trigger = (current.is_automated() && !self.state.is_over()).then(|| {
            AutomatedTrigger {
                player: current.id,
                turn: self.state.turn_number(),
            }
        });
    }

    /// The pending automated trigger, without consuming it.
    #[must_use]
    pub fn pending_automated_trigger(&self) -> Option<AutomatedTrigger> {
        self.automated_trigger
    }

    /// Consume the automated trigger for the current turn.
    ///
    /// Returns `Some` at most once per turn transition onto an automated
    /// player. The driver should pause for the think delay and then call
    /// `request_roll(RollTrigger::Automated)`.
    pub fn take_automated_trigger(&mut self) -> Option<AutomatedTrigger> {
        let turn = self.state.turn_number();
        self.automated_trigger
            .take()
            .filter(|trigger| trigger.turn == turn)
    }

    // === Lifecycle ===

    /// Start a new match with the same roster.
    ///
    /// Refused (returns `false`) while a turn is in flight: turns always run
    /// to completion.
    pub fn reset(&mut self) -> bool {
        if self.in_flight.is_some() {
            debug!("reset refused while a roll is in flight");
            return false;
        }
        self.state.reset();
        self.arm_automated_trigger();
        info!(players = self.state.player_count(), "match reset");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{JumpKind, Square};
    use crate::core::{Phase, PlayerOverrides};

    fn roll(value: u8) -> Roll {
        Roll::new(value).unwrap()
    }

    fn humans(count: usize) -> Match {
        let config = MatchConfig::instant().with_seed(1);
        Match::new(Roster::for_player_count(count), config)
    }

    fn drain(game: &mut Match) -> Vec<MatchEvent> {
        std::iter::from_fn(|| game.next_event()).collect()
    }

    fn play(game: &mut Match, trigger: RollTrigger, value: u8) -> Vec<MatchEvent> {
        let request = game.request_roll_with(trigger, roll(value));
        assert_eq!(request, RollRequest::Accepted);
        drain(game)
    }

    #[test]
    fn test_event_sequence() {
        let mut game = humans(2);
        let events = play(&mut game, RollTrigger::Human, 4);

        assert_eq!(events.len(), 1 + 4 + 1 + 1);
        assert_eq!(
            events[0],
            MatchEvent::Rolled {
                player: PlayerId::new(1),
                roll: roll(4),
            }
        );
        assert_eq!(
            events[5],
            MatchEvent::Step {
                player: PlayerId::new(1),
                step: Step {
                    square: Square::new(16).unwrap(),
                    kind: StepKind::Snap(JumpKind::Shortcut),
                },
            }
        );
        match &events[6] {
            MatchEvent::TurnEnded { record, next } => {
                assert_eq!(*next, PlayerId::new(2));
                assert_eq!(record.to, Square::new(16).unwrap());
                assert_eq!(record.jump, Some(JumpKind::Shortcut));
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(game.state().players()[0].position, Square::new(16).unwrap());
    }

    #[test]
    fn test_dice_hidden_until_reveal() {
        let mut game = humans(2);
        play(&mut game, RollTrigger::Human, 2);
        assert_eq!(game.state().dice(), Some(roll(2)));

        game.request_roll_with(RollTrigger::Human, roll(5));
        assert_eq!(game.state().dice(), None);
        assert!(game.state().is_rolling());
        assert_eq!(game.upcoming(), Some(Upcoming::Reveal));

        game.next_event();
        assert_eq!(game.state().dice(), Some(roll(5)));
    }

    #[test]
    fn test_upcoming_sequence() {
        let mut game = humans(2);
        game.request_roll_with(RollTrigger::Human, roll(3));

        let mut seen = Vec::new();
        while let Some(upcoming) = game.upcoming() {
            seen.push(upcoming);
            game.next_event();
        }

        assert_eq!(
            seen,
            vec![
                Upcoming::Reveal,
                Upcoming::Walk,
                Upcoming::Walk,
                Upcoming::Walk,
                Upcoming::Snap,
                Upcoming::Settle
            ]
        );
        assert!(!game.is_turn_in_flight());
        assert!(!game.state().is_rolling());
    }

    #[test]
    fn test_requests_while_in_flight_are_ignored() {
        let mut game = humans(2);
        game.request_roll_with(RollTrigger::Human, roll(2));
        game.next_event();

        assert_eq!(
            game.request_roll(RollTrigger::Human),
            RollRequest::Ignored(IgnoreReason::RollInFlight)
        );
        assert!(!game.reset());

        drain(&mut game);
        assert_eq!(game.state().players()[0].position, Square::new(2).unwrap());
        assert_eq!(game.state().current_index(), 1);
    }

    #[test]
    fn test_next_event_without_turn() {
        let mut game = humans(2);
        assert_eq!(game.next_event(), None);
        assert_eq!(game.upcoming(), None);
    }

    #[test]
    fn test_overshoot_turn() {
        let mut game = humans(2).with_topology(Topology::empty());
        for _ in 0..16 {
            play(&mut game, RollTrigger::Human, 6);
            play(&mut game, RollTrigger::Human, 1);
        }
        assert_eq!(game.state().players()[0].position, Square::new(96).unwrap());

        // 96 + 5 passes the finish: the whole roll is wasted.
        let events = play(&mut game, RollTrigger::Human, 5);

        assert_eq!(events.len(), 2);
        match &events[1] {
            MatchEvent::TurnEnded { record, next } => {
                assert!(record.overshoot);
                assert_eq!(record.from, record.to);
                assert_eq!(record.to, Square::new(96).unwrap());
                assert_eq!(*next, PlayerId::new(2));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_win_freezes_match() {
        let mut game = humans(3).with_topology(Topology::empty());
        for _ in 0..16 {
            for _ in 0..3 {
                play(&mut game, RollTrigger::Human, 6);
            }
        }
        // Everyone is on 96; player 1 rolls 4.
        let events = play(&mut game, RollTrigger::Human, 4);
        assert!(matches!(
            events.last(),
            Some(MatchEvent::Won { winner, .. }) if *winner == PlayerId::new(1)
        ));

        let snapshot = game.state().clone();
        assert_eq!(snapshot.phase(), Phase::Won);
        assert_eq!(snapshot.current_index(), 0);
        assert_eq!(
            game.request_roll(RollTrigger::Human),
            RollRequest::Ignored(IgnoreReason::MatchOver)
        );
        assert_eq!(game.state(), &snapshot);
    }

    #[test]
    fn test_human_cannot_roll_for_bot() {
        let mut game = Match::new(Roster::for_player_count(1), MatchConfig::instant());
        assert_eq!(
            game.request_roll(RollTrigger::Automated),
            RollRequest::Ignored(IgnoreReason::NotYourTurn)
        );
        play(&mut game, RollTrigger::Human, 1);

        assert_eq!(
            game.request_roll(RollTrigger::Human),
            RollRequest::Ignored(IgnoreReason::NotYourTurn)
        );
        assert_eq!(
            game.request_roll(RollTrigger::Automated),
            RollRequest::Accepted
        );
    }

    #[test]
    fn test_automated_trigger_fires_once_per_turn() {
        let mut game = Match::new(Roster::for_player_count(1), MatchConfig::instant());
        assert_eq!(game.take_automated_trigger(), None);

        play(&mut game, RollTrigger::Human, 1);
        let trigger = game.take_automated_trigger();
        assert_eq!(
            trigger,
            Some(AutomatedTrigger {
                player: PlayerId::new(2),
                turn: 2,
            })
        );
        assert_eq!(game.take_automated_trigger(), None);

        play(&mut game, RollTrigger::Automated, 1);
        assert_eq!(game.take_automated_trigger(), None);
        assert_eq!(game.state().current_player().id, PlayerId::new(1));
    }

    #[test]
    fn test_roll_consumes_pending_trigger() {
        let mut game = Match::new(Roster::for_player_count(1), MatchConfig::instant());
        play(&mut game, RollTrigger::Human, 1);
        assert!(game.pending_automated_trigger().is_some());

        game.request_roll_with(RollTrigger::Automated, roll(2));
        assert_eq!(game.take_automated_trigger(), None);
    }

    #[test]
    fn test_trigger_armed_for_automated_first_seat() {
        let bot = PlayerOverrides::new().automated(true);
        let roster = Roster::for_player_count(2).with_override(PlayerId::new(1), &bot);
        let mut game = Match::new(roster, MatchConfig::instant());

        assert_eq!(
            game.take_automated_trigger(),
            Some(AutomatedTrigger {
                player: PlayerId::new(1),
                turn: 1,
            })
        );
    }

    #[test]
    fn test_reset_after_win() {
        let mut game = humans(2).with_topology(Topology::empty());
        for _ in 0..16 {
            play(&mut game, RollTrigger::Human, 6);
            play(&mut game, RollTrigger::Human, 1);
        }
        play(&mut game, RollTrigger::Human, 4);
        assert!(game.state().is_over());

        assert!(game.reset());
        assert_eq!(game.state().phase(), Phase::InProgress);
        assert_eq!(game.state().winner(), None);
        assert_eq!(game.state().current_index(), 0);
        assert_eq!(game.state().dice(), None);
        assert!(game.state().history().is_empty());
        assert!(game.state().positions().all(|(_, sq)| sq == Square::START));
        assert_eq!(game.request_roll(RollTrigger::Human), RollRequest::Accepted);
    }

    #[test]
    fn test_seeded_matches_agree() {
        let config = MatchConfig::instant().with_seed(99);
        let mut a = Match::new(Roster::for_player_count(2), config.clone());
        let mut b = Match::new(Roster::for_player_count(2), config);

        for _ in 0..20 {
            a.request_roll(RollTrigger::Human);
            b.request_roll(RollTrigger::Human);
            assert_eq!(drain(&mut a), drain(&mut b));
        }
        assert_eq!(a.state(), b.state());
    }
}
