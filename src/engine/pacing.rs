//! Driving turns with presentation delays.
//!
//! The turn state machine never sleeps. A driver pulls events and pauses
//! between them through a `Pacer`, so the same match can run against a real
//! clock in a front-end and with no delays at all in tests and simulations.

use std::time::Duration;

use tracing::debug;

use super::turn::{Match, MatchEvent, RollRequest, RollTrigger, Upcoming};
use crate::core::{PlayerId, TurnRecord};

/// Pause durations between turn events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pacing {
    /// Before the dice are revealed.
    pub roll_delay: Duration,
    /// Before each single-square step.
    pub step_delay: Duration,
    /// Before a snake/ladder jump.
    pub snap_pause: Duration,
    /// Before the turn ends on its final square.
    pub settle_delay: Duration,
    /// Before an automated player rolls.
    pub think_delay: Duration,
}

impl Pacing {
    /// All pauses zero.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            roll_delay: Duration::ZERO,
            step_delay: Duration::ZERO,
            snap_pause: Duration::ZERO,
            settle_delay: Duration::ZERO,
            think_delay: Duration::ZERO,
        }
    }

    /// How long to wait before pulling the given event.
    #[must_use]
    pub fn delay_before(&self, upcoming: Upcoming) -> Duration {
        match upcoming {
            Upcoming::Reveal => self.roll_delay,
            Upcoming::Walk => self.step_delay,
            Upcoming::Snap => self.snap_pause,
            Upcoming::Settle => self.settle_delay,
        }
    }
}

/// Something that can wait.
pub trait Pacer {
    fn pause(&mut self, duration: Duration);
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
    fn pause(&mut self, duration: Duration) {
        (**self).pause(duration);
    }
}

/// Blocks the current thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Never waits.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPacer;

impl Pacer for NoPacer {
    fn pause(&mut self, _duration: Duration) {}
}

/// Run one whole turn for the current player.
///
/// Returns the completed turn, or `None` if the request was ignored.
pub fn play_turn<P: Pacer + ?Sized>(
    game: &mut Match,
    trigger: RollTrigger,
    pacer: &mut P,
    mut on_event: impl FnMut(&MatchEvent),
) -> Option<TurnRecord> {
    if let RollRequest::Ignored(_) = game.request_roll(trigger) {
        return None;
    }

    let pacing = game.config().pacing();
    while let Some(upcoming) = game.upcoming() {
        pacer.pause(pacing.delay_before(upcoming));
        let Some(event) = game.next_event() else {
            break;
        };
        on_event(&event);
        match event {
            MatchEvent::TurnEnded { record, .. } | MatchEvent::Won { record, .. } => {
                return Some(record);
            }
            MatchEvent::Rolled { .. } | MatchEvent::Step { .. } => {}
        }
    }
    None
}

/// Run the pending automated turn, if one is armed.
///
/// Consumes the trigger, waits the think delay, then rolls.
pub fn play_automated_turn<P: Pacer + ?Sized>(
    game: &mut Match,
    pacer: &mut P,
    on_event: impl FnMut(&MatchEvent),
) -> Option<TurnRecord> {
    let trigger = game.take_automated_trigger()?;
    debug!(player = %trigger.player, turn = trigger.turn, "automated player thinking");
    pacer.pause(game.config().pacing().think_delay);
    play_turn(game, RollTrigger::Automated, pacer, on_event)
}

/// Play turns for every seat until someone wins or `max_turns` have run.
///
/// Each turn uses the trigger matching the current player's controller.
/// Returns the winner, if any.
pub fn autoplay<P: Pacer + ?Sized>(
    game: &mut Match,
    pacer: &mut P,
    max_turns: usize,
    mut on_event: impl FnMut(&MatchEvent),
) -> Option<PlayerId> {
    for _ in 0..max_turns {
        if game.state().is_over() {
            break;
        }
        let trigger = if game.state().current_player().is_automated() {
            RollTrigger::Automated
        } else {
            RollTrigger::Human
        };
        // Keep the one-shot trigger in step with the turns played here.
        game.take_automated_trigger();
        let played = play_turn(game, trigger, &mut *pacer, &mut on_event);
        if played.is_none() {
            break;
        }
    }
    game.state().winner()
}
