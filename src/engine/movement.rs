//! Applying a roll to a position.
//!
//! `resolve_move` gives the answer in one call. `StepPlan` gives the same
//! answer as the sequence a viewer should see: one square at a time, then at
//! most one snake/ladder jump.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::pacing::{Pacer, Pacing};
use crate::board::{JumpKind, Square, Topology};
use crate::core::Roll;

/// Where a roll takes a token from `position`.
///
/// A roll that would pass 100 is void and returns `position` unchanged.
/// Otherwise the landing square is remapped through the topology once.
#[must_use]
pub fn resolve_move(topology: &Topology, position: Square, roll: Roll) -> Square {
    match position.advanced_by(roll.value()) {
        Some(landing) => topology.apply(landing),
        None => position,
    }
}

/// How a step moves the token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKind {
    /// One square forward.
    Walk,
    /// Snake or ladder jump after the walk.
    Snap(JumpKind),
}

/// One emitted position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub square: Square,
    pub kind: StepKind,
}

/// The ordered steps of one move.
///
/// Up to six walk steps and one snap, so the plan never allocates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepPlan {
    start: Square,
    steps: SmallVec<[Step; 7]>,
    cursor: usize,
}

impl StepPlan {
    /// Plan the move of `roll` squares from `position`.
    ///
    /// An overshooting roll produces an empty plan.
    #[must_use]
    pub fn new(topology: &Topology, position: Square, roll: Roll) -> Self {
        let mut steps = SmallVec::new();

        if let Some(landing) = position.advanced_by(roll.value()) {
            steps.extend(
                (1..=roll.value())
                    .filter_map(|n| position.advanced_by(n))
                    .map(|square| Step {
                        square,
                        kind: StepKind::Walk,
                    }),
            );
            if let Some(jump) = topology.jump(landing) {
                steps.push(Step {
                    square: jump.to,
                    kind: StepKind::Snap(jump.kind),
                });
            }
        }

        Self {
            start: position,
            steps,
            cursor: 0,
        }
    }

    #[must_use]
    pub fn start(&self) -> Square {
        self.start
    }

    /// Final square of the move.
    #[must_use]
    pub fn destination(&self) -> Square {
        self.steps.last().map_or(self.start, |step| step.square)
    }

    /// The roll overshot 100 and nothing moves.
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.steps.is_empty()
    }

    /// Snake or ladder taken at the end, if any.
    #[must_use]
    pub fn jump(&self) -> Option<JumpKind> {
        match self.steps.last()?.kind {
            StepKind::Snap(kind) => Some(kind),
            StepKind::Walk => None,
        }
    }

    /// Every step, including those already yielded.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The step `next()` will yield.
    #[must_use]
    pub fn peek(&self) -> Option<&Step> {
        self.steps.get(self.cursor)
    }
}

impl Iterator for StepPlan {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let step = self.steps.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.steps.len() - self.cursor;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for StepPlan {}

/// Walk a roll square by square, calling `on_step` for every emitted square.
///
/// Pauses `pacing.step_delay` before each walk step and `pacing.snap_pause`
/// before a snake/ladder jump. Returns the final square, which equals
/// `resolve_move(topology, position, roll)`.
pub fn advance_with_steps<P: Pacer + ?Sized>(
    topology: &Topology,
    position: Square,
    roll: Roll,
    pacer: &mut P,
    pacing: &Pacing,
    mut on_step: impl FnMut(Square),
) -> Square {
    let plan = StepPlan::new(topology, position, roll);
    let destination = plan.destination();

    for step in plan {
        let delay = match step.kind {
            StepKind::Walk => pacing.step_delay,
            StepKind::Snap(_) => pacing.snap_pause,
        };
        pacer.pause(delay);
        on_step(step.square);
    }

    destination
}
