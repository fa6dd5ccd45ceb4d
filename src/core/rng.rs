//! Dice rolls and the RNG behind them.
//!
//! Rolls are uniform over `1..=6` and independent. The RNG is a ChaCha8
//! stream: seed it for reproducible tests and simulations, or seed it from
//! OS entropy for real play.
//!
//! ```
//! use snake_ladder::core::DiceRng;
//!
//! let mut a = DiceRng::new(42);
//! let mut b = DiceRng::new(42);
//! assert_eq!(a.roll_die(), b.roll_die());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single six-sided die outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Roll(u8);

impl Roll {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    /// Create a roll, rejecting values outside `1..=6`.
    pub fn new(value: u8) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(Error::InvalidRoll(i64::from(value)));
        }
        Ok(Self(value))
    }

    /// Pip count.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// All six faces, in order.
    pub fn all() -> impl Iterator<Item = Roll> {
        (Self::MIN..=Self::MAX).map(Roll)
    }
}

impl TryFrom<u8> for Roll {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Roll> for u8 {
    fn from(roll: Roll) -> Self {
        roll.0
    }
}

impl std::fmt::Display for Roll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Seedable dice RNG.
#[derive(Clone, Debug)]
pub struct DiceRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl DiceRng {
    /// Create an RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the thread-local entropy source.
    ///
    /// The seed is still recorded so a match can be replayed.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// The seed this stream started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Roll one die.
    pub fn roll_die(&mut self) -> Roll {
        Roll(self.inner.gen_range(Roll::MIN..=Roll::MAX))
    }
}

impl Default for DiceRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_bounds() {
        assert!(Roll::new(0).is_err());
        assert_eq!(Roll::new(1).unwrap().value(), 1);
        assert_eq!(Roll::new(6).unwrap().value(), 6);
        assert_eq!(Roll::new(7), Err(Error::InvalidRoll(7)));
        assert_eq!(Roll::all().count(), 6);
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = DiceRng::new(42);
        let mut rng2 = DiceRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.roll_die(), rng2.roll_die());
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = DiceRng::new(1);
        let mut rng2 = DiceRng::new(2);

        let seq1: Vec<_> = (0..20).map(|_| rng1.roll_die()).collect();
        let seq2: Vec<_> = (0..20).map(|_| rng2.roll_die()).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_every_face_appears() {
        let mut rng = DiceRng::new(7);
        let mut counts = [0u32; 6];
        for _ in 0..6000 {
            let roll = rng.roll_die();
            counts[usize::from(roll.value() - 1)] += 1;
        }
        // Uniform: each face should land near 1000.
        for count in counts {
            assert!((800..1200).contains(&count), "counts {counts:?}");
        }
    }

    #[test]
    fn test_entropy_seed_is_recorded() {
        let rng = DiceRng::from_entropy();
        let mut replay = DiceRng::new(rng.seed());
        let mut original = rng.clone();
        assert_eq!(original.roll_die(), replay.roll_die());
    }

    #[test]
    fn test_roll_serde() {
        let roll = Roll::new(4).unwrap();
        let json = serde_json::to_string(&roll).unwrap();
        assert_eq!(json, "4");
        assert_eq!(serde_json::from_str::<Roll>(&json).unwrap(), roll);
        assert!(serde_json::from_str::<Roll>("0").is_err());
    }
}
