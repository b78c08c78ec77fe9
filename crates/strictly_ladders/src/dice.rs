//! Six-sided die used by AI players and headless drivers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use tracing::{debug, instrument};

/// Faces of a standard die.
pub const DIE_FACES: RangeInclusive<u8> = 1..=6;

/// A fair six-sided die.
#[derive(Debug, Clone)]
pub struct Die {
    rng: StdRng,
}

impl Die {
    /// A die with a fixed seed, for reproducible games.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A die seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Rolls the die.
    pub fn roll(&mut self) -> u8 {
        let face = self.rng.random_range(DIE_FACES);
        debug!(face, "Die rolled");
        face
    }
}

impl Default for Die {
    fn default() -> Self {
        Self::from_os_rng()
    }
}
