use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of the uniform noise applied to every synthetic value.
pub trait Jitter {
    /// Returns a value in `[lo, hi)`. Degenerate ranges return `lo`.
    fn in_range(&mut self, lo: f64, hi: f64) -> f64;
}

impl<J: Jitter + ?Sized> Jitter for &mut J {
    fn in_range(&mut self, lo: f64, hi: f64) -> f64 {
        (**self).in_range(lo, hi)
    }
}

#[derive(Clone, Debug)]
pub struct SeededJitter {
    rng: ChaCha8Rng,
}

impl SeededJitter {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl Jitter for SeededJitter {
    fn in_range(&mut self, lo: f64, hi: f64) -> f64 {
        if lo.partial_cmp(&hi) != Some(std::cmp::Ordering::Less) {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }
}

/// Always answers the centre of the requested range.
#[derive(Clone, Copy, Debug, Default)]
pub struct MidpointJitter;

impl Jitter for MidpointJitter {
    fn in_range(&mut self, lo: f64, hi: f64) -> f64 {
        (lo + hi) / 2.0
    }
}
