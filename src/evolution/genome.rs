//! Genome operations and the seedable random source they draw from.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Distribution;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Random number generator wrapper threaded through genome operations.
///
/// Seedable end to end so tests can fix the exact draw sequence; parallel
/// fitness evaluations each receive a child generator seeded via
/// [`next_seed`](Self::next_seed).
pub struct GenomeRng {
    rng: StdRng,
}

impl GenomeRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with an entropy seed.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Uniform draw from [0, 1).
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    /// Fair draw from {0, 1}.
    pub fn fair_bit(&mut self) -> u8 {
        self.rng.gen_range(0..=1)
    }

    /// Bernoulli draw with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p)
    }

    /// Sample from an arbitrary distribution.
    pub fn sample<D: Distribution<f64>>(&mut self, distribution: &D) -> f64 {
        distribution.sample(&mut self.rng)
    }

    /// Generate the next u64 for seeding child generators.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.r#gen()
    }
}

/// Pluggable genome operations for the steady-state evolutionary loop.
///
/// Every operation is required; there are no default fallbacks.
pub trait GenomeOps {
    type Genome: Clone + Send + Sync + fmt::Debug;

    /// Generate the initial population.
    fn init(&self, size: usize, rng: &mut GenomeRng) -> Vec<Self::Genome>;

    /// Evaluate one individual. May be stochastic; re-evaluating the same
    /// genome can yield a different value.
    fn fitness(&self, genome: &Self::Genome, rng: &mut GenomeRng) -> f64;

    /// Produce one child from two parents.
    fn crossover(&self, a: &Self::Genome, b: &Self::Genome) -> Self::Genome;

    /// Produce a mutated copy of one individual.
    fn mutate(&self, genome: &Self::Genome, rng: &mut GenomeRng) -> Self::Genome;

    /// Coordinate-wise mean of the population, emitted per generation.
    fn mean(&self, population: &[Self::Genome]) -> Self::Genome;
}

/// Snowdrift genome: the (benefit, cost) pair under evolution.
///
/// No domain is enforced after mutation; values may drift negative or above
/// one and propagate as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub benefit: f64,
    pub cost: f64,
}
