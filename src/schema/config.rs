//! Configuration types for simulation and optimization runs.

use serde::{Deserialize, Serialize};

use super::SeedPattern;

/// Top-level run configuration, selected by the `mode` tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RunConfig {
    /// Simulate Conway life from a seeded lattice.
    Simulate(SimulationConfig),
    /// Evolve snowdrift (benefit, cost) parameters.
    Optimize(OptimizeConfig),
}

/// Configuration for a plain simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Lattice rows.
    pub rows: usize,
    /// Lattice columns.
    pub cols: usize,
    /// Initial lattice pattern.
    #[serde(default)]
    pub seed: SeedPattern,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows: 50,
            cols: 50,
            seed: SeedPattern::default(),
        }
    }
}

impl SimulationConfig {
    /// Validate dimensions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        Ok(())
    }
}

/// Configuration for an optimization run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptimizeConfig {
    #[serde(default)]
    pub optimizer: OptimizerConfig,
    #[serde(default)]
    pub evaluation: EvaluationConfig,
}

impl OptimizeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.optimizer.validate()?;
        self.evaluation.validate()
    }
}

/// Steady-state genetic algorithm parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Population size, constant across all generations of one run.
    pub population_size: usize,
    /// Number of generations to run.
    pub max_generations: usize,
    /// Per-individual probability of mutation each generation.
    pub mutation_probability: f64,
    /// Master seed; drawn from entropy when absent.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            max_generations: 100,
            mutation_probability: 0.02,
            random_seed: None,
        }
    }
}

impl OptimizerConfig {
    /// Validate optimizer parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall {
                size: self.population_size,
            });
        }
        if !self.mutation_probability.is_finite()
            || !(0.0..=1.0).contains(&self.mutation_probability)
        {
            return Err(ConfigError::InvalidMutationProbability {
                probability: self.mutation_probability,
            });
        }
        Ok(())
    }
}

/// Rollout parameters for one snowdrift fitness evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Rollout lattice rows.
    pub rows: usize,
    /// Rollout lattice columns.
    pub cols: usize,
    /// Rollout horizon; the trailing `steps / 10` snapshots feed the
    /// fitness sum (transient cutoff).
    pub steps: u64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            rows: 15,
            cols: 15,
            steps: 100,
        }
    }
}

impl EvaluationConfig {
    /// Validate rollout parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if self.steps == 0 {
            return Err(ConfigError::InvalidSteps);
        }
        Ok(())
    }

    /// Length of the trailing snapshot window. A zero tail (horizon below
    /// the transient divisor) keeps the whole sequence.
    pub fn tail(&self) -> usize {
        (self.steps / 10) as usize
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Lattice dimensions must be non-zero")]
    InvalidDimensions,
    #[error("Evaluation horizon must be non-zero")]
    InvalidSteps,
    #[error("Population size {size} is too small, need at least 2")]
    PopulationTooSmall { size: usize },
    #[error("Mutation probability {probability} must lie in [0, 1]")]
    InvalidMutationProbability { probability: f64 },
}
