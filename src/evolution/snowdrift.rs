//! Snowdrift genome operations: automaton rollouts as the fitness oracle.

use rand_distr::Normal;

use crate::automata::{Automaton, Lattice, SnowDriftRule};
use crate::schema::{ConfigError, EvaluationConfig};

use super::genome::{GenomeOps, GenomeRng, Individual};

/// Standard deviation of the multiplicative Gaussian mutation factor.
const MUTATION_SIGMA: f64 = 0.05;

/// Evolves snowdrift (benefit, cost) pairs with fresh simulation rollouts
/// as the fitness oracle.
///
/// Each evaluation is O(horizon x grid area) and stochastic: the rollout
/// lattice is redrawn every time, so the same genome can score differently
/// across generations.
pub struct SnowdriftOptimizer {
    evaluation: EvaluationConfig,
    factor: Normal<f64>,
}

impl SnowdriftOptimizer {
    /// Create an optimizer; fails on an invalid rollout configuration.
    pub fn new(evaluation: EvaluationConfig) -> Result<Self, ConfigError> {
        evaluation.validate()?;
        let factor = Normal::new(1.0, MUTATION_SIGMA).expect("mutation sigma is finite");
        Ok(Self { evaluation, factor })
    }

    fn random_lattice(&self, rng: &mut GenomeRng) -> Lattice {
        let mut lattice = Lattice::zeros(self.evaluation.rows, self.evaluation.cols);
        for r in 0..self.evaluation.rows {
            for c in 0..self.evaluation.cols {
                lattice.set(r, c, rng.fair_bit());
            }
        }
        lattice
    }
}

impl GenomeOps for SnowdriftOptimizer {
    type Genome = Individual;

    fn init(&self, size: usize, rng: &mut GenomeRng) -> Vec<Individual> {
        (0..size)
            .map(|_| Individual {
                benefit: rng.uniform(),
                cost: rng.uniform(),
            })
            .collect()
    }

    /// Run a fresh rollout and return the negated defection occupancy over
    /// the trailing snapshot window (transient cutoff).
    fn fitness(&self, genome: &Individual, rng: &mut GenomeRng) -> f64 {
        let lattice = self.random_lattice(rng);
        let rule = SnowDriftRule::new(genome.benefit, genome.cost);
        let mut automaton =
            Automaton::new(lattice, rule).expect("freshly drawn lattice is in the rule's domain");

        let tail = self.evaluation.tail();
        let mut window: Vec<u64> = Vec::new();
        for snapshot in automaton.iterate(self.evaluation.steps) {
            window.push(snapshot.live_cells());
            if tail > 0 && window.len() > tail {
                window.remove(0);
            }
        }

        -(window.iter().sum::<u64>() as f64)
    }

    fn crossover(&self, a: &Individual, b: &Individual) -> Individual {
        Individual {
            benefit: (a.benefit + b.benefit) / 2.0,
            cost: (a.cost + b.cost) / 2.0,
        }
    }

    /// Scale each component by an independent Normal(1, 0.05) factor; no
    /// domain clamping.
    fn mutate(&self, genome: &Individual, rng: &mut GenomeRng) -> Individual {
        Individual {
            benefit: genome.benefit * rng.sample(&self.factor),
            cost: genome.cost * rng.sample(&self.factor),
        }
    }

    fn mean(&self, population: &[Individual]) -> Individual {
        let n = population.len() as f64;
        Individual {
            benefit: population.iter().map(|g| g.benefit).sum::<f64>() / n,
            cost: population.iter().map(|g| g.cost).sum::<f64>() / n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::EvolutionEngine;
    use crate::schema::OptimizerConfig;

    fn optimizer() -> SnowdriftOptimizer {
        SnowdriftOptimizer::new(EvaluationConfig::default()).unwrap()
    }

    #[test]
    fn init_draws_from_the_unit_interval() {
        let mut rng = GenomeRng::new(3);
        let population = optimizer().init(50, &mut rng);
        assert_eq!(population.len(), 50);
        for genome in &population {
            assert!((0.0..1.0).contains(&genome.benefit));
            assert!((0.0..1.0).contains(&genome.cost));
        }
    }

    #[test]
    fn crossover_is_the_elementwise_mean() {
        let child = optimizer().crossover(
            &Individual {
                benefit: 0.2,
                cost: 0.8,
            },
            &Individual {
                benefit: 0.6,
                cost: 0.4,
            },
        );
        assert!((child.benefit - 0.4).abs() < 1e-12);
        assert!((child.cost - 0.6).abs() < 1e-12);
    }

    #[test]
    fn mutation_factor_is_unbiased() {
        let optimizer = optimizer();
        let mut rng = GenomeRng::new(11);
        let base = Individual {
            benefit: 1.0,
            cost: 1.0,
        };
        let n = 4000;
        let mut sum = 0.0;
        for _ in 0..n {
            let mutated = optimizer.mutate(&base, &mut rng);
            sum += mutated.benefit + mutated.cost;
        }
        let mean_factor = sum / (2.0 * n as f64);
        assert!(
            (mean_factor - 1.0).abs() < 0.01,
            "mean factor drifted to {mean_factor}"
        );
    }

    #[test]
    fn mutation_does_not_clamp() {
        let optimizer = optimizer();
        let mut rng = GenomeRng::new(5);
        let genome = Individual {
            benefit: -2.0,
            cost: 3.0,
        };
        let mutated = optimizer.mutate(&genome, &mut rng);
        assert!(mutated.benefit < 0.0);
        assert!(mutated.cost > 1.0);
    }

    #[test]
    fn fitness_is_bounded_by_the_trailing_window() {
        let optimizer = optimizer();
        let mut rng = GenomeRng::new(21);
        let fitness = optimizer.fitness(
            &Individual {
                benefit: 0.6,
                cost: 0.2,
            },
            &mut rng,
        );
        let cells = (15 * 15) as f64;
        let window = 10.0;
        assert!(fitness <= 0.0);
        assert!(fitness >= -(cells * window));
    }

    #[test]
    fn short_horizon_keeps_the_whole_sequence() {
        let optimizer = SnowdriftOptimizer::new(EvaluationConfig {
            rows: 4,
            cols: 4,
            steps: 5,
        })
        .unwrap();
        let mut rng = GenomeRng::new(2);
        let fitness = optimizer.fitness(
            &Individual {
                benefit: 0.6,
                cost: 0.2,
            },
            &mut rng,
        );
        // Six snapshots of at most 16 cells each.
        assert!(fitness >= -(16.0 * 6.0));
        assert!(fitness <= 0.0);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let config = OptimizerConfig {
            population_size: 4,
            max_generations: 3,
            mutation_probability: 0.02,
            random_seed: Some(1234),
        };

        let run = |config: &OptimizerConfig| -> Vec<Individual> {
            let mut engine = EvolutionEngine::new(
                SnowdriftOptimizer::new(EvaluationConfig {
                    rows: 8,
                    cols: 8,
                    steps: 20,
                })
                .unwrap(),
                config.clone(),
            )
            .unwrap();
            engine.run().collect()
        };

        let first = run(&config);
        let second = run(&config);
        assert_eq!(first.len(), 3);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.benefit.to_bits(), b.benefit.to_bits());
            assert_eq!(a.cost.to_bits(), b.cost.to_bits());
        }
    }
}
