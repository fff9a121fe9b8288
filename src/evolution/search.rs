//! Steady-state evolutionary loop over pluggable genome operations.

use log::{debug, info};
use rayon::prelude::*;

use crate::schema::{ConfigError, OptimizerConfig};

use super::genome::{GenomeOps, GenomeRng};

/// Evolution engine running a steady-state genetic algorithm.
///
/// Each generation evaluates the whole population, crosses the two fittest
/// individuals, replaces the least fit with the child, then gives every
/// individual (the child included) an independent mutation chance. The
/// generation output is the coordinate-wise population mean.
pub struct EvolutionEngine<G: GenomeOps> {
    ops: G,
    config: OptimizerConfig,
    rng: GenomeRng,
}

impl<G: GenomeOps + Sync> EvolutionEngine<G> {
    /// Create an engine; fails on an invalid configuration.
    pub fn new(ops: G, config: OptimizerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.random_seed.unwrap_or_else(rand::random);
        debug!("evolution engine seeded with {seed}");
        Ok(Self {
            ops,
            config,
            rng: GenomeRng::new(seed),
        })
    }

    /// Lazy, finite sequence of exactly `max_generations` generation means
    /// (empty for zero). The population is initialized up front; each
    /// generation is computed on demand, exactly once, in order.
    pub fn run(&mut self) -> Generations<'_, G> {
        let population = self.ops.init(self.config.population_size, &mut self.rng);
        let remaining = self.config.max_generations;
        Generations {
            engine: self,
            population,
            remaining,
            generation: 0,
        }
    }

    /// Advance the population by one generation and return its mean.
    fn step_generation(&mut self, population: &mut [G::Genome], generation: usize) -> G::Genome {
        // Child seeds are drawn in order before the parallel region so the
        // run stays reproducible regardless of scheduling.
        let seeds: Vec<u64> = population
            .iter()
            .map(|_| self.rng.next_seed())
            .collect();
        let ops = &self.ops;
        let fitness: Vec<f64> = population
            .par_iter()
            .zip(seeds.par_iter())
            .map(|(genome, &seed)| ops.fitness(genome, &mut GenomeRng::new(seed)))
            .collect();

        // Top two by fitness; the lower original index wins the first
        // parent slot on ties.
        let first = argmax(&fitness, None);
        let second = argmax(&fitness, Some(first));
        let child = self.ops.crossover(&population[first], &population[second]);

        // The single worst individual (first index on ties) makes way for
        // the child before mutation, so the child is mutation-eligible.
        let worst = argmin(&fitness);
        population[worst] = child;

        let p = self.config.mutation_probability;
        for genome in population.iter_mut() {
            if self.rng.chance(p) {
                *genome = self.ops.mutate(genome, &mut self.rng);
            }
        }

        let mean = self.ops.mean(population);
        info!("generation {generation}: mean individual {mean:?}");
        mean
    }
}

/// Index of the highest fitness, skipping `exclude`; first index on ties.
fn argmax(fitness: &[f64], exclude: Option<usize>) -> usize {
    let mut best = usize::MAX;
    for (i, &f) in fitness.iter().enumerate() {
        if Some(i) == exclude {
            continue;
        }
        if best == usize::MAX || f > fitness[best] {
            best = i;
        }
    }
    best
}

/// Index of the lowest fitness; first index on ties.
fn argmin(fitness: &[f64]) -> usize {
    let mut worst = 0;
    for (i, &f) in fitness.iter().enumerate() {
        if f < fitness[worst] {
            worst = i;
        }
    }
    worst
}

/// Pull-based iterator over generation means, one generation per `next`.
pub struct Generations<'a, G: GenomeOps> {
    engine: &'a mut EvolutionEngine<G>,
    population: Vec<G::Genome>,
    remaining: usize,
    generation: usize,
}

impl<G: GenomeOps> Generations<'_, G> {
    /// Current population snapshot.
    pub fn population(&self) -> &[G::Genome] {
        &self.population
    }
}

impl<G: GenomeOps + Sync> Iterator for Generations<'_, G> {
    type Item = G::Genome;

    fn next(&mut self) -> Option<G::Genome> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.generation += 1;
        Some(
            self.engine
                .step_generation(&mut self.population, self.generation),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic scalar genome for exercising the loop mechanics:
    /// fitness is the value itself, crossover averages, mutation adds 100.
    struct ValueOps;

    impl GenomeOps for ValueOps {
        type Genome = f64;

        fn init(&self, size: usize, _rng: &mut GenomeRng) -> Vec<f64> {
            (0..size).map(|i| i as f64).collect()
        }

        fn fitness(&self, genome: &f64, _rng: &mut GenomeRng) -> f64 {
            *genome
        }

        fn crossover(&self, a: &f64, b: &f64) -> f64 {
            (a + b) / 2.0
        }

        fn mutate(&self, genome: &f64, _rng: &mut GenomeRng) -> f64 {
            genome + 100.0
        }

        fn mean(&self, population: &[f64]) -> f64 {
            population.iter().sum::<f64>() / population.len() as f64
        }
    }

    fn engine(population_size: usize, max_generations: usize, p: f64) -> EvolutionEngine<ValueOps> {
        EvolutionEngine::new(
            ValueOps,
            OptimizerConfig {
                population_size,
                max_generations,
                mutation_probability: p,
                random_seed: Some(1),
            },
        )
        .unwrap()
    }

    #[test]
    fn zero_generations_yield_an_empty_sequence() {
        let mut engine = engine(4, 0, 0.0);
        assert_eq!(engine.run().count(), 0);
    }

    #[test]
    fn population_length_is_invariant() {
        let mut engine = engine(6, 5, 0.5);
        let mut generations = engine.run();
        for _ in 0..5 {
            generations.next().unwrap();
            assert_eq!(generations.population().len(), 6);
        }
        assert!(generations.next().is_none());
    }

    #[test]
    fn steady_state_replacement_without_mutation() {
        // Population starts as [0, 1, 2, 3]. Generation 1 crosses 3 and 2
        // into 2.5 and replaces 0; generation 2 crosses 3 and 2.5 into
        // 2.75 and replaces 1.
        let mut engine = engine(4, 2, 0.0);
        let means: Vec<f64> = engine.run().collect();
        assert_eq!(means.len(), 2);
        assert!((means[0] - (2.5 + 1.0 + 2.0 + 3.0) / 4.0).abs() < 1e-12);
        assert!((means[1] - (2.5 + 2.75 + 2.0 + 3.0) / 4.0).abs() < 1e-12);
    }

    #[test]
    fn certain_mutation_touches_every_individual() {
        // With p = 1 everyone, the fresh child included, shifts by 100.
        let mut engine = engine(4, 1, 1.0);
        let means: Vec<f64> = engine.run().collect();
        assert!((means[0] - (102.5 + 101.0 + 102.0 + 103.0) / 4.0).abs() < 1e-12);
    }

    #[test]
    fn ties_resolve_to_the_lowest_index() {
        struct TieOps;

        impl GenomeOps for TieOps {
            type Genome = f64;

            fn init(&self, _size: usize, _rng: &mut GenomeRng) -> Vec<f64> {
                vec![5.0, 5.0, 3.0, 3.0]
            }

            fn fitness(&self, genome: &f64, _rng: &mut GenomeRng) -> f64 {
                *genome
            }

            fn crossover(&self, a: &f64, b: &f64) -> f64 {
                (a + b) / 2.0
            }

            fn mutate(&self, genome: &f64, _rng: &mut GenomeRng) -> f64 {
                *genome
            }

            fn mean(&self, population: &[f64]) -> f64 {
                population.iter().sum::<f64>() / population.len() as f64
            }
        }

        // Parents are indices 0 and 1, the replaced slot is index 2.
        let mut engine = EvolutionEngine::new(
            TieOps,
            OptimizerConfig {
                population_size: 4,
                max_generations: 1,
                mutation_probability: 0.0,
                random_seed: Some(1),
            },
        )
        .unwrap();
        let mut generations = engine.run();
        let mean = generations.next().unwrap();
        assert_eq!(generations.population(), &[5.0, 5.0, 5.0, 3.0]);
        assert!((mean - 4.5).abs() < 1e-12);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = EvolutionEngine::new(
            ValueOps,
            OptimizerConfig {
                population_size: 1,
                ..Default::default()
            },
        );
        assert!(result.is_err());
    }
}
