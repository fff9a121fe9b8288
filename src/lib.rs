//! Lattice games - toroidal cellular automata with evolutionary
//! optimization of spatial game parameters.
//!
//! This crate simulates discrete spatial agent models on a toroidal grid
//! and tunes model parameters with a steady-state genetic algorithm whose
//! fitness oracle is a fresh simulation rollout per evaluation.
//!
//! # Architecture
//!
//! The crate is split into three modules:
//!
//! - `schema`: Configuration types and lattice seeding
//! - `automata`: The lattice, the step engine, and the update rules
//!   (Conway life and the snowdrift imitation game)
//! - `evolution`: The steady-state evolutionary loop and the snowdrift
//!   genome operations
//!
//! # Example
//!
//! ```rust
//! use lattice_games::{
//!     automata::{Automaton, GameOfLifeRule},
//!     schema::SeedPattern,
//! };
//!
//! let lattice = SeedPattern::Glider { row: 7, col: 2 }.generate(50, 50);
//! let mut automaton = Automaton::new(lattice, GameOfLifeRule).unwrap();
//!
//! // Initial lattice plus one snapshot per step.
//! let snapshots: Vec<_> = automaton.iterate(100).collect();
//! assert_eq!(snapshots.len(), 101);
//! ```

pub mod automata;
pub mod evolution;
pub mod schema;

// Re-export commonly used types
pub use automata::{Automaton, GameOfLifeRule, Lattice, SnowDriftRule, UpdateRule};
pub use evolution::{EvolutionEngine, SnowdriftOptimizer};
pub use schema::{RunConfig, SeedPattern};
