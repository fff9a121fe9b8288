//! Automata module - toroidal lattices, the step engine, and update rules.

mod engine;
mod lattice;
mod life;
mod snowdrift;

pub use engine::{Automaton, Snapshots, UpdateRule};
pub use lattice::{EngineError, Lattice, LatticeStats, Position, moore_neighbors};
pub use life::GameOfLifeRule;
pub use snowdrift::{COOPERATE, DEFECT, PayoffMatrix, SnowDriftRule};
