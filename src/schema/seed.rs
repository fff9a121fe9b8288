//! Seed patterns for initial lattice configurations.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::automata::{Lattice, Position};

/// Predefined patterns for lattice initialization.
///
/// Anchor positions wrap toroidally, so patterns placed near an edge spill
/// over to the opposite side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SeedPattern {
    /// Every cell dead.
    AllDead,
    /// Five-cell glider anchored at (row, col).
    Glider { row: usize, col: usize },
    /// 2x2 still-life block with top-left corner at (row, col).
    Block { row: usize, col: usize },
    /// Three-cell horizontal blinker centered at (row, col).
    Blinker { row: usize, col: usize },
    /// Independent Bernoulli draw per cell.
    Random { density: f64, seed: u64 },
    /// Explicit live cells; out-of-bounds entries are ignored.
    Custom { cells: Vec<Position> },
}

impl Default for SeedPattern {
    fn default() -> Self {
        Self::Glider { row: 7, col: 2 }
    }
}

impl SeedPattern {
    /// Generate the initial lattice.
    pub fn generate(&self, rows: usize, cols: usize) -> Lattice {
        let mut lattice = Lattice::zeros(rows, cols);

        match self {
            Self::AllDead => {}
            Self::Glider { row, col } => {
                let left = (col + cols - 1) % cols;
                let right = (col + 1) % cols;
                let above = (row + rows - 1) % rows;
                let below = (row + 1) % rows;
                for (r, c) in [
                    (*row, left),
                    (below, *col),
                    (below, right),
                    (*row, right),
                    (above, right),
                ] {
                    lattice.set(r, c, 1);
                }
            }
            Self::Block { row, col } => {
                let below = (row + 1) % rows;
                let right = (col + 1) % cols;
                for (r, c) in [(*row, *col), (*row, right), (below, *col), (below, right)] {
                    lattice.set(r, c, 1);
                }
            }
            Self::Blinker { row, col } => {
                let left = (col + cols - 1) % cols;
                let right = (col + 1) % cols;
                for c in [left, *col, right] {
                    lattice.set(*row, c, 1);
                }
            }
            Self::Random { density, seed } => {
                let mut rng = StdRng::seed_from_u64(*seed);
                let density = density.clamp(0.0, 1.0);
                for r in 0..rows {
                    for c in 0..cols {
                        if rng.gen_bool(density) {
                            lattice.set(r, c, 1);
                        }
                    }
                }
            }
            Self::Custom { cells } => {
                for &(r, c) in cells {
                    if r < rows && c < cols {
                        lattice.set(r, c, 1);
                    }
                }
            }
        }

        lattice
    }
}
