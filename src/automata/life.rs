//! Conway's Game of Life on a toroidal lattice.

use super::engine::UpdateRule;
use super::lattice::{Lattice, moore_neighbors};

/// Conway life: a live cell survives with 2 or 3 live Moore neighbors, a
/// dead cell becomes live with exactly 3. Deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameOfLifeRule;

impl UpdateRule for GameOfLifeRule {
    fn apply(&self, lattice: &Lattice) -> Lattice {
        let mut next = Lattice::zeros(lattice.rows(), lattice.cols());
        for r in 0..lattice.rows() {
            for c in 0..lattice.cols() {
                let live: u32 = moore_neighbors(lattice, (r, c))
                    .iter()
                    .map(|&(v, _)| v as u32)
                    .sum();
                let state = match (lattice.get(r, c), live) {
                    (1, 2) | (1, 3) => 1,
                    (0, 3) => 1,
                    _ => 0,
                };
                next.set(r, c, state);
            }
        }
        next
    }
}
