//! Spatial snowdrift game with payoff-based imitation dynamics.
//!
//! Strategy 0 cooperates, strategy 1 defects. Each step computes every
//! cell's payoff against its Moore neighborhood, then lets each cell imitate
//! a strictly fitter neighbor.

use super::engine::UpdateRule;
use super::lattice::{Lattice, moore_neighbors};

/// Strategy index for cooperation.
pub const COOPERATE: u8 = 0;
/// Strategy index for defection.
pub const DEFECT: u8 = 1;

/// 2x2 payoff matrix indexed [own strategy][neighbor strategy].
///
/// Derived once per run from the (benefit, cost) parameters and immutable
/// afterwards. Degenerate parameters (negative cost, NaN) are not
/// validated; they propagate into fitness values as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoffMatrix {
    entries: [[f64; 2]; 2],
}

impl PayoffMatrix {
    /// Snowdrift payoffs: mutual cooperation splits the cost, a lone
    /// cooperator bears it fully, a defector against a cooperator free
    /// rides, mutual defection pays nothing.
    pub fn from_params(benefit: f64, cost: f64) -> Self {
        Self {
            entries: [
                [benefit - cost / 2.0, benefit - cost],
                [benefit, 0.0],
            ],
        }
    }

    /// Payoff for `own` strategy meeting `other`.
    #[inline]
    pub fn get(&self, own: u8, other: u8) -> f64 {
        self.entries[own as usize][other as usize]
    }
}

/// Imitation-dynamics update rule for the spatial snowdrift game.
#[derive(Debug, Clone)]
pub struct SnowDriftRule {
    benefit: f64,
    cost: f64,
    payoff: PayoffMatrix,
}

impl SnowDriftRule {
    /// Create a rule with fixed (benefit, cost) parameters.
    pub fn new(benefit: f64, cost: f64) -> Self {
        Self {
            benefit,
            cost,
            payoff: PayoffMatrix::from_params(benefit, cost),
        }
    }

    /// The run-scoped payoff matrix.
    pub fn payoff(&self) -> &PayoffMatrix {
        &self.payoff
    }
}

impl UpdateRule for SnowDriftRule {
    fn setup(&mut self) {
        self.payoff = PayoffMatrix::from_params(self.benefit, self.cost);
    }

    /// Two full, non-interleaved passes over the current lattice.
    ///
    /// Pass 1 stores every cell's fitness (mean payoff over its 8 neighbors,
    /// all read from the pre-update lattice). Pass 2 scans each cell's
    /// neighbor fitness values in enumeration order: the cell adopts the
    /// pre-update strategy of the last neighbor whose fitness strictly
    /// exceeds its own, or keeps its strategy if none does.
    fn apply(&self, lattice: &Lattice) -> Lattice {
        let rows = lattice.rows();
        let cols = lattice.cols();

        let mut fitness = vec![0.0f64; rows * cols];
        for r in 0..rows {
            for c in 0..cols {
                let own = lattice.get(r, c);
                let total: f64 = moore_neighbors(lattice, (r, c))
                    .iter()
                    .map(|&(other, _)| self.payoff.get(own, other))
                    .sum();
                fitness[lattice.idx(r, c)] = total / 8.0;
            }
        }

        let mut next = lattice.clone();
        for r in 0..rows {
            for c in 0..cols {
                let own_fitness = fitness[lattice.idx(r, c)];
                let mut adopted = None;
                for (strategy, (nr, nc)) in moore_neighbors(lattice, (r, c)) {
                    if fitness[lattice.idx(nr, nc)] > own_fitness {
                        // Last qualifying neighbor in enumeration order wins.
                        adopted = Some(strategy);
                    }
                }
                if let Some(strategy) = adopted {
                    next.set(r, c, strategy);
                }
            }
        }
        next
    }
}
