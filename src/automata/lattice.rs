//! Toroidal lattice storage and Moore-neighbor enumeration.

use serde::{Deserialize, Serialize};

/// A (row, col) cell index.
pub type Position = (usize, usize);

/// Errors from lattice construction and engine setup.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Lattice must have non-zero dimensions")]
    EmptyLattice,
    #[error("Row {row} has length {found}, expected {expected}")]
    NonRectangular {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("Cell ({row}, {col}) holds state {state}, outside the rule's domain")]
    InvalidCellState { row: usize, col: usize, state: u8 },
}

/// Rectangular grid of discrete cell states, row-major flat storage.
///
/// Wraps toroidally: every cell has exactly 8 Moore neighbors, corners
/// included. A lattice is owned by one [`Automaton`](super::Automaton);
/// snapshots handed out are independent clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lattice {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Lattice {
    /// Create a lattice with every cell set to `state`.
    pub fn filled(rows: usize, cols: usize, state: u8) -> Self {
        Self {
            rows,
            cols,
            cells: vec![state; rows * cols],
        }
    }

    /// Create an all-dead lattice.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, 0)
    }

    /// Build from nested rows, checking rectangularity.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, EngineError> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(EngineError::EmptyLattice);
        }
        let expected = rows[0].len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(EngineError::NonRectangular {
                    row: i,
                    found: row.len(),
                    expected,
                });
            }
        }
        Ok(Self {
            rows: rows.len(),
            cols: expected,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Convert (row, col) to flat index.
    #[inline]
    pub fn idx(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Get cell state at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[self.idx(row, col)]
    }

    /// Set cell state at (row, col).
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, state: u8) {
        let idx = self.idx(row, col);
        self.cells[idx] = state;
    }

    /// Flat row-major view of all cells.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Sum of all cell states (live-cell count for 0/1 lattices).
    pub fn live_cells(&self) -> u64 {
        self.cells.iter().map(|&v| v as u64).sum()
    }
}

/// Enumerate the 8 toroidal Moore neighbors of `pos` as (state, position)
/// pairs.
///
/// The order is fixed and part of the contract: top row left to right, then
/// the two lateral neighbors, then the bottom row left to right. The
/// snowdrift imitation pass breaks ties by taking the last qualifying
/// neighbor in this order.
pub fn moore_neighbors(lattice: &Lattice, pos: Position) -> [(u8, Position); 8] {
    let (r, c) = pos;
    let up = (r + lattice.rows() - 1) % lattice.rows();
    let down = (r + 1) % lattice.rows();
    let left = (c + lattice.cols() - 1) % lattice.cols();
    let right = (c + 1) % lattice.cols();

    [
        (up, left),
        (up, c),
        (up, right),
        (r, left),
        (r, right),
        (down, left),
        (down, c),
        (down, right),
    ]
    .map(|p| (lattice.get(p.0, p.1), p))
}

/// Summary statistics over a single lattice snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatticeStats {
    pub live_cells: u64,
    pub total_cells: usize,
    pub density: f64,
}

impl LatticeStats {
    /// Compute statistics from a snapshot.
    pub fn from_lattice(lattice: &Lattice) -> Self {
        let live_cells = lattice.live_cells();
        let total_cells = lattice.cells().len();
        Self {
            live_cells,
            total_cells,
            density: live_cells as f64 / total_cells as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn from_rows_rejects_ragged_input() {
        let result = Lattice::from_rows(vec![vec![0, 1], vec![1]]);
        assert!(matches!(
            result,
            Err(EngineError::NonRectangular {
                row: 1,
                found: 1,
                expected: 2
            })
        ));
    }

    #[test]
    fn from_rows_rejects_empty_input() {
        assert!(matches!(
            Lattice::from_rows(vec![]),
            Err(EngineError::EmptyLattice)
        ));
        assert!(matches!(
            Lattice::from_rows(vec![vec![]]),
            Err(EngineError::EmptyLattice)
        ));
    }

    #[test]
    fn flat_indexing_is_row_major() {
        let lattice = Lattice::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(lattice.get(0, 2), 3);
        assert_eq!(lattice.get(1, 0), 4);
        assert_eq!(lattice.cells(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn neighbor_order_is_fixed() {
        let lattice = Lattice::zeros(4, 4);
        let neighbors = moore_neighbors(&lattice, (1, 1));
        let positions: Vec<Position> = neighbors.iter().map(|&(_, p)| p).collect();
        assert_eq!(
            positions,
            vec![
                (0, 0),
                (0, 1),
                (0, 2),
                (1, 0),
                (1, 2),
                (2, 0),
                (2, 1),
                (2, 2)
            ]
        );
    }

    #[test]
    fn corner_wraps_toroidally() {
        let lattice = Lattice::zeros(3, 5);
        let neighbors = moore_neighbors(&lattice, (0, 0));
        // First neighbor of the origin is the opposite corner.
        assert_eq!(neighbors[0].1, (2, 4));
        let positions: Vec<Position> = neighbors.iter().map(|&(_, p)| p).collect();
        assert!(positions.contains(&(2, 4)));
        assert!(positions.contains(&(0, 4)));
        assert!(positions.contains(&(2, 0)));
    }

    #[test]
    fn neighbor_values_come_from_current_lattice() {
        let mut lattice = Lattice::zeros(3, 3);
        lattice.set(0, 0, 1);
        let neighbors = moore_neighbors(&lattice, (1, 1));
        assert_eq!(neighbors[0], (1, (0, 0)));
        assert_eq!(neighbors[1], (0, (0, 1)));
    }

    #[test]
    fn stats_density() {
        let lattice = Lattice::from_rows(vec![vec![1, 0], vec![0, 1]]).unwrap();
        let stats = LatticeStats::from_lattice(&lattice);
        assert_eq!(stats.live_cells, 2);
        assert_eq!(stats.total_cells, 4);
        assert!((stats.density - 0.5).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn always_eight_in_bounds_neighbors(
            rows in 1usize..12,
            cols in 1usize..12,
            r in 0usize..12,
            c in 0usize..12,
        ) {
            let r = r % rows;
            let c = c % cols;
            let lattice = Lattice::zeros(rows, cols);
            let neighbors = moore_neighbors(&lattice, (r, c));
            prop_assert_eq!(neighbors.len(), 8);
            for (_, (nr, nc)) in neighbors {
                prop_assert!(nr < rows);
                prop_assert!(nc < cols);
            }
        }
    }
}
