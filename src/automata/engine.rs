//! Automaton engine - drives a pluggable update rule over an owned lattice.

use log::debug;

use super::lattice::{EngineError, Lattice};

/// A per-lattice update rule plugged into an [`Automaton`].
///
/// `apply` must visit every cell and return a complete new lattice; it never
/// mutates its input, so earlier snapshots stay immutable.
pub trait UpdateRule {
    /// One-time hook run before the first snapshot is produced. Used to
    /// precompute run-scoped constants such as a payoff matrix.
    fn setup(&mut self) {}

    /// Produce the next lattice from the current one.
    fn apply(&self, lattice: &Lattice) -> Lattice;

    /// Whether `state` lies in this rule's state domain.
    fn valid_state(&self, state: u8) -> bool {
        state <= 1
    }
}

/// Owns the current lattice and steps it with an [`UpdateRule`].
///
/// Construction validates the initial lattice against the rule's state
/// domain, failing fast instead of silently corrupting output.
pub struct Automaton<R: UpdateRule> {
    lattice: Lattice,
    rule: R,
    prepared: bool,
    step: u64,
}

impl<R: UpdateRule> Automaton<R> {
    /// Create an automaton, checking every cell against the rule's domain.
    pub fn new(lattice: Lattice, rule: R) -> Result<Self, EngineError> {
        if lattice.rows() == 0 || lattice.cols() == 0 {
            return Err(EngineError::EmptyLattice);
        }
        for (idx, &state) in lattice.cells().iter().enumerate() {
            if !rule.valid_state(state) {
                return Err(EngineError::InvalidCellState {
                    row: idx / lattice.cols(),
                    col: idx % lattice.cols(),
                    state,
                });
            }
        }
        Ok(Self {
            lattice,
            rule,
            prepared: false,
            step: 0,
        })
    }

    /// Current lattice.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Steps applied so far.
    pub fn step(&self) -> u64 {
        self.step
    }

    /// Pull-based, finite, non-restartable sequence of exactly `steps + 1`
    /// snapshots: the current lattice first, then one per rule application,
    /// strictly in order. The rule's `setup` hook runs exactly once per
    /// automaton, before the first snapshot.
    pub fn iterate(&mut self, steps: u64) -> Snapshots<'_, R> {
        if !self.prepared {
            self.rule.setup();
            self.prepared = true;
        }
        debug!(
            "iterating {}x{} lattice for {} steps",
            self.lattice.rows(),
            self.lattice.cols(),
            steps
        );
        Snapshots {
            automaton: self,
            remaining: steps,
            initial_emitted: false,
        }
    }
}

/// Iterator over lattice snapshots, yielded one at a time on demand.
///
/// Snapshot `i + 1` is never begun before snapshot `i` is fully
/// materialized; dropping the iterator early simply stops the run.
pub struct Snapshots<'a, R: UpdateRule> {
    automaton: &'a mut Automaton<R>,
    remaining: u64,
    initial_emitted: bool,
}

impl<R: UpdateRule> Iterator for Snapshots<'_, R> {
    type Item = Lattice;

    fn next(&mut self) -> Option<Lattice> {
        if !self.initial_emitted {
            self.initial_emitted = true;
            return Some(self.automaton.lattice.clone());
        }
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.automaton.lattice = self.automaton.rule.apply(&self.automaton.lattice);
        self.automaton.step += 1;
        Some(self.automaton.lattice.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.remaining as usize + usize::from(!self.initial_emitted);
        (left, Some(left))
    }
}
