//! Dense state × time tables produced by the engines.
//!
//! Tables are stored column-major: all states of time step `t` are
//! contiguous, matching the order in which the trellis is filled.

use crate::model::StateId;

/// Dense table indexed by `(state, t)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<T> {
    n_states: usize,
    cells: Vec<T>,
}

/// Forward probabilities `alpha[state][t]`.
pub type ForwardTable = Table<f64>;
/// Best single-path probabilities `delta[state][t]`.
pub type ViterbiTable = Table<f64>;
/// Predecessor of each cell on its best path; `None` at `t = 0`.
pub type BackpointerTable = Table<Option<StateId>>;

impl<T> Table<T> {
    /// Assemble a table from per-time-step columns.
    ///
    /// # Panics
    /// Panics if a column's length differs from `n_states`.
    pub fn from_columns<I>(n_states: usize, columns: I) -> Self
    where
        I: IntoIterator<Item = Vec<T>>,
    {
        let mut cells = Vec::new();
        for column in columns {
            assert_eq!(column.len(), n_states, "column length must equal n_states");
            cells.extend(column);
        }
        Self { n_states, cells }
    }

    #[inline]
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// Number of time steps T.
    #[inline]
    pub fn len(&self) -> usize {
        if self.n_states == 0 {
            0
        } else {
            self.cells.len() / self.n_states
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Entry for `(state, t)`, or `None` when out of range.
    #[inline]
    pub fn try_get(&self, state: StateId, t: usize) -> Option<&T> {
        if state >= self.n_states {
            return None;
        }
        self.cells.get(t * self.n_states + state)
    }

    /// All states at time `t`, in state order.
    ///
    /// # Panics
    /// Panics if `t >= len()`.
    #[inline]
    pub fn column(&self, t: usize) -> &[T] {
        &self.cells[t * self.n_states..(t + 1) * self.n_states]
    }

    pub fn columns(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.cells.chunks(self.n_states.max(1))
    }

    /// The final column, `None` for an empty table.
    pub fn last_column(&self) -> Option<&[T]> {
        self.len().checked_sub(1).map(|t| self.column(t))
    }
}

impl<T: Copy> Table<T> {
    /// Entry for `(state, t)`.
    ///
    /// # Panics
    /// Panics if `state` or `t` is out of range.
    #[inline]
    pub fn get(&self, state: StateId, t: usize) -> T {
        assert!(state < self.n_states, "state {state} out of range");
        self.cells[t * self.n_states + state]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexing_is_state_then_time() {
        let t = Table::from_columns(2, vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
        assert_eq!(t.len(), 3);
        assert_eq!(t.n_states(), 2);
        assert_eq!(t.get(0, 0), 1);
        assert_eq!(t.get(1, 0), 2);
        assert_eq!(t.get(1, 2), 6);
        assert_eq!(t.column(1), &[3, 4]);
        assert_eq!(t.last_column(), Some(&[5, 6][..]));
        assert_eq!(t.columns().count(), 3);
    }

    #[test]
    fn try_get_reports_out_of_range() {
        let t = Table::from_columns(2, vec![vec![None, Some(1)]]);
        assert_eq!(t.try_get(1, 0), Some(&Some(1)));
        assert_eq!(t.try_get(2, 0), None);
        assert_eq!(t.try_get(0, 1), None);
    }

    #[test]
    fn empty_table() {
        let t: Table<f64> = Table::from_columns(3, Vec::new());
        assert!(t.is_empty());
        assert_eq!(t.len(), 0);
        assert_eq!(t.last_column(), None);
    }

    #[test]
    #[should_panic(expected = "column length must equal n_states")]
    fn ragged_columns_panic() {
        let _ = Table::from_columns(2, vec![vec![1.0]]);
    }
}
