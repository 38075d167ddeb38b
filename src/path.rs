//! Backpointer traversal.

use crate::error::{HmmError, Result};
use crate::model::StateId;
use crate::table::BackpointerTable;

/// Reconstruct the most probable hidden-state sequence.
///
/// Starts from `(best_terminal_state, t_len - 1)` and follows backpointers
/// down to `t = 0`. The returned path is in chronological order and has
/// length exactly `t_len`; for `t_len == 1` it is just the terminal state.
///
/// # Errors
/// [`HmmError::InconsistentBackpointer`] if a required entry is missing or
/// out of range. A table produced by the Viterbi engine never triggers this.
pub fn reconstruct_path(
    backpointers: &BackpointerTable,
    best_terminal_state: StateId,
    t_len: usize,
) -> Result<Vec<StateId>> {
    if t_len == 0 {
        return Err(HmmError::EmptySequence);
    }
    if best_terminal_state >= backpointers.n_states() || t_len > backpointers.len() {
        return Err(HmmError::InconsistentBackpointer {
            state: best_terminal_state,
            t: t_len - 1,
        });
    }

    let mut path = Vec::with_capacity(t_len);
    let mut s = best_terminal_state;
    path.push(s);
    for t in (1..t_len).rev() {
        s = match backpointers.try_get(s, t) {
            Some(&Some(prev)) if prev < backpointers.n_states() => prev,
            _ => return Err(HmmError::InconsistentBackpointer { state: s, t }),
        };
        path.push(s);
    }
    path.reverse();
    Ok(path)
}
