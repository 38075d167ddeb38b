//! Viterbi (max-product) recurrence with argmax tracking.
//!
//! `delta[j][0] = P(j | START) * P(o_0 | j)` and
//! `delta[j][t] = max_i delta[i][t-1] * P(j | i) * P(o_t | j)`, recording the
//! maximising `i` as the backpointer of `(j, t)`.
//!
//! Ties are broken towards the earliest state: the running maximum starts at
//! the first candidate's score and is only replaced on a strictly greater
//! score. A cell whose candidates are all zero (an unreachable state) still
//! gets the first state as predecessor, so every cell past `t = 0` has a
//! defined backpointer.

use tracing::debug;

use crate::error::Result;
use crate::model::{Model, StateId, Symbol};
use crate::table::{BackpointerTable, ViterbiTable};
use crate::traits::TrellisProblem;
use crate::utils::first_argmax;

/// Viterbi DP instance: borrowed model + encoded observation sequence.
#[derive(Clone, Debug)]
pub struct ViterbiProblem<'m> {
    model: &'m Model,
    /// Observations as vocabulary indices.
    obs: Vec<usize>,
}

/// One trellis column.
#[derive(Clone, Debug, PartialEq)]
pub struct VitFrontier {
    /// Probability of the best path ending in each state at time t.
    pub delta: Vec<f64>,
    /// Predecessor achieving `delta`; `None` only at t = 0.
    pub backpointers: Vec<Option<StateId>>,
}

/// Output of the Viterbi recursion and termination.
#[derive(Clone, Debug, PartialEq)]
pub struct ViterbiResult {
    pub table: ViterbiTable,
    pub backpointers: BackpointerTable,
    /// P*, the probability of the single best path.
    pub best_score: f64,
    pub best_terminal_state: StateId,
}

impl<'m> ViterbiProblem<'m> {
    /// # Errors
    /// [`EmptySequence`](crate::HmmError::EmptySequence) or
    /// [`UnknownSymbol`](crate::HmmError::UnknownSymbol).
    pub fn new(model: &'m Model, observations: &[Symbol]) -> Result<Self> {
        let obs = model.encode(observations)?;
        Ok(Self { model, obs })
    }

    pub fn model(&self) -> &Model {
        self.model
    }
}

impl TrellisProblem for ViterbiProblem<'_> {
    type Frontier = VitFrontier;
    type Output = ViterbiResult;

    fn num_layers(&self) -> usize {
        self.obs.len()
    }

    fn init_frontier(&self) -> Self::Frontier {
        let o0 = self.obs[0];
        let n = self.model.n_states();
        let delta = (0..n)
            .map(|j| self.model.start_at(j) * self.model.emission_at(j, o0))
            .collect();
        VitFrontier {
            delta,
            backpointers: vec![None; n],
        }
    }

    fn forward_step(&self, layer: usize, prev: &Self::Frontier) -> Self::Frontier {
        let sym = self.obs[layer];
        let n = self.model.n_states();
        let mut delta = vec![0.0; n];
        let mut backpointers = vec![None; n];
        for s_to in 0..n {
            let emit = self.model.emission_at(s_to, sym);
            let candidates = prev
                .delta
                .iter()
                .enumerate()
                .map(|(s_from, &d)| d * self.model.transition_at(s_from, s_to) * emit);
            if let Some((arg, best)) = first_argmax(candidates) {
                delta[s_to] = best;
                backpointers[s_to] = Some(arg);
            }
        }
        VitFrontier {
            delta,
            backpointers,
        }
    }

    fn finish(&self, frontiers: Vec<Self::Frontier>) -> Self::Output {
        let n = self.model.n_states();
        let (best_terminal_state, best_score) = frontiers
            .last()
            .and_then(|last| first_argmax(last.delta.iter().copied()))
            .unwrap_or((0, 0.0));
        debug!(
            layers = frontiers.len(),
            best_score,
            best_terminal_state,
            "viterbi pass complete"
        );

        let mut deltas = Vec::with_capacity(frontiers.len());
        let mut backs = Vec::with_capacity(frontiers.len());
        for VitFrontier {
            delta,
            backpointers,
        } in frontiers
        {
            deltas.push(delta);
            backs.push(backpointers);
        }
        ViterbiResult {
            table: ViterbiTable::from_columns(n, deltas),
            backpointers: BackpointerTable::from_columns(n, backs),
            best_score,
            best_terminal_state,
        }
    }
}
