//! Forward (sum-product) recurrence.
//!
//! `alpha[j][0] = P(j | START) * P(o_0 | j)` and
//! `alpha[j][t] = Σ_i alpha[i][t-1] * P(j | i) * P(o_t | j)`.
//! The sequence likelihood is the sum of the last column. Values are plain
//! probabilities; long sequences may underflow to zero, which is reported as
//! a warning, not an error.

use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{Model, Symbol};
use crate::table::ForwardTable;
use crate::traits::TrellisProblem;
use crate::utils::ordered_sum;

/// Forward DP instance: borrowed model + encoded observation sequence.
#[derive(Clone, Debug)]
pub struct ForwardProblem<'m> {
    model: &'m Model,
    /// Observations as vocabulary indices.
    obs: Vec<usize>,
}

/// Output of the forward computation.
#[derive(Clone, Debug, PartialEq)]
pub struct ForwardResult {
    pub table: ForwardTable,
    /// P(O | λ), the sum of the final column of `table`.
    pub likelihood: f64,
}

impl<'m> ForwardProblem<'m> {
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

impl TrellisProblem for ForwardProblem<'_> {
    type Frontier = Vec<f64>;
    type Output = ForwardResult;

    fn num_layers(&self) -> usize {
        self.obs.len()
    }

    fn init_frontier(&self) -> Self::Frontier {
        let o0 = self.obs[0];
        (0..self.model.n_states())
            .map(|j| self.model.start_at(j) * self.model.emission_at(j, o0))
            .collect()
    }

    fn forward_step(&self, layer: usize, prev: &Self::Frontier) -> Self::Frontier {
        let sym = self.obs[layer];
        let n = self.model.n_states();
        let mut next = vec![0.0; n];
        for (j, val) in next.iter_mut().enumerate() {
            let emit = self.model.emission_at(j, sym);
            let mut sum = 0.0;
            for (i, &alpha) in prev.iter().enumerate() {
                sum += alpha * self.model.transition_at(i, j) * emit;
            }
            *val = sum;
        }
        next
    }

    fn finish(&self, frontiers: Vec<Self::Frontier>) -> Self::Output {
        let likelihood = frontiers.last().map_or(0.0, |last| ordered_sum(last));
        if likelihood == 0.0 {
            warn!(
                layers = frontiers.len(),
                "forward likelihood is exactly zero (impossible sequence or underflow)"
            );
        }
        debug!(layers = frontiers.len(), likelihood, "forward pass complete");
        ForwardResult {
            table: ForwardTable::from_columns(self.model.n_states(), frontiers),
            likelihood,
        }
    }
}
