//! Generic trellis driver.
//!
//! The engine owns a [`TrellisProblem`] and fills its columns left to right:
//! column 0 from `init_frontier`, every later column from the previous one.
//! All columns are retained because both HMM computations return their full
//! tables. The engine is completely generic over the recurrence.

use tracing::trace_span;

use crate::traits::TrellisProblem;

/// Layer-by-layer DP engine for a given problem instance `P`.
///
/// Typical usage:
/// ```
/// use trellis_hmm::{presets, problems::forward::ForwardProblem, TrellisEngine};
///
/// let model = presets::hot_cold().unwrap();
/// let problem = ForwardProblem::new(&model, &[3, 1, 3]).unwrap();
/// let result = TrellisEngine::new(problem).run();
/// assert_eq!(result.table.len(), 3);
/// assert!(result.likelihood > 0.0);
/// ```
pub struct TrellisEngine<P: TrellisProblem> {
    problem: P,
}

impl<P: TrellisProblem> TrellisEngine<P> {
    pub fn new(problem: P) -> Self {
        Self { problem }
    }

    /// Expose immutable reference to the underlying problem.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Consume the engine, returning the problem.
    pub fn into_problem(self) -> P {
        self.problem
    }

    /// Fill every column, returning them in time order.
    ///
    /// Returns an empty vector when the problem has zero layers.
    pub fn fill(&self) -> Vec<P::Frontier> {
        let t_len = self.problem.num_layers();
        let mut frontiers = Vec::with_capacity(t_len);
        if t_len == 0 {
            return frontiers;
        }

        let init = {
            let span = trace_span!("init_frontier");
            let _enter = span.enter();
            self.problem.init_frontier()
        };
        frontiers.push(init);

        for layer in 1..t_len {
            let span = trace_span!("forward_step", layer);
            let _enter = span.enter();
            let next = self.problem.forward_step(layer, &frontiers[layer - 1]);
            frontiers.push(next);
        }
        frontiers
    }

    /// Run the full DP: fill all columns, then terminate.
    pub fn run(&self) -> P::Output {
        let span = tracing::debug_span!("trellis_run", layers = self.problem.num_layers());
        let _enter = span.enter();
        let frontiers = self.fill();
        self.problem.finish(frontiers)
    }
}
