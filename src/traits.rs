//! Core trait for layered trellis recurrences.
//!
//! Both HMM computations fill the same shape of table: one column of
//! per-state values for each observation, where column `t` depends only on
//! column `t - 1` and fixed problem data. Implement [`TrellisProblem`] for a
//! struct capturing one query (model + encoded observations) and let
//! [`TrellisEngine`](crate::engine::TrellisEngine) drive it.

/// A fixed instance of a layered dynamic program over `T` time steps.
///
/// Semantics:
/// - There are `T = num_layers()` columns, indexed `0..T`.
/// - `init_frontier()` produces column 0.
/// - `forward_step(t, column_{t-1})` produces column `t` for `t` in `1..T`.
/// - `finish` receives all `T` columns in order and performs termination.
pub trait TrellisProblem {
    /// One column of DP values (one entry per hidden state, plus whatever
    /// bookkeeping the recurrence carries, e.g. backpointers).
    type Frontier;

    /// Result of termination.
    type Output;

    /// Number of time steps `T`.
    fn num_layers(&self) -> usize;

    /// Column at `t = 0`.
    fn init_frontier(&self) -> Self::Frontier;

    /// Compute column `layer` from column `layer - 1`.
    ///
    /// Must only depend on `prev` and fixed problem data.
    fn forward_step(&self, layer: usize, prev: &Self::Frontier) -> Self::Frontier;

    /// Termination over the full list of columns (`frontiers.len() == T`).
    fn finish(&self, frontiers: Vec<Self::Frontier>) -> Self::Output;
}
