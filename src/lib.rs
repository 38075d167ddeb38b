//! Forward likelihood and Viterbi decoding for discrete hidden Markov models.
//!
//! This crate evaluates a small discrete-time, discrete-state HMM against an
//! observation sequence and answers two questions:
//!
//! 1. What is the total probability `P(O | λ)` that the model produced the
//!    sequence? ([`compute_likelihood`], forward algorithm)
//! 2. Which single hidden-state path most probably produced it?
//!    ([`compute_viterbi_path`], Viterbi algorithm + backpointer traversal)
//!
//! ## Core idea
//! Both computations are layered dynamic programs over the same trellis:
//! one column of per-state values per observation, each column derived from
//! the previous one. They are expressed as [`TrellisProblem`] implementations
//! (see [`problems`]) and driven by the generic [`TrellisEngine`].
//!
//! Arithmetic is plain `f64` products, with no scaling or log-space. Very
//! long sequences may underflow to `0.0`; that is valid output.
//!
//! ## Quick start
//! ```
//! use trellis_hmm::{compute_likelihood, compute_viterbi_path, presets};
//!
//! let model = presets::hot_cold().unwrap();
//! let forward = compute_likelihood(&model, &[3]).unwrap();
//! assert!((forward.likelihood - 0.34).abs() < 1e-12);
//!
//! let decoded = compute_viterbi_path(&model, &[3, 1, 3]).unwrap();
//! assert_eq!(decoded.path.len(), 3);
//! assert!(decoded.best_score <= compute_likelihood(&model, &[3, 1, 3]).unwrap().likelihood);
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod model;
pub mod path;
pub mod presets;
pub mod problems;
pub mod report;
pub mod table;
pub mod traits;
pub mod utils;

pub use crate::builder::ModelBuilder;
pub use crate::engine::TrellisEngine;
pub use crate::error::{HmmError, Result};
pub use crate::model::{Model, Origin, StateId, Symbol};
pub use crate::problems::forward::{ForwardProblem, ForwardResult};
pub use crate::problems::viterbi::{ViterbiProblem, ViterbiResult};
pub use crate::table::{BackpointerTable, ForwardTable, Table, ViterbiTable};
pub use crate::traits::TrellisProblem;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Viterbi tables together with the reconstructed best path.
#[derive(Clone, Debug, PartialEq)]
pub struct ViterbiPath {
    pub table: ViterbiTable,
    pub backpointers: BackpointerTable,
    /// P*, the probability of `path`.
    pub best_score: f64,
    /// Most probable hidden-state sequence, one state per observation.
    pub path: Vec<StateId>,
}

/// Run the forward algorithm.
///
/// # Errors
/// [`HmmError::EmptySequence`] or [`HmmError::UnknownSymbol`].
pub fn compute_likelihood(model: &Model, observations: &[Symbol]) -> Result<ForwardResult> {
    let problem = ForwardProblem::new(model, observations)?;
    Ok(TrellisEngine::new(problem).run())
}

/// Run the Viterbi algorithm and reconstruct the best path.
///
/// # Errors
/// [`HmmError::EmptySequence`], [`HmmError::UnknownSymbol`], or
/// [`HmmError::InconsistentBackpointer`] on an internal invariant violation.
pub fn compute_viterbi_path(model: &Model, observations: &[Symbol]) -> Result<ViterbiPath> {
    let problem = ViterbiProblem::new(model, observations)?;
    let ViterbiResult {
        table,
        backpointers,
        best_score,
        best_terminal_state,
    } = TrellisEngine::new(problem).run();
    let path = path::reconstruct_path(&backpointers, best_terminal_state, observations.len())?;
    Ok(ViterbiPath {
        table,
        backpointers,
        best_score,
        path,
    })
}

/// Forward algorithm over many independent sequences, results in input order.
#[cfg(feature = "parallel")]
pub fn compute_likelihoods<S>(model: &Model, sequences: &[S]) -> Vec<Result<ForwardResult>>
where
    S: AsRef<[Symbol]> + Sync,
{
    sequences
        .par_iter()
        .map(|obs| compute_likelihood(model, obs.as_ref()))
        .collect()
}

/// Forward algorithm over many independent sequences, results in input order.
#[cfg(not(feature = "parallel"))]
pub fn compute_likelihoods<S>(model: &Model, sequences: &[S]) -> Vec<Result<ForwardResult>>
where
    S: AsRef<[Symbol]>,
{
    sequences
        .iter()
        .map(|obs| compute_likelihood(model, obs.as_ref()))
        .collect()
}

/// Viterbi decoding over many independent sequences, results in input order.
#[cfg(feature = "parallel")]
pub fn compute_viterbi_paths<S>(model: &Model, sequences: &[S]) -> Vec<Result<ViterbiPath>>
where
    S: AsRef<[Symbol]> + Sync,
{
    sequences
        .par_iter()
        .map(|obs| compute_viterbi_path(model, obs.as_ref()))
        .collect()
}

/// Viterbi decoding over many independent sequences, results in input order.
#[cfg(not(feature = "parallel"))]
pub fn compute_viterbi_paths<S>(model: &Model, sequences: &[S]) -> Vec<Result<ViterbiPath>>
where
    S: AsRef<[Symbol]>,
{
    sequences
        .iter()
        .map(|obs| compute_viterbi_path(model, obs.as_ref()))
        .collect()
}
