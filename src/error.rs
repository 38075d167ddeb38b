//! Error taxonomy shared by model construction, the engines and the CLI.

use thiserror::Error;

use crate::model::{StateId, Symbol};

/// Every failure the crate can report.
#[derive(Debug, Error)]
pub enum HmmError {
    /// A transition or emission row is malformed or does not sum to one.
    #[error("invalid model: {reason}")]
    InvalidModel { reason: String },

    /// An observation is not part of the model's vocabulary.
    #[error("unknown observation symbol {symbol}")]
    UnknownSymbol { symbol: Symbol },

    /// A builder call named a state that was never declared.
    #[error("unknown state label {label:?}")]
    UnknownState { label: String },

    /// The observation sequence has length zero.
    #[error("observation sequence is empty")]
    EmptySequence,

    /// Path reconstruction hit a missing backpointer. Never expected from a
    /// table produced by the Viterbi engine.
    #[error("inconsistent backpointer table: no predecessor for state {state} at t = {t}")]
    InconsistentBackpointer { state: StateId, t: usize },

    /// Malformed command-line input.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Transcript file failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HmmError {
    pub(crate) fn invalid_model(reason: impl Into<String>) -> Self {
        HmmError::InvalidModel {
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HmmError>;
