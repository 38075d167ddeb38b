//! Immutable discrete HMM parameters.
//!
//! A [`Model`] owns the ordered hidden-state set, the observation vocabulary,
//! the transition rows (one per state plus the virtual START origin) and the
//! emission rows. It is validated once at construction and never mutated, so
//! one instance can serve any number of queries, including concurrent ones.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{HmmError, Result};
use crate::utils::{ordered_sum, sums_to_one, ROW_SUM_TOLERANCE};

/// Index of a hidden state in the model's state order.
pub type StateId = usize;

/// An observation value. Symbols are labels, not indices into the vocabulary.
pub type Symbol = i32;

/// Source of a transition: a real state or the virtual START.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    Start,
    State(StateId),
}

/// Hidden Markov Model with discrete states and emissions.
#[derive(Clone, Debug)]
pub struct Model {
    states: Vec<String>,
    vocabulary: Vec<Symbol>,
    symbol_index: HashMap<Symbol, usize>,
    /// P(state_j | START) [j]
    start: Vec<f64>,
    /// P(state_j | state_i), row-major [i * n + j]
    transition: Vec<f64>,
    /// P(symbol_k | state_j), row-major [j * v + k]
    emission: Vec<f64>,
}

impl Model {
    /// Build a model from dense rows.
    ///
    /// `transition[i][j]` is the probability of moving from state `i` to
    /// state `j`, `emission[j][k]` the probability that state `j` emits
    /// `vocabulary[k]`.
    ///
    /// # Errors
    /// [`HmmError::InvalidModel`] if the state set or vocabulary is empty or
    /// contains duplicates, a row has the wrong length, an entry is not a
    /// probability, or a row does not sum to one within 1e-9.
    pub fn new(
        states: Vec<String>,
        vocabulary: Vec<Symbol>,
        start: Vec<f64>,
        transition: Vec<Vec<f64>>,
        emission: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let n = states.len();
        let v = vocabulary.len();
        if n == 0 {
            return Err(HmmError::invalid_model("model has no hidden states"));
        }
        if v == 0 {
            return Err(HmmError::invalid_model("model has an empty vocabulary"));
        }
        for (i, label) in states.iter().enumerate() {
            if states[..i].contains(label) {
                return Err(HmmError::invalid_model(format!(
                    "duplicate state label {label:?}"
                )));
            }
        }
        let mut symbol_index = HashMap::with_capacity(v);
        for (k, &symbol) in vocabulary.iter().enumerate() {
            if symbol_index.insert(symbol, k).is_some() {
                return Err(HmmError::invalid_model(format!(
                    "duplicate vocabulary symbol {symbol}"
                )));
            }
        }

        check_row("START", &start, n)?;
        if transition.len() != n {
            return Err(HmmError::invalid_model(format!(
                "transition matrix has {} rows, expected {n}",
                transition.len()
            )));
        }
        if emission.len() != n {
            return Err(HmmError::invalid_model(format!(
                "emission matrix has {} rows, expected {n}",
                emission.len()
            )));
        }
        for (label, row) in states.iter().zip(&transition) {
            check_row(&format!("transition {label}"), row, n)?;
        }
        for (label, row) in states.iter().zip(&emission) {
            check_row(&format!("emission {label}"), row, v)?;
        }

        debug!(n_states = n, n_symbols = v, "model validated");

        Ok(Self {
            states,
            vocabulary,
            symbol_index,
            start,
            transition: transition.into_iter().flatten().collect(),
            emission: emission.into_iter().flatten().collect(),
        })
    }

    /// State labels in iteration (tie-break) order.
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Vocabulary in declaration order.
    pub fn vocabulary(&self) -> &[Symbol] {
        &self.vocabulary
    }

    /// Number of hidden states N.
    #[inline]
    pub fn n_states(&self) -> usize {
        self.states.len()
    }

    /// Number of observable symbols V.
    #[inline]
    pub fn n_symbols(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn state_index(&self, label: &str) -> Option<StateId> {
        self.states.iter().position(|s| s == label)
    }

    pub fn symbol_index(&self, symbol: Symbol) -> Option<usize> {
        self.symbol_index.get(&symbol).copied()
    }

    /// Label of a state.
    ///
    /// # Panics
    /// Panics if `state >= n_states()`.
    pub fn label(&self, state: StateId) -> &str {
        &self.states[state]
    }

    /// Map a decoded path to its state labels.
    pub fn labels(&self, path: &[StateId]) -> Vec<&str> {
        path.iter().map(|&s| self.label(s)).collect()
    }

    /// Transition probability from `origin` to `destination`.
    ///
    /// # Panics
    /// Panics if either state index is out of range.
    #[inline]
    pub fn transition(&self, origin: Origin, destination: StateId) -> f64 {
        match origin {
            Origin::Start => self.start[destination],
            Origin::State(i) => self.transition_at(i, destination),
        }
    }

    /// Emission probability of `symbol` from `state`.
    ///
    /// # Errors
    /// [`HmmError::UnknownSymbol`] if `symbol` is not in the vocabulary.
    ///
    /// # Panics
    /// Panics if `state >= n_states()`.
    pub fn emission(&self, state: StateId, symbol: Symbol) -> Result<f64> {
        let k = self
            .symbol_index(symbol)
            .ok_or(HmmError::UnknownSymbol { symbol })?;
        Ok(self.emission_at(state, k))
    }

    /// Translate observations into vocabulary indices.
    ///
    /// This is the single validation point for a query: everything past it
    /// works on indices that are known to be in range.
    pub fn encode(&self, observations: &[Symbol]) -> Result<Vec<usize>> {
        if observations.is_empty() {
            return Err(HmmError::EmptySequence);
        }
        observations
            .iter()
            .enumerate()
            .map(|(t, &symbol)| {
                self.symbol_index(symbol).ok_or_else(|| {
                    debug!(t, symbol, "observation outside vocabulary");
                    HmmError::UnknownSymbol { symbol }
                })
            })
            .collect()
    }

    #[inline]
    pub(crate) fn start_at(&self, j: StateId) -> f64 {
        self.start[j]
    }

    #[inline]
    pub(crate) fn transition_at(&self, i: StateId, j: StateId) -> f64 {
        self.transition[i * self.n_states() + j]
    }

    #[inline]
    pub(crate) fn emission_at(&self, j: StateId, k: usize) -> f64 {
        self.emission[j * self.n_symbols() + k]
    }
}

fn check_row(name: &str, row: &[f64], expected_len: usize) -> Result<()> {
    if row.len() != expected_len {
        return Err(HmmError::invalid_model(format!(
            "{name} row has {} entries, expected {expected_len}",
            row.len()
        )));
    }
    if let Some(p) = row.iter().find(|p| !(0.0..=1.0).contains(*p)) {
        return Err(HmmError::invalid_model(format!(
            "{name} row contains {p}, which is not a probability"
        )));
    }
    if !sums_to_one(row) {
        return Err(HmmError::invalid_model(format!(
            "{name} row sums to {}, expected 1 within {ROW_SUM_TOLERANCE:e}",
            ordered_sum(row)
        )));
    }
    Ok(())
}
