use crate::error::{HmmError, Result};
use crate::model::{Model, Symbol};

/// Label-keyed construction of a [`Model`].
///
/// Entries that are never set are zero; validation happens in [`build`].
///
/// [`build`]: ModelBuilder::build
#[derive(Debug, Default, Clone)]
pub struct ModelBuilder {
    states: Vec<String>,
    vocabulary: Vec<Symbol>,
    start: Vec<(String, f64)>,
    transition: Vec<(String, String, f64)>,
    emission: Vec<(String, Symbol, f64)>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn state(mut self, label: impl Into<String>) -> Self {
        self.states.push(label.into());
        self
    }
    pub fn symbol(mut self, symbol: Symbol) -> Self {
        self.vocabulary.push(symbol);
        self
    }
    pub fn symbols(mut self, symbols: impl IntoIterator<Item = Symbol>) -> Self {
        self.vocabulary.extend(symbols);
        self
    }
    pub fn start(mut self, to: impl Into<String>, p: f64) -> Self {
        self.start.push((to.into(), p));
        self
    }
    pub fn transition(mut self, from: impl Into<String>, to: impl Into<String>, p: f64) -> Self {
        self.transition.push((from.into(), to.into(), p));
        self
    }
    pub fn emission(mut self, state: impl Into<String>, symbol: Symbol, p: f64) -> Self {
        self.emission.push((state.into(), symbol, p));
        self
    }

    /// Resolve labels and validate.
    ///
    /// # Errors
    /// [`HmmError::UnknownState`] / [`HmmError::UnknownSymbol`] for entries
    /// naming undeclared labels, otherwise whatever [`Model::new`] reports.
    /// Setting the same entry twice keeps the last value.
    pub fn build(self) -> Result<Model> {
        let n = self.states.len();
        let v = self.vocabulary.len();
        let state = |label: &str| {
            self.states
                .iter()
                .position(|s| s == label)
                .ok_or_else(|| HmmError::UnknownState {
                    label: label.to_string(),
                })
        };
        let symbol = |sym: Symbol| {
            self.vocabulary
                .iter()
                .position(|&s| s == sym)
                .ok_or(HmmError::UnknownSymbol { symbol: sym })
        };

        let mut start = vec![0.0; n];
        for (to, p) in &self.start {
            start[state(to)?] = *p;
        }
        let mut transition = vec![vec![0.0; n]; n];
        for (from, to, p) in &self.transition {
            transition[state(from)?][state(to)?] = *p;
        }
        let mut emission = vec![vec![0.0; v]; n];
        for (s, sym, p) in &self.emission {
            emission[state(s)?][symbol(*sym)?] = *p;
        }

        Model::new(self.states, self.vocabulary, start, transition, emission)
    }
}
