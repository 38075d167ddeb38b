//! HMM recurrences implemented on top of the trellis engine.
//!
//! - [`forward`] : sum-product recurrence, total sequence likelihood.
//! - [`viterbi`] : max-product recurrence with backpointers.

pub mod forward;
pub mod viterbi;
