//! Ready-made models.

use crate::error::Result;
use crate::model::Model;

/// The two-state HOT/COLD weather model over ice-cream counts `{1, 2, 3}`.
///
/// | from \ to | HOT | COLD |
/// |-----------|-----|------|
/// | START     | 0.8 | 0.2  |
/// | HOT       | 0.7 | 0.3  |
/// | COLD      | 0.4 | 0.6  |
///
/// | state | 1   | 2   | 3   |
/// |-------|-----|-----|-----|
/// | HOT   | 0.2 | 0.4 | 0.4 |
/// | COLD  | 0.5 | 0.4 | 0.1 |
pub fn hot_cold() -> Result<Model> {
    Model::new(
        vec!["HOT".to_string(), "COLD".to_string()],
        vec![1, 2, 3],
        vec![0.8, 0.2],
        vec![vec![0.7, 0.3], vec![0.4, 0.6]],
        vec![vec![0.2, 0.4, 0.4], vec![0.5, 0.4, 0.1]],
    )
}
