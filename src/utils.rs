//! Small numeric helpers shared by the model and the recurrences.

/// Tolerance used when checking that a probability row sums to one.
pub const ROW_SUM_TOLERANCE: f64 = 1e-9;

/// Sum a row in index order.
///
/// Summation order is fixed so that validation and likelihood termination
/// produce the same bits on every run.
#[inline]
pub fn ordered_sum(row: &[f64]) -> f64 {
    let mut total = 0.0;
    for &value in row {
        total += value;
    }
    total
}

/// True if `row` sums to one within [`ROW_SUM_TOLERANCE`].
#[inline]
pub fn sums_to_one(row: &[f64]) -> bool {
    (ordered_sum(row) - 1.0).abs() <= ROW_SUM_TOLERANCE
}

/// Index and value of the maximum score, first maximum wins.
///
/// The running maximum is seeded with the first candidate and only replaced
/// on a strictly greater score, so a run of equal scores (including all
/// zeros) resolves to the earliest index. Returns `None` for an empty input.
pub fn first_argmax<I>(scores: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = f64>,
{
    let mut scores = scores.into_iter().enumerate();
    let (mut best_idx, mut best) = scores.next()?;
    for (idx, score) in scores {
        if score > best {
            best = score;
            best_idx = idx;
        }
    }
    Some((best_idx, best))
}
