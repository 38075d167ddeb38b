//! Text input/output helpers for the command loop.
//!
//! Observations are typed as digit strings (`"3132"`); tables are rendered
//! tab-separated with one row per time step and one column per state.

use std::fmt::Write as _;

use crate::model::{Model, StateId, Symbol};
use crate::table::{BackpointerTable, Table};
use crate::{compute_likelihood, compute_viterbi_path, Result};

/// Decimal places used for every probability cell.
pub const PRECISION: usize = 15;

/// Map each non-whitespace character to its offset from `'0'`.
///
/// Non-digits are not rejected here: they map to values outside any
/// digit vocabulary and are reported by the engines as unknown symbols.
pub fn parse_observations(line: &str) -> Vec<Symbol> {
    line.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c as i32 - '0' as i32)
        .collect()
}

/// True for the exit keyword `q`, in either case.
pub fn is_quit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("q")
}

fn header(model: &Model) -> String {
    let mut out = String::from("obs");
    for label in model.states() {
        out.push('\t');
        out.push_str(label);
    }
    out.push('\n');
    out
}

/// Render a probability table.
pub fn format_probability_table(
    model: &Model,
    observations: &[Symbol],
    table: &Table<f64>,
) -> String {
    let mut out = header(model);
    for (symbol, column) in observations.iter().zip(table.columns()) {
        let _ = write!(out, "{symbol}");
        for p in column {
            let _ = write!(out, "\t{p:.PRECISION$}");
        }
        out.push('\n');
    }
    out
}

/// Render a backpointer table as predecessor labels, `-` where none exists.
pub fn format_backpointer_table(
    model: &Model,
    observations: &[Symbol],
    table: &BackpointerTable,
) -> String {
    let mut out = header(model);
    for (symbol, column) in observations.iter().zip(table.columns()) {
        let _ = write!(out, "{symbol}");
        for bp in column {
            match bp {
                Some(prev) => {
                    let _ = write!(out, "\t{}", model.label(*prev));
                }
                None => out.push_str("\t-"),
            }
        }
        out.push('\n');
    }
    out
}

/// Labels of a decoded path joined by spaces.
pub fn format_path(model: &Model, path: &[StateId]) -> String {
    model.labels(path).join(" ")
}

fn format_sequence(observations: &[Symbol]) -> String {
    observations
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Evaluate one observation sequence and render the full report.
///
/// # Errors
/// Whatever [`compute_likelihood`] or [`compute_viterbi_path`] report.
pub fn render_query(model: &Model, observations: &[Symbol]) -> Result<String> {
    let forward = compute_likelihood(model, observations)?;
    let viterbi = compute_viterbi_path(model, observations)?;
    let seq = format_sequence(observations);

    let mut out = String::new();
    let _ = writeln!(out, "\nForward probabilities for observations {seq}:");
    out.push_str(&format_probability_table(model, observations, &forward.table));
    let _ = writeln!(out, "P(O | model) = {:.PRECISION$}", forward.likelihood);

    let _ = writeln!(out, "\nViterbi probabilities for observations {seq}:");
    out.push_str(&format_probability_table(model, observations, &viterbi.table));

    let _ = writeln!(out, "\nBackpointers for observations {seq}:");
    out.push_str(&format_backpointer_table(
        model,
        observations,
        &viterbi.backpointers,
    ));

    let _ = writeln!(out, "P* = {:.PRECISION$}", viterbi.best_score);
    let _ = writeln!(
        out,
        "Most likely hidden states: {}",
        format_path(model, &viterbi.path)
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::hot_cold;
    use crate::HmmError;

    #[test]
    fn digits_map_to_values() {
        assert_eq!(parse_observations("312"), vec![3, 1, 2]);
        assert_eq!(parse_observations(" 3 1\t2\n"), vec![3, 1, 2]);
        assert_eq!(parse_observations(""), Vec::<Symbol>::new());
        assert_eq!(parse_observations("a"), vec![49]);
    }

    #[test]
    fn quit_keyword() {
        assert!(is_quit("q"));
        assert!(is_quit("Q\n"));
        assert!(!is_quit("quit"));
        assert!(!is_quit("31"));
    }

    #[test]
    fn table_rows_follow_observations() {
        let model = hot_cold().unwrap();
        let forward = compute_likelihood(&model, &[3]).unwrap();
        let text = format_probability_table(&model, &[3], &forward.table);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "obs\tHOT\tCOLD");
        assert_eq!(lines[1], "3\t0.320000000000000\t0.020000000000000");
    }

    #[test]
    fn backpointers_render_labels() {
        let model = hot_cold().unwrap();
        let v = compute_viterbi_path(&model, &[3, 1]).unwrap();
        let text = format_backpointer_table(&model, &[3, 1], &v.backpointers);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[1], "3\t-\t-");
        assert_eq!(lines[2], "1\tHOT\tHOT");
        assert_eq!(format_path(&model, &v.path), "HOT COLD");
    }

    #[test]
    fn query_report_mentions_results() {
        let model = hot_cold().unwrap();
        let text = render_query(&model, &[1]).unwrap();
        assert!(text.contains("P(O | model) = 0.260000000000000"));
        assert!(text.contains("P* = 0.160000000000000"));
        assert!(text.contains("Most likely hidden states: HOT"));
    }

    #[test]
    fn query_errors_propagate() {
        let model = hot_cold().unwrap();
        assert!(matches!(
            render_query(&model, &parse_observations("4")),
            Err(HmmError::UnknownSymbol { symbol: 4 })
        ));
        assert!(matches!(
            render_query(&model, &[]),
            Err(HmmError::EmptySequence)
        ));
    }
}
