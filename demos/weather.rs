//! Example: likelihood and best path for the HOT/COLD weather model.
//!
//! Run with:
//! `cargo run --example weather`

use trellis_hmm::{compute_likelihood, compute_viterbi_path, report, ModelBuilder};

fn main() -> trellis_hmm::Result<()> {
    // Same parameters as `presets::hot_cold`, spelled out by label.
    let model = ModelBuilder::new()
        .state("HOT")
        .state("COLD")
        .symbols([1, 2, 3])
        .start("HOT", 0.8)
        .start("COLD", 0.2)
        .transition("HOT", "HOT", 0.7)
        .transition("HOT", "COLD", 0.3)
        .transition("COLD", "HOT", 0.4)
        .transition("COLD", "COLD", 0.6)
        .emission("HOT", 1, 0.2)
        .emission("HOT", 2, 0.4)
        .emission("HOT", 3, 0.4)
        .emission("COLD", 1, 0.5)
        .emission("COLD", 2, 0.4)
        .emission("COLD", 3, 0.1)
        .build()?;

    // Ice creams eaten on three consecutive days.
    let obs = [3, 1, 3];

    let forward = compute_likelihood(&model, &obs)?;
    let decoded = compute_viterbi_path(&model, &obs)?;

    println!("P(O | model) = {}", forward.likelihood);
    println!("P*           = {}", decoded.best_score);
    println!("Best path    = {}", report::format_path(&model, &decoded.path));
    println!();
    print!(
        "{}",
        report::format_probability_table(&model, &obs, &decoded.table)
    );
    Ok(())
}
