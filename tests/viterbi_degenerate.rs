use trellis_hmm::{compute_likelihood, compute_viterbi_path, Model};

fn make_sym_model() -> Model {
    Model::new(
        vec!["A".into(), "B".into()],
        vec![0, 1],
        vec![0.5, 0.5],
        vec![vec![0.5, 0.5], vec![0.5, 0.5]],
        vec![vec![0.6, 0.4], vec![0.4, 0.6]],
    )
    .unwrap()
}

#[test]
fn zero_probabilities_are_respected() {
    let model = Model::new(
        vec!["A".into(), "B".into()],
        vec![0, 1],
        vec![1.0, 0.0], // only A possible initially
        vec![
            vec![1.0, 0.0], // B unreachable
            vec![0.0, 1.0],
        ],
        vec![
            vec![1.0, 0.0], // A can emit only symbol 0
            vec![0.5, 0.5],
        ],
    )
    .unwrap();
    let obs = [0, 0, 0];
    let decoded = compute_viterbi_path(&model, &obs).unwrap();
    assert_eq!(decoded.best_score, 1.0);
    assert_eq!(decoded.path, vec![0, 0, 0]);
    for t in 0..obs.len() {
        assert_eq!(decoded.table.get(1, t), 0.0);
    }
}

#[test]
fn impossible_sequence_yields_zero_not_error() {
    let model = Model::new(
        vec!["A".into(), "B".into()],
        vec![0, 1],
        vec![1.0, 0.0],
        vec![vec![1.0, 0.0], vec![0.0, 1.0]],
        vec![vec![1.0, 0.0], vec![0.5, 0.5]],
    )
    .unwrap();
    // A never emits 1 and B is unreachable.
    let fwd = compute_likelihood(&model, &[0, 1]).unwrap();
    assert_eq!(fwd.likelihood, 0.0);
    let decoded = compute_viterbi_path(&model, &[0, 1]).unwrap();
    assert_eq!(decoded.best_score, 0.0);
    // All-zero candidates resolve to the first state everywhere.
    assert_eq!(decoded.path, vec![0, 0]);
    assert_eq!(decoded.backpointers.get(0, 1), Some(0));
    assert_eq!(decoded.backpointers.get(1, 1), Some(0));
}

#[test]
fn long_sequences_underflow_to_zero() {
    let model = make_sym_model();
    let obs: Vec<_> = (0..2_000).map(|t| t % 2).collect();
    let fwd = compute_likelihood(&model, &obs).unwrap();
    assert_eq!(fwd.likelihood, 0.0);
    assert!(fwd.table.get(0, 10) > 0.0);
    let decoded = compute_viterbi_path(&model, &obs).unwrap();
    assert_eq!(decoded.path.len(), obs.len());
    assert_eq!(decoded.best_score, 0.0);
}

#[test]
fn ties_are_deterministic() {
    let model = make_sym_model();
    let obs = [0, 1, 0, 1];
    let first = compute_viterbi_path(&model, &obs).unwrap();
    let second = compute_viterbi_path(&model, &obs).unwrap();
    assert_eq!(first, second);
    for (a, b) in first.table.columns().zip(second.table.columns()) {
        for (x, y) in a.iter().zip(b) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }
}

#[test]
fn exact_ties_choose_earliest_predecessor() {
    // Identical transition rows: A and B tie as predecessors of every state.
    let model = Model::new(
        vec!["A".into(), "B".into(), "C".into()],
        vec![0],
        vec![0.5, 0.5, 0.0],
        vec![vec![0.5, 0.25, 0.25]; 3],
        vec![vec![1.0]; 3],
    )
    .unwrap();
    let decoded = compute_viterbi_path(&model, &[0, 0]).unwrap();
    for s in 0..3 {
        assert_eq!(decoded.backpointers.get(s, 1), Some(0));
    }
    // t=1: A=0.25, B=C=0.125
    assert_eq!(decoded.best_score, 0.25);
    assert_eq!(decoded.path, vec![0, 0]);

    // A dominant later state wins regardless of position.
    let model = Model::new(
        vec!["A".into(), "B".into(), "C".into()],
        vec![0],
        vec![0.25, 0.5, 0.25],
        vec![vec![0.5, 0.25, 0.25]; 3],
        vec![vec![1.0]; 3],
    )
    .unwrap();
    let decoded = compute_viterbi_path(&model, &[0, 0]).unwrap();
    for s in 0..3 {
        assert_eq!(decoded.backpointers.get(s, 1), Some(1));
    }
    assert_eq!(decoded.path, vec![1, 0]);
}

#[test]
fn short_sequences_with_ties() {
    let model = make_sym_model();
    let decoded = compute_viterbi_path(&model, &[1]).unwrap();
    assert_eq!(decoded.path, vec![1]);
    let decoded = compute_viterbi_path(&model, &[0]).unwrap();
    assert_eq!(decoded.path, vec![0]);
}
