//! Integration tests for the evaluation pipeline
//!
//! These tests verify the alignment invariants end to end and the
//! full decode -> normalize -> fold -> score path a corpus driver
//! takes.

use asr_metrics::{
    CorpusEvaluator, EditOp, FoldingTable, Glm, Sentinels, Vocabulary, align, compute_wer,
    edit_distance,
};

fn toks(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_string).collect()
}

// ============ Alignment Invariant Tests ============

#[test]
fn test_self_alignment_is_all_matches() {
    for text in ["", "a", "a b", "the quick brown fox jumps over the lazy dog"] {
        let reference = toks(text);
        let result = align(&reference, &reference);

        assert_eq!(result.cost, 0);
        assert!(result.steps.iter().all(|s| s.op == EditOp::Match));
    }
}

#[test]
fn test_empty_reference_is_all_insertions() {
    let hypothesis = toks("w x y z");
    let result = align(&[], &hypothesis);

    assert_eq!(result.cost, hypothesis.len());
    assert!(result.steps.iter().all(|s| s.op == EditOp::Insertion));
}

#[test]
fn test_empty_hypothesis_is_all_deletions() {
    let reference = toks("w x y z");
    let result = align(&reference, &[]);

    assert_eq!(result.cost, reference.len());
    assert!(result.steps.iter().all(|s| s.op == EditOp::Deletion));
}

#[test]
fn test_cost_symmetric_under_swap_counts_exchange() {
    let pairs = [
        ("the cat sat on the mat", "the cat sat"),
        ("a b c d e", "b c x e f"),
        ("", "x y"),
        ("sil hh ah l ow sil", "sil hh ax l ow"),
    ];
    for (r, h) in pairs {
        let reference = toks(r);
        let hypothesis = toks(h);
        let fwd = align(&reference, &hypothesis);
        let rev = align(&hypothesis, &reference);

        assert_eq!(fwd.cost, rev.cost, "cost changed under swap for {r:?}/{h:?}");
        assert_eq!(fwd.insertions, rev.deletions);
        assert_eq!(fwd.deletions, rev.insertions);
    }
}

#[test]
fn test_count_identities_hold_across_inputs() {
    let pairs = [
        ("a b c", "a x c"),
        ("a b c", "a b"),
        ("a b", "a b c"),
        ("", ""),
        ("m n o p q", "q p o n m"),
    ];
    for (r, h) in pairs {
        let reference = toks(r);
        let hypothesis = toks(h);
        let result = align(&reference, &hypothesis);

        assert_eq!(
            result.matches + result.substitutions + result.deletions,
            reference.len()
        );
        assert_eq!(
            result.matches + result.substitutions + result.insertions,
            hypothesis.len()
        );
        assert_eq!(
            result.cost,
            result.substitutions + result.insertions + result.deletions
        );
        assert!(result.cost <= reference.len() + hypothesis.len());
        assert_eq!(edit_distance(&reference, &hypothesis), result.cost);
    }
}

// ============ Literal Scenario Tests ============

#[test]
fn test_scenario_substitution_in_the_middle() {
    let result = align(&toks("a b c"), &toks("a x c"));

    assert_eq!(result.cost, 1);
    assert_eq!(result.edit_vector(), "MSM");
    assert_eq!(result.error_rate(true, None), 1.0 / 3.0);
}

#[test]
fn test_scenario_deletion_at_the_end() {
    let result = align(&toks("a b c"), &toks("a b"));

    assert_eq!(result.cost, 1);
    assert_eq!(result.deletions, 1);
    assert_eq!(result.error_rate(true, None), 1.0 / 3.0);
}

#[test]
fn test_scenario_insertion_at_the_end() {
    let result = align(&toks("a b"), &toks("a b c"));

    assert_eq!(result.cost, 1);
    assert_eq!(result.insertions, 1);
    assert_eq!(result.error_rate(true, None), 0.5);
}

#[test]
fn test_scenario_both_empty_no_fault() {
    let result = align::<String>(&[], &[]);

    assert_eq!(result.cost, 0);
    assert_eq!(result.error_rate(true, None), 0.0);
}

#[test]
fn test_scenario_folding_reconciles_fine_sequences() {
    let table = FoldingTable::from_pairs([("ah", "a"), ("ax", "a")]);
    let fine_ref = toks("ah");
    let fine_hyp = toks("ax");

    // Cost > 0 before folding, 0 after
    assert_eq!(align(&fine_ref, &fine_hyp).cost, 1);

    let folded_ref = table.fold(&fine_ref);
    let folded_hyp = table.fold(&fine_hyp);
    assert_eq!(align(&folded_ref, &folded_hyp).cost, 0);
}

// ============ Pipeline Tests ============

#[test]
fn test_decode_fold_score_pipeline() {
    // CTC-style phone vocabulary with blank at index 0
    let vocab = Vocabulary::from_tokens(["<blank>", "sil", "aa", "ao", "ix", "ih", "q"]);
    let sentinels = Sentinels {
        blank: Some(0),
        ..Default::default()
    };
    let table = FoldingTable::from_pairs([("ao", "aa"), ("ix", "ih"), ("q", "nan")]);

    // Reference: sil aa ih   Hypothesis (raw CTC): sil ao q ix + blanks
    let reference = vocab.decode_trimmed(&[1, 2, 5], sentinels).unwrap();
    let hypothesis = vocab.decode_trimmed(&[0, 1, 3, 6, 0, 4], sentinels).unwrap();

    let evaluator = CorpusEvaluator::new().with_folding(table);
    let rate = evaluator.utterance_rate(&reference, &hypothesis);

    // After folding both fold to "sil aa ih"
    assert_eq!(rate, 0.0);
}

#[test]
fn test_glm_then_score_matches_expanded_hypothesis() {
    let glm = Glm::from_pairs([("gonna", "going to"), ("kinda", "kind of")]);
    let evaluator = CorpusEvaluator::new().with_glm(glm);

    let reference = toks("it's kinda late i'm gonna leave");
    let hypothesis = toks("it's kind of late i'm going to leave");

    assert_eq!(evaluator.utterance_rate(&reference, &hypothesis), 0.0);
}

#[test]
fn test_corpus_average_over_mixed_utterances() {
    let evaluator = CorpusEvaluator::new();
    let r1 = toks("hello world");
    let h1 = toks("hello word"); // 1 sub / 2 -> 0.5
    let r2 = toks("good morning everyone");
    let h2 = toks("good morning everyone"); // 0.0
    let r3 = toks("see you soon");
    let h3 = toks("see soon"); // 1 del / 3

    let mean = evaluator.evaluate([
        (r1.as_slice(), h1.as_slice()),
        (r2.as_slice(), h2.as_slice()),
        (r3.as_slice(), h3.as_slice()),
    ]);

    let expected = (0.5 + 0.0 + 1.0 / 3.0) / 3.0;
    assert!((mean - expected).abs() < 1e-12);
}

#[test]
fn test_normalization_override_against_folded_reference() {
    // Folding shortens the reference; normalizing against the folded
    // length changes the rate the caller reports.
    let table = FoldingTable::from_pairs([("q", "nan"), ("ax", "ah")]);
    let reference = table.fold(&toks("ax q t")); // "ah t", length 2
    let hypothesis = toks("ah");

    let result = align(&reference, &hypothesis);
    assert_eq!(result.cost, 1);
    assert_eq!(result.error_rate(true, None), 0.5);
    // Caller normalizing against the raw (unfolded) length instead
    assert_eq!(result.error_rate(true, Some(3)), 1.0 / 3.0);
}

#[test]
fn test_compute_wer_against_known_transcript() {
    let reference = toks("the quick brown fox jumps over the lazy dog");
    let hypothesis = toks("the quick brown box jumps over lazy dog");

    // 1 substitution (fox -> box) + 1 deletion (the), reference len 9
    assert!((compute_wer(&reference, &hypothesis, true) - 2.0 / 9.0).abs() < 1e-12);
}
