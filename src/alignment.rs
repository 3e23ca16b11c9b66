//! Minimum-edit-distance alignment between token sequences
//!
//! This module implements the alignment primitive behind every error
//! rate the crate reports: classic dynamic-programming edit distance
//! with unit costs, a full backtrace, and a fixed tie-break order so
//! that substitution/insertion/deletion classifications are
//! reproducible across runs and callers.

use serde::{Deserialize, Serialize};

/// Edit operation labels attached to each alignment position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditOp {
    /// M - reference and hypothesis tokens are identical
    Match,
    /// S - tokens differ, aligned one-to-one
    Substitution,
    /// I - hypothesis token with no reference counterpart
    Insertion,
    /// D - reference token missing from the hypothesis
    Deletion,
}

impl EditOp {
    /// Convert to single-character representation for edit vectors
    pub fn as_char(&self) -> char {
        match self {
            Self::Match => 'M',
            Self::Substitution => 'S',
            Self::Insertion => 'I',
            Self::Deletion => 'D',
        }
    }

    /// Parse from single character
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'M' => Some(Self::Match),
            'S' => Some(Self::Substitution),
            'I' => Some(Self::Insertion),
            'D' => Some(Self::Deletion),
            _ => None,
        }
    }
}

/// A single step in the alignment path
///
/// Tokens are carried per step rather than as raw indices because
/// insertions and deletions shift reference and hypothesis positions
/// independently. `reference` is `None` for insertions, `hypothesis`
/// is `None` for deletions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentStep<T> {
    pub op: EditOp,
    pub reference: Option<T>,
    pub hypothesis: Option<T>,
}

/// Result of aligning one (reference, hypothesis) pair
///
/// Immutable once produced; each call to [`align`] builds a fresh one,
/// so results can be shared across threads freely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentResult<T> {
    /// Total edit cost: substitutions + insertions + deletions
    pub cost: usize,
    pub matches: usize,
    pub substitutions: usize,
    pub insertions: usize,
    pub deletions: usize,
    /// Full alignment path in left-to-right order
    pub steps: Vec<AlignmentStep<T>>,
    /// Length of the reference sequence this result was built from
    pub reference_len: usize,
    /// Length of the hypothesis sequence this result was built from
    pub hypothesis_len: usize,
}

impl<T> AlignmentResult<T> {
    /// Derive the normalized error rate from this alignment.
    ///
    /// With `normalize` set, divides the edit cost by
    /// `max(1, reference length)` so a zero-length reference never
    /// faults: an empty hypothesis against an empty reference yields
    /// 0.0, while an entirely-inserted hypothesis yields a finite
    /// rate equal to its insertion count. `reference_length_override`
    /// substitutes a different denominator, for callers normalizing
    /// against a remapped reference whose length differs from the raw
    /// one. With `normalize` unset, returns the raw edit cost.
    pub fn error_rate(&self, normalize: bool, reference_length_override: Option<usize>) -> f64 {
        let errors = (self.substitutions + self.insertions + self.deletions) as f64;
        if !normalize {
            return errors;
        }
        let base = reference_length_override.unwrap_or(self.reference_len);
        errors / base.max(1) as f64
    }

    /// Edit vector string, one of M/S/I/D per alignment step (e.g. "MMSID")
    pub fn edit_vector(&self) -> String {
        self.steps.iter().map(|s| s.op.as_char()).collect()
    }
}

impl<T: Serialize> AlignmentResult<T> {
    /// Serialize the full result to JSON
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Build the unit-cost edit distance table of size (m+1) x (n+1)
///
/// cell (i, j) holds the minimum edit cost between the first i
/// reference tokens and the first j hypothesis tokens.
fn cost_matrix<T: Eq>(reference: &[T], hypothesis: &[T]) -> Vec<Vec<usize>> {
    let m = reference.len();
    let n = hypothesis.len();

    let mut matrix = vec![vec![0usize; n + 1]; m + 1];

    // First column: i deletions to reach an empty hypothesis
    for (i, row) in matrix.iter_mut().enumerate().take(m + 1) {
        row[0] = i;
    }
    // First row: j insertions from an empty reference
    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            matrix[i][j] = if reference[i - 1] == hypothesis[j - 1] {
                matrix[i - 1][j - 1]
            } else {
                let substitution = matrix[i - 1][j - 1] + 1;
                let deletion = matrix[i - 1][j] + 1;
                let insertion = matrix[i][j - 1] + 1;
                substitution.min(deletion).min(insertion)
            };
        }
    }

    matrix
}

/// Align a hypothesis sequence against a reference sequence.
///
/// Computes the minimum-cost alignment under unit cost for
/// substitution, insertion, and deletion. Works over any
/// equality-comparable token type; both sequences may be empty.
///
/// When several predecessors reach a cell at equal minimal cost, the
/// backtrace prefers the diagonal (match/substitution) over deletion
/// over insertion, in that fixed order. The order is part of the
/// contract: it decides whether a position is reported as one
/// substitution or as an insertion+deletion pair, and downstream
/// per-operation counts depend on it.
pub fn align<T: Eq + Clone>(reference: &[T], hypothesis: &[T]) -> AlignmentResult<T> {
    let m = reference.len();
    let n = hypothesis.len();

    let matrix = cost_matrix(reference, hypothesis);

    let mut steps = Vec::with_capacity(m.max(n));
    let mut i = m;
    let mut j = n;

    while i > 0 || j > 0 {
        if i > 0 && j > 0 && reference[i - 1] == hypothesis[j - 1] {
            steps.push(AlignmentStep {
                op: EditOp::Match,
                reference: Some(reference[i - 1].clone()),
                hypothesis: Some(hypothesis[j - 1].clone()),
            });
            i -= 1;
            j -= 1;
        } else if i > 0 && j > 0 && matrix[i][j] == matrix[i - 1][j - 1] + 1 {
            steps.push(AlignmentStep {
                op: EditOp::Substitution,
                reference: Some(reference[i - 1].clone()),
                hypothesis: Some(hypothesis[j - 1].clone()),
            });
            i -= 1;
            j -= 1;
        } else if i > 0 && matrix[i][j] == matrix[i - 1][j] + 1 {
            steps.push(AlignmentStep {
                op: EditOp::Deletion,
                reference: Some(reference[i - 1].clone()),
                hypothesis: None,
            });
            i -= 1;
        } else {
            steps.push(AlignmentStep {
                op: EditOp::Insertion,
                reference: None,
                hypothesis: Some(hypothesis[j - 1].clone()),
            });
            j -= 1;
        }
    }

    steps.reverse();

    let mut matches = 0;
    let mut substitutions = 0;
    let mut insertions = 0;
    let mut deletions = 0;
    for step in &steps {
        match step.op {
            EditOp::Match => matches += 1,
            EditOp::Substitution => substitutions += 1,
            EditOp::Insertion => insertions += 1,
            EditOp::Deletion => deletions += 1,
        }
    }

    AlignmentResult {
        cost: matrix[m][n],
        matches,
        substitutions,
        insertions,
        deletions,
        steps,
        reference_len: m,
        hypothesis_len: n,
    }
}

/// Edit distance only, using two rolling rows instead of the full table.
///
/// Useful when a caller needs the cost but not the backtrace; agrees
/// with [`align`]`(..).cost` by construction.
pub fn edit_distance<T: Eq>(reference: &[T], hypothesis: &[T]) -> usize {
    if hypothesis.is_empty() {
        return reference.len();
    }

    let mut prev: Vec<usize> = (0..=hypothesis.len()).collect();
    let mut curr = vec![0usize; hypothesis.len() + 1];

    for i in 1..=reference.len() {
        curr[0] = i;
        for j in 1..=hypothesis.len() {
            curr[j] = if reference[i - 1] == hypothesis[j - 1] {
                prev[j - 1]
            } else {
                1 + prev[j - 1].min(prev[j]).min(curr[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[hypothesis.len()]
}
