//! Corpus-level evaluation drivers
//!
//! Thin callers over [`align`]: per-utterance word and phone error
//! rates, and a [`CorpusEvaluator`] that layers the optional
//! pre-processing passes (GLM normalization, phone folding) on top of
//! the shared alignment primitive and averages across a corpus.

use tracing::debug;

use crate::alignment::align;
use crate::folding::FoldingTable;
use crate::glm::Glm;

/// Word error rate for one utterance.
///
/// With `normalize` set, the edit cost is divided by the reference
/// length (`max(1, len)`); otherwise the raw cost is returned.
pub fn compute_wer(reference: &[String], hypothesis: &[String], normalize: bool) -> f64 {
    align(reference, hypothesis).error_rate(normalize, None)
}

/// Phone error rate for one utterance.
///
/// Alignment behavior is identical to [`compute_wer`]; the separate
/// entry point exists because corpus drivers layer different decoding
/// and folding policies on top of the two metrics.
pub fn compute_per(reference: &[String], hypothesis: &[String], normalize: bool) -> f64 {
    align(reference, hypothesis).error_rate(normalize, None)
}

/// Format an error rate the conventional way, as a percentage
pub fn display_percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

/// Evaluation driver for a corpus of (reference, hypothesis) pairs
///
/// Holds the pre-processing policy for one evaluation pass: an
/// optional GLM table applied to the reference side, an optional
/// folding table applied to both sides, and the normalization flag.
/// The driver owns no per-call state beyond that policy, so one
/// evaluator can score independent utterances from multiple threads.
#[derive(Debug, Clone)]
pub struct CorpusEvaluator {
    folding: Option<FoldingTable>,
    glm: Option<Glm>,
    normalize: bool,
}

impl Default for CorpusEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusEvaluator {
    /// New evaluator with normalized rates and no pre-processing
    pub fn new() -> Self {
        Self {
            folding: None,
            glm: None,
            normalize: true,
        }
    }

    /// Fold both sequences through a label mapping before alignment
    pub fn with_folding(mut self, table: FoldingTable) -> Self {
        self.folding = Some(table);
        self
    }

    /// Rewrite reference transcripts through a GLM table
    pub fn with_glm(mut self, glm: Glm) -> Self {
        self.glm = Some(glm);
        self
    }

    /// Report raw edit costs instead of normalized rates
    pub fn unnormalized(mut self) -> Self {
        self.normalize = false;
        self
    }

    /// Error rate for a single utterance under this evaluator's policy
    pub fn utterance_rate(&self, reference: &[String], hypothesis: &[String]) -> f64 {
        let reference = match &self.glm {
            Some(glm) => glm.apply(reference),
            None => reference.to_vec(),
        };
        let (reference, hypothesis) = match &self.folding {
            Some(table) => (table.fold(&reference), table.fold(hypothesis)),
            None => (reference, hypothesis.to_vec()),
        };
        align(&reference, &hypothesis).error_rate(self.normalize, None)
    }

    /// Score a whole corpus and return the unweighted mean rate.
    ///
    /// An empty corpus reports 0.0 rather than a division fault,
    /// mirroring the engine's zero-length reference policy.
    pub fn evaluate<'a, I>(&self, pairs: I) -> f64
    where
        I: IntoIterator<Item = (&'a [String], &'a [String])>,
    {
        let mut total = 0.0;
        let mut count = 0usize;
        for (reference, hypothesis) in pairs {
            let rate = self.utterance_rate(reference, hypothesis);
            debug!(utterance = count, rate, "scored utterance");
            total += rate;
            count += 1;
        }
        if count == 0 {
            return 0.0;
        }
        total / count as f64
    }
}
