//! ASR Metrics - Word and phone error rate evaluation
//!
//! Edit-distance alignment between reference and hypothesis token
//! sequences with a full backtrace and deterministic tie-breaking,
//! plus the evaluation plumbing around it: vocabulary decoding with
//! sentinel trimming, phone-set folding, GLM lexical normalization,
//! and corpus-level error rate aggregation.

pub mod alignment;
pub mod error;
pub mod eval;
pub mod folding;
pub mod glm;
pub mod vocab;

pub use error::{Error, Result};

/// Re-export the main components for convenience
pub use alignment::{AlignmentResult, AlignmentStep, EditOp, align, edit_distance};
pub use eval::{CorpusEvaluator, compute_per, compute_wer, display_percent};
pub use folding::FoldingTable;
pub use glm::Glm;
pub use vocab::{Sentinels, Vocabulary};
