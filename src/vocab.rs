//! Vocabulary files and index-to-token decoding
//!
//! Models emit integer label indices; scoring happens on symbols. A
//! [`Vocabulary`] is the ordered symbol table from a vocab file (one
//! token per line, index = line number) and turns index sequences back
//! into token sequences, trimming sentinel markers on the way so the
//! alignment engine never sees them.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::{Error, Result};

/// Ordered symbol table mapping label indices to tokens
#[derive(Debug, Clone)]
pub struct Vocabulary {
    tokens: Vec<String>,
}

/// Sentinel indices to strip while decoding
///
/// `blank` is the CTC blank, skipped wherever it appears. `sos` is
/// skipped as well; `eos` truncates the sequence at its first
/// occurrence (everything after a model's end-of-sequence marker is
/// garbage by contract).
#[derive(Debug, Clone, Copy, Default)]
pub struct Sentinels {
    pub blank: Option<usize>,
    pub sos: Option<usize>,
    pub eos: Option<usize>,
}

impl Vocabulary {
    /// Load a vocab file with one token per line.
    ///
    /// Blank lines are rejected rather than skipped: indices are line
    /// positions, and silently dropping a line would shift every
    /// index after it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut tokens = Vec::new();
        for (lineno, line) in contents.lines().enumerate() {
            let token = line.trim();
            if token.is_empty() {
                return Err(Error::Vocab(format!(
                    "line {}: empty vocabulary entry",
                    lineno + 1
                )));
            }
            tokens.push(token.to_string());
        }
        if tokens.is_empty() {
            warn!("loaded an empty vocabulary");
        }
        Ok(Self { tokens })
    }

    /// Build a vocabulary from in-memory tokens
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Look up a single index
    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Decode an index sequence to tokens.
    ///
    /// An out-of-range index is a contract violation by the producer
    /// of the indices and reported as [`Error::Vocab`].
    pub fn decode(&self, indices: &[usize]) -> Result<Vec<String>> {
        indices
            .iter()
            .map(|&idx| {
                self.token(idx).map(str::to_string).ok_or_else(|| {
                    Error::Vocab(format!(
                        "index {} out of range for vocabulary of {} tokens",
                        idx,
                        self.tokens.len()
                    ))
                })
            })
            .collect()
    }

    /// Decode an index sequence, stripping sentinel markers.
    pub fn decode_trimmed(&self, indices: &[usize], sentinels: Sentinels) -> Result<Vec<String>> {
        let mut out = Vec::with_capacity(indices.len());
        for &idx in indices {
            if sentinels.eos == Some(idx) {
                break;
            }
            if sentinels.blank == Some(idx) || sentinels.sos == Some(idx) {
                continue;
            }
            let token = self.token(idx).ok_or_else(|| {
                Error::Vocab(format!(
                    "index {} out of range for vocabulary of {} tokens",
                    idx,
                    self.tokens.len()
                ))
            })?;
            out.push(token.to_string());
        }
        Ok(out)
    }
}
