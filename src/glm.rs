//! GLM-style lexical normalization
//!
//! Conversational corpora ship a GLM file rewriting abbreviations and
//! hesitations in reference transcripts ("gonna" -> "going to",
//! "[uh]" variants, spelled-out acronyms) so that surface-form
//! variation does not count against the recognizer. This is a pure
//! text substitution applied to the reference word list before
//! scoring; it never touches the alignment itself.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Static string-substitution table parsed from a GLM file
///
/// Entries look like `[GONNA] => going to / gonna`; the left side is
/// matched as a single lowercase word, the right side may carry
/// alternatives separated by `/` or `;` (the first one wins) and
/// expand to several words.
#[derive(Debug, Clone, Default)]
pub struct Glm {
    map: HashMap<String, String>,
}

/// Comment markers at the start of a GLM line
fn is_comment(line: &str) -> bool {
    matches!(line.chars().next(), Some(';') | Some('*') | Some('\''))
}

/// Strip GLM markup characters, keeping word content
fn strip_markup(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '[' | ']' | '{' | '}'))
        .collect()
}

/// Collapse whitespace runs to single spaces and trim the ends
fn collapse_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl Glm {
    /// Load and parse a GLM file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    fn parse(contents: &str) -> Result<Self> {
        let mut map = HashMap::new();
        for (lineno, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || is_comment(line) {
                continue;
            }
            let Some((before, after)) = line.split_once("=>") else {
                return Err(Error::Glm(format!(
                    "line {}: missing `=>` separator",
                    lineno + 1
                )));
            };

            // Left side: markup and inner whitespace removed, lowercased
            let before: String = strip_markup(before)
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_lowercase();

            // Right side: first alternative wins, markup stripped
            let after = after.split('/').next().unwrap_or("");
            let after = after.split(';').next().unwrap_or("");
            let after = collapse_spaces(&strip_markup(after)).to_lowercase();

            if before.is_empty() || after.is_empty() {
                debug!(line = lineno + 1, "skipping degenerate GLM entry");
                continue;
            }
            map.insert(before, after);
        }
        Ok(Self { map })
    }

    /// Build a table from in-memory pairs
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let map = pairs
            .into_iter()
            .map(|(before, after)| (before.into(), after.into()))
            .collect();
        Self { map }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Rewrite a word list through the table.
    ///
    /// A matched word is replaced by its expansion, which may be
    /// several words; unmatched words pass through unchanged.
    pub fn apply(&self, words: &[String]) -> Vec<String> {
        let mut out = Vec::with_capacity(words.len());
        for word in words {
            match self.map.get(word) {
                Some(expansion) => out.extend(expansion.split(' ').map(str::to_string)),
                None => out.push(word.clone()),
            }
        }
        out
    }
}
