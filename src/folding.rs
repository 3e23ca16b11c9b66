//! Phone label-set folding
//!
//! Scoring a phone recognizer usually happens on a coarser label set
//! than the one the model was trained on (e.g. the 61 TIMIT phones
//! folded onto the canonical 39). The table is a static many-to-one
//! map applied to reference and hypothesis independently before
//! alignment; it never interacts with the alignment itself.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// A coarse label of "nan" in the mapping file marks a fine label that
/// is removed from the sequence entirely (e.g. the TIMIT glottal stop).
const DROPPED_LABEL: &str = "nan";

/// Static many-to-one map from a fine phone set onto a coarse one
#[derive(Debug, Clone, Default)]
pub struct FoldingTable {
    map: HashMap<String, String>,
}

impl FoldingTable {
    /// Load a mapping file of whitespace-separated `fine coarse` pairs.
    ///
    /// Blank lines are skipped; a line without exactly two fields is
    /// rejected.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    fn parse(contents: &str) -> Result<Self> {
        let mut map = HashMap::new();
        for (lineno, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split_whitespace();
            let (Some(fine), Some(coarse), None) =
                (fields.next(), fields.next(), fields.next())
            else {
                return Err(Error::Folding(format!(
                    "line {}: expected `fine coarse`, got {:?}",
                    lineno + 1,
                    line
                )));
            };
            map.insert(fine.to_string(), coarse.to_string());
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
            .map(|(fine, coarse)| (fine.into(), coarse.into()))
            .collect();
        Self { map }
    }

    /// Number of fine labels in the table
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Fold a label sequence onto the coarse set.
    ///
    /// Labels mapped to `nan` are dropped, so the folded sequence may
    /// be shorter than the input. Labels absent from the table pass
    /// through unchanged.
    pub fn fold(&self, labels: &[String]) -> Vec<String> {
        let mut folded = Vec::with_capacity(labels.len());
        for label in labels {
            match self.map.get(label) {
                Some(coarse) if coarse == DROPPED_LABEL => {}
                Some(coarse) => folded.push(coarse.clone()),
                None => {
                    debug!(label = %label, "label not in folding table, kept as-is");
                    folded.push(label.clone());
                }
            }
        }
        folded
    }
}
