//! The all-pairs result table.

use super::PairScore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Comparisons of one reference image against every later image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEntry {
    /// The reference image owning this entry
    pub reference: PathBuf,
    /// Scores against later images, in enumeration order
    pub candidates: Vec<PairScore>,
}

impl MatchEntry {
    pub fn new(reference: impl Into<PathBuf>, candidates: Vec<PairScore>) -> Self {
        Self {
            reference: reference.into(),
            candidates,
        }
    }
}

/// Every scored pair, grouped by reference image
///
/// Only one direction of each pair is stored: the entry of whichever image
/// comes first in enumeration order. Lookups must check both directions;
/// [`MatchTable::score_between`] does.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchTable {
    entries: Vec<MatchEntry>,
}

impl MatchTable {
    /// Build a table from entries already in enumeration order
    ///
    /// Entries without candidates are dropped.
    pub fn from_entries(entries: Vec<MatchEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .filter(|e| !e.candidates.is_empty())
                .collect(),
        }
    }

    /// Entries in enumeration order
    pub fn entries(&self) -> &[MatchEntry] {
        &self.entries
    }

    /// Number of reference images with at least one comparison
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of stored pair scores
    pub fn comparison_count(&self) -> usize {
        self.entries.iter().map(|e| e.candidates.len()).sum()
    }

    /// Candidates stored under `reference`
    pub fn candidates_of(&self, reference: &Path) -> Option<&[PairScore]> {
        self.entries
            .iter()
            .find(|e| e.reference == reference)
            .map(|e| e.candidates.as_slice())
    }

    /// The stored comparison of `a` and `b`, whichever direction holds it
    pub fn score_between(&self, a: &Path, b: &Path) -> Option<&PairScore> {
        let lookup = |reference: &Path, candidate: &Path| {
            self.candidates_of(reference)
                .and_then(|cs| cs.iter().find(|c| c.candidate == candidate))
        };
        lookup(a, b).or_else(|| lookup(b, a))
    }

    /// Iterate every stored pair score
    pub fn iter_pairs(&self) -> impl Iterator<Item = &PairScore> {
        self.entries.iter().flat_map(|e| e.candidates.iter())
    }
}
