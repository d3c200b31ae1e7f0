//! # Selector Module
//!
//! Reduces the all-pairs table to one best match per reference image.
//!
//! The best match is the candidate with the largest `|score|`: a strongly
//! negative correlation is as informative as a strongly positive one.
//! Candidates without a valid score are ignored, and a reference whose
//! candidates are all invalid gets no entry.

use crate::core::comparator::{MatchTable, PairScore};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The strongest comparison of one reference image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestMatch {
    pub reference: PathBuf,
    pub best: PairScore,
}

/// Pick the strongest candidate of every reference, in table order
///
/// Ties keep the candidate seen first.
pub fn select_best(table: &MatchTable) -> Vec<BestMatch> {
    table
        .entries()
        .iter()
        .filter_map(|entry| {
            strongest(&entry.candidates).map(|best| BestMatch {
                reference: entry.reference.clone(),
                best: best.clone(),
            })
        })
        .collect()
}

fn strongest(candidates: &[PairScore]) -> Option<&PairScore> {
    let mut best: Option<(&PairScore, f64)> = None;
    for candidate in candidates {
        let Some(strength) = candidate.strength() else {
            continue;
        };
        match best {
            Some((_, current)) if strength <= current => {}
            _ => best = Some((candidate, strength)),
        }
    }
    best.map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::comparator::MatchEntry;

    fn entry(reference: &str, scores: &[(&str, Option<f64>)]) -> MatchEntry {
        MatchEntry::new(
            reference,
            scores
                .iter()
                .map(|(c, s)| PairScore::new(reference, *c, *s))
                .collect(),
        )
    }

    #[test]
    fn picks_largest_magnitude() {
        let table = MatchTable::from_entries(vec![entry(
            "a",
            &[("b", Some(0.3)), ("c", Some(-0.7)), ("d", Some(0.6))],
        )]);

        let best = select_best(&table);

        assert_eq!(best.len(), 1);
        assert_eq!(best[0].best.candidate, PathBuf::from("c"));
    }

    #[test]
    fn ties_keep_first_encountered() {
        let table = MatchTable::from_entries(vec![entry(
            "a",
            &[("b", Some(0.5)), ("c", Some(-0.5)), ("d", Some(0.5))],
        )]);

        assert_eq!(select_best(&table)[0].best.candidate, PathBuf::from("b"));
    }

    #[test]
    fn invalid_scores_are_skipped() {
        let table = MatchTable::from_entries(vec![
            entry("a", &[("b", None), ("c", Some(0.1))]),
            entry("b", &[("c", None)]),
        ]);

        let best = select_best(&table);

        assert_eq!(best.len(), 1);
        assert_eq!(best[0].reference, PathBuf::from("a"));
        assert_eq!(best[0].best.candidate, PathBuf::from("c"));
    }

    #[test]
    fn zero_score_still_selected() {
        let table = MatchTable::from_entries(vec![entry("a", &[("b", Some(0.0))])]);
        assert_eq!(select_best(&table)[0].best.score, Some(0.0));
    }

    #[test]
    fn keeps_table_order() {
        let table = MatchTable::from_entries(vec![
            entry("z", &[("y", Some(0.1))]),
            entry("y", &[("x", Some(0.9))]),
        ]);

        let references: Vec<_> = select_best(&table).into_iter().map(|b| b.reference).collect();

        assert_eq!(references, vec![PathBuf::from("z"), PathBuf::from("y")]);
    }

    #[test]
    fn never_returns_a_weaker_candidate() {
        let scores: Vec<(String, Option<f64>)> = (0..40)
            .map(|i| (format!("c{}", i), Some(((i * 7919) % 97) as f64 / 97.0 - 0.5)))
            .collect();
        let entry = MatchEntry::new(
            "a",
            scores
                .iter()
                .map(|(c, s)| PairScore::new("a", c.as_str(), *s))
                .collect(),
        );
        let table = MatchTable::from_entries(vec![entry]);

        let best = select_best(&table)[0].best.strength().unwrap();

        assert!(table.iter_pairs().all(|p| p.strength().unwrap() <= best));
    }
}
