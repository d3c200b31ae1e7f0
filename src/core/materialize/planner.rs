//! Output naming for the ranked sequence.

use super::{CopyOperation, RenamePlan};
use crate::core::ranker::RankedPair;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Assigns sequential output names to ranked pairs
pub struct RenamePlanner;

impl RenamePlanner {
    /// Plan the copies for `pairs` into `destination`
    ///
    /// Pair `k` names its first image `2k` and its second `2k+1`, keeping
    /// each file's original extension. An image already named by an earlier
    /// pair keeps that name and its slot in pair `k` stays unused.
    pub fn plan(pairs: &[RankedPair], destination: &Path) -> RenamePlan {
        let mut named: HashSet<&Path> = HashSet::new();
        let mut operations = Vec::new();

        for (k, pair) in pairs.iter().enumerate() {
            let slots = [(&pair.image_a, 2 * k), (&pair.image_b, 2 * k + 1)];
            for (source, index) in slots {
                if !named.insert(source.as_path()) {
                    continue;
                }
                operations.push(CopyOperation {
                    source: source.clone(),
                    destination: destination.join(output_name(source, index)),
                    pair_index: k,
                });
            }
        }

        RenamePlan {
            destination: destination.to_path_buf(),
            operations,
        }
    }
}

/// `index` followed by the source's extension, case preserved
fn output_name(source: &Path, index: usize) -> PathBuf {
    match source.extension() {
        Some(ext) => PathBuf::from(format!("{}.{}", index, ext.to_string_lossy())),
        None => PathBuf::from(index.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &str, b: &str, rank: f64) -> RankedPair {
        RankedPair {
            image_a: PathBuf::from(a),
            image_b: PathBuf::from(b),
            rank,
        }
    }

    fn names(plan: &RenamePlan) -> Vec<(String, String)> {
        plan.operations
            .iter()
            .map(|op| {
                (
                    op.source.to_string_lossy().into_owned(),
                    op.destination
                        .file_name()
                        .unwrap()
                        .to_string_lossy()
                        .into_owned(),
                )
            })
            .collect()
    }

    #[test]
    fn disjoint_pairs_get_consecutive_names() {
        let plan = RenamePlanner::plan(
            &[pair("/p/a.jpg", "/p/b.JPG", 0.9), pair("/p/c.jpeg", "/p/d.jpg", 0.5)],
            Path::new("/out"),
        );

        assert_eq!(
            names(&plan),
            vec![
                ("/p/a.jpg".into(), "0.jpg".into()),
                ("/p/b.JPG".into(), "1.JPG".into()),
                ("/p/c.jpeg".into(), "2.jpeg".into()),
                ("/p/d.jpg".into(), "3.jpg".into()),
            ]
        );
        assert_eq!(plan.operations[0].destination, PathBuf::from("/out/0.jpg"));
    }

    #[test]
    fn repeated_image_keeps_first_name() {
        let plan = RenamePlanner::plan(
            &[
                pair("a.jpg", "b.jpg", 0.9),
                pair("b.jpg", "c.jpg", 0.8),
                pair("d.jpg", "e.jpg", 0.7),
                pair("c.jpg", "e.jpg", 0.1),
            ],
            Path::new("out"),
        );

        assert_eq!(
            names(&plan),
            vec![
                ("a.jpg".into(), "0.jpg".into()),
                ("b.jpg".into(), "1.jpg".into()),
                ("c.jpg".into(), "3.jpg".into()),
                ("d.jpg".into(), "4.jpg".into()),
                ("e.jpg".into(), "5.jpg".into()),
            ]
        );
    }

    #[test]
    fn records_pair_index() {
        let plan = RenamePlanner::plan(
            &[pair("a.jpg", "b.jpg", 0.9), pair("b.jpg", "c.jpg", 0.8)],
            Path::new("out"),
        );
        let indices: Vec<usize> = plan.operations.iter().map(|op| op.pair_index).collect();
        assert_eq!(indices, vec![0, 0, 1]);
    }

    #[test]
    fn file_without_extension_gets_bare_number() {
        let plan = RenamePlanner::plan(&[pair("a", "b.jpg", 0.3)], Path::new("out"));
        assert_eq!(plan.operations[0].destination, PathBuf::from("out/0"));
    }

    #[test]
    fn empty_sequence_plans_nothing() {
        assert!(RenamePlanner::plan(&[], Path::new("out")).operations.is_empty());
    }
}
