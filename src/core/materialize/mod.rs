//! # Materialize Module
//!
//! Turns the ranked pair sequence into numbered copies in an output
//! directory, so that browsing the directory in name order walks through
//! the most similar pairs first.
//!
//! Planning is pure ([`RenamePlanner`]); copying goes through the
//! [`Materializer`] trait. Any copy failure aborts the remaining copies.

mod executor;
mod planner;

pub use executor::{execute_plan, execute_plan_with_events, FsMaterializer, Materializer};
pub use planner::RenamePlanner;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One planned copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyOperation {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Index of the ranked pair that named this file
    pub pair_index: usize,
}

/// Ordered copies for a ranked sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePlan {
    /// Output directory, created if absent
    pub destination: PathBuf,
    pub operations: Vec<CopyOperation>,
}

impl RenamePlan {
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
