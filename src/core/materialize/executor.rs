//! Executor for rename plans.

use super::RenamePlan;
use crate::error::MaterializeError;
use crate::events::{null_sender, Event, EventSender, MaterializeEvent};
use std::fs;
use std::path::Path;
use tracing::info;

/// Filesystem side of materialization
pub trait Materializer: Send + Sync {
    /// Make sure `destination` exists
    fn prepare(&self, destination: &Path) -> Result<(), MaterializeError>;

    /// Copy one file
    fn copy(&self, source: &Path, destination: &Path) -> Result<(), MaterializeError>;
}

/// Copies files with `std::fs`, leaving the originals untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct FsMaterializer;

impl FsMaterializer {
    pub fn new() -> Self {
        Self
    }
}

impl Materializer for FsMaterializer {
    fn prepare(&self, destination: &Path) -> Result<(), MaterializeError> {
        fs::create_dir_all(destination).map_err(|e| MaterializeError::CreateDirectory {
            path: destination.to_path_buf(),
            source: e,
        })
    }

    fn copy(&self, source: &Path, destination: &Path) -> Result<(), MaterializeError> {
        fs::copy(source, destination)
            .map(|_| ())
            .map_err(|e| MaterializeError::CopyFailed {
                source_path: source.to_path_buf(),
                destination: destination.to_path_buf(),
                source: e,
            })
    }
}

/// Run every copy of `plan` in order
///
/// Stops at the first failure; later copies are not attempted. Returns the
/// number of files copied.
pub fn execute_plan(
    plan: &RenamePlan,
    materializer: &dyn Materializer,
) -> Result<usize, MaterializeError> {
    execute_plan_with_events(plan, materializer, &null_sender())
}

/// [`execute_plan`] with a `FileCopied` event per file
pub fn execute_plan_with_events(
    plan: &RenamePlan,
    materializer: &dyn Materializer,
    events: &EventSender,
) -> Result<usize, MaterializeError> {
    events.send(Event::Materialize(MaterializeEvent::Started {
        total_files: plan.operations.len(),
        destination: plan.destination.clone(),
    }));

    materializer.prepare(&plan.destination)?;

    let mut copied = 0;
    for op in &plan.operations {
        materializer.copy(&op.source, &op.destination)?;
        copied += 1;
        events.send(Event::Materialize(MaterializeEvent::FileCopied {
            source: op.source.clone(),
            destination: op.destination.clone(),
        }));
    }

    info!(files = copied, destination = %plan.destination.display(), "materialized ranked sequence");
    events.send(Event::Materialize(MaterializeEvent::Completed {
        files_copied: copied,
    }));

    Ok(copied)
}
