//! Directory listing implementation using walkdir.

use super::{filter::is_jpeg_path, PhotoFile, ScanResult};
use crate::error::ScanError;
use crate::events::{null_sender, Event, EventSender, ScanEvent};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Lists the images directly inside one directory
///
/// Entries are sorted by file name so the enumeration order, and with it
/// which direction of each pair gets stored, is the same on every run.
#[derive(Debug, Clone, Default)]
pub struct DirectoryScanner;

impl DirectoryScanner {
    pub fn new() -> Self {
        Self
    }

    /// List eligible images in `root`
    pub fn list(&self, root: &Path) -> Result<ScanResult, ScanError> {
        self.list_with_events(root, &null_sender())
    }

    /// List eligible images in `root`, reporting each one found
    pub fn list_with_events(
        &self,
        root: &Path,
        events: &EventSender,
    ) -> Result<ScanResult, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        events.send(Event::Scan(ScanEvent::Started {
            path: root.to_path_buf(),
        }));

        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        let mut photos = Vec::new();
        let mut skipped = 0;

        for entry_result in walker {
            let entry = entry_result.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                ScanError::ReadDirectory { path, source }
            })?;

            // Symlinks are followed; dangling ones are not files and get skipped
            if !entry.path().is_file() || !is_jpeg_path(entry.path()) {
                skipped += 1;
                continue;
            }

            let metadata = fs::metadata(entry.path()).map_err(|e| ScanError::ReadDirectory {
                path: entry.path().to_path_buf(),
                source: e,
            })?;

            events.send(Event::Scan(ScanEvent::PhotoFound {
                path: entry.path().to_path_buf(),
            }));

            photos.push(PhotoFile {
                path: entry.into_path(),
                size: metadata.len(),
            });
        }

        events.send(Event::Scan(ScanEvent::Completed {
            total_photos: photos.len(),
            skipped,
        }));

        Ok(ScanResult { photos, skipped })
    }
}
