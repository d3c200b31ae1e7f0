//! Eligibility predicate for candidate images.

use std::path::Path;

/// Whether a file name carries a `.jpg` or `.jpeg` suffix, ignoring case
pub fn is_jpeg_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.ends_with(".jpg") || lower.ends_with(".jpeg")
}

/// [`is_jpeg_name`] applied to the last component of a path
pub fn is_jpeg_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(is_jpeg_name)
}
