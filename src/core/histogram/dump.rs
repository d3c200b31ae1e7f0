//! `.dat` dump of a histogram for manual inspection (e.g. with gnuplot).

use super::Histogram;
use crate::error::DiagnosticError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Where the dump for `image` goes: its base name with a `.dat` extension,
/// in `out_dir` if given, otherwise next to the image
pub fn dat_path_for(image: &Path, out_dir: Option<&Path>) -> PathBuf {
    let dat_name = image.with_extension("dat");
    match (out_dir, dat_name.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => dat_name,
    }
}

impl Histogram {
    /// Write `level<TAB>count` lines for every occupied level, ascending
    pub fn write_dat(&self, path: &Path) -> Result<(), DiagnosticError> {
        let to_error = |source| DiagnosticError::WriteFailed {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(to_error)?;
        let mut writer = BufWriter::new(file);
        self.write_dat_to(&mut writer).map_err(to_error)?;
        writer.flush().map_err(to_error)
    }

    fn write_dat_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for (level, count) in self.counts().iter().enumerate() {
            if *count > 0 {
                writeln!(out, "{}\t{}", level, count)?;
            }
        }
        Ok(())
    }
}
