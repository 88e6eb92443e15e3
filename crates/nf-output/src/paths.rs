//! Output path resolution.

use std::path::{Path, PathBuf};

/// Compressed-file suffix.
pub const GZ_EXTENSION: &str = "gz";

/// The uncompressed file and its compressed twin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPaths {
    pub xml: PathBuf,
    pub gz:  PathBuf,
}

impl OutputPaths {
    /// Derive both paths from the requested target.
    ///
    /// `net.xml.gz` → (`net.xml`, `net.xml.gz`); anything else, e.g.
    /// `net.xml` → (`net.xml`, `net.xml.gz`).
    pub fn resolve(target: &Path) -> Self {
        if target.extension().is_some_and(|ext| ext == GZ_EXTENSION) {
            Self { xml: target.with_extension(""), gz: target.to_path_buf() }
        } else {
            let mut gz = target.as_os_str().to_owned();
            gz.push(".");
            gz.push(GZ_EXTENSION);
            Self { xml: target.to_path_buf(), gz: PathBuf::from(gz) }
        }
    }
}
