//! Write the XML document and its gzip twin.
//!
//! The payload is rendered and compressed fully in memory before any file is
//! touched.  Each file is then written to a temporary sibling and renamed
//! into place, so a failed run never leaves a truncated output behind.

use std::io::Write;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use log::info;
use tempfile::NamedTempFile;

use nf_network::Network;

use crate::{render_network, OutputError, OutputPaths, OutputResult};

/// Render `network` and write it to both resolved paths.
///
/// # Errors
///
/// [`OutputError::Io`] naming the file that could not be written; the
/// other file may already be in place.
pub fn write_network(network: &Network, target: &Path) -> OutputResult<OutputPaths> {
    let paths = OutputPaths::resolve(target);
    let xml = render_network(network)?;
    let gz = gzip(&xml)?;

    persist(&paths.xml, &xml)?;
    persist(&paths.gz, &gz)?;

    info!(
        "wrote {} nodes, {} links to {} and {}",
        network.node_count(),
        network.link_count(),
        paths.xml.display(),
        paths.gz.display()
    );
    Ok(paths)
}

fn gzip(payload: &[u8]) -> OutputResult<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(payload).map_err(OutputError::Compress)?;
    encoder.finish().map_err(OutputError::Compress)
}

/// Write `bytes` to `path` via a temporary file in the same directory.
fn persist(path: &Path, bytes: &[u8]) -> OutputResult<()> {
    let io_err = |source: std::io::Error| OutputError::Io { path: path.to_path_buf(), source };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}
