//! Artifact emitters.
//!
//! Each emitter is a pure function of the store, the canonical index and the resolver.
//! [`write_atomic`] is the only place artifacts touch the filesystem.

pub mod css;
pub mod docs;
pub mod w3c;

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::EmitError;

pub use css::to_css;
pub use docs::{docs_model, DocsModel};
pub use w3c::{w3c_documents, w3c_file_name, TokenTree};

/// Writes `contents` to `path` through a temporary file in the same directory, so readers
/// never observe a partially written artifact.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), EmitError> {
    let write_error = |source: std::io::Error| EmitError::Write {
        path: path.to_string_lossy().to_string(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_error)?;
    let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
    file.write_all(contents.as_bytes()).map_err(write_error)?;
    file.persist(path).map_err(|err| write_error(err.error))?;
    Ok(())
}
