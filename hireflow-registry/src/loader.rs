//! Manifest loader
//!
//! Reads `<module_dir>/manifest.json` and parses it into a [`RawManifest`].
//! A missing manifest is a normal outcome (`Ok(None)`), not an error.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::manifest::RawManifest;

/// Conventional manifest location inside a module directory
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Manifest exists but could not be turned into a [`RawManifest`]
#[derive(Debug, Error)]
pub enum LoadError {
    /// Manifest present but unreadable
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Manifest read but not valid JSON for the manifest schema
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Manifest path for a module directory
pub fn manifest_path(module_dir: &Path) -> PathBuf {
    module_dir.join(MANIFEST_FILE_NAME)
}

/// Load one module's manifest, un-validated
pub async fn load_manifest(module_dir: &Path) -> Result<Option<RawManifest>, LoadError> {
    let path = manifest_path(module_dir);

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No manifest at {}", path.display());
            return Ok(None);
        }
        Err(source) => {
            debug!("Read of {} failed: {}", path.display(), source);
            return Err(LoadError::Read { path, source });
        }
    };

    match serde_json::from_str::<RawManifest>(&content) {
        Ok(raw) => Ok(Some(raw)),
        Err(source) => {
            debug!("Parse of {} failed: {}", path.display(), source);
            Err(LoadError::Parse { path, source })
        }
    }
}
