//! Agent discovery
//!
//! Walks the immediate subdirectories of the module root, loading and
//! validating one manifest per directory. Every per-module failure is
//! recovered locally: it becomes a [`SkippedModule`] in the report and the
//! scan moves on. A missing module root yields an empty registry.
//!
//! Enumeration follows the filesystem's natural order. When two modules claim
//! the same identifier the one processed first wins, so which one that is
//! depends on that order.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::loader::{load_manifest, LoadError, MANIFEST_FILE_NAME};
use crate::registry::AgentRegistry;
use crate::store::RegistryStore;
use crate::validator::{validate, ValidationError};

/// Why a module directory was skipped
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("manifest.json not found")]
    MissingManifest,

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl SkipReason {
    /// Stable diagnostic label
    pub fn kind(&self) -> &'static str {
        match self {
            SkipReason::MissingManifest => "missing-manifest",
            SkipReason::Load(LoadError::Read { .. }) => "read-failure",
            SkipReason::Load(LoadError::Parse { .. }) => "parse-failure",
            SkipReason::Invalid(_) => "validation-failure",
        }
    }
}

#[derive(Debug)]
pub struct SkippedModule {
    /// Directory name under the module root
    pub module_dir: String,
    pub reason: SkipReason,
}

/// Outcome of one discovery run
#[derive(Debug, Default)]
pub struct DiscoveryReport {
    pub registry: AgentRegistry,
    pub skipped: Vec<SkippedModule>,
    /// Module root absent or not a directory
    pub root_missing: bool,
}

/// One raw entry of the module root
struct ScannedEntry {
    name: String,
    path: PathBuf,
    is_dir: io::Result<bool>,
}

/// Module directory scanner
pub struct AgentDiscovery {
    root: PathBuf,
    ignore_patterns: Vec<String>,
}

impl AgentDiscovery {
    /// Create a scanner with default ignore patterns
    ///
    /// Hidden directories (leading `.`) are always ignored.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ignore_patterns: vec!["node_modules".to_string()],
        }
    }

    /// Replace the directory names ignored during the scan
    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run discovery to completion
    pub async fn discover(&self) -> DiscoveryReport {
        let Some(module_dirs) = self.module_dirs().await else {
            return DiscoveryReport {
                root_missing: true,
                ..DiscoveryReport::default()
            };
        };

        let mut store = RegistryStore::new();
        let mut outcomes = Vec::with_capacity(module_dirs.len());

        for (name, path) in module_dirs {
            let outcome = register_module(&path, &mut store).await;
            match &outcome {
                Ok(id) => debug!("Registered agent {} from {}", id, name),
                Err(SkipReason::MissingManifest) => {
                    warn!("Skipping module {}: no {}", name, MANIFEST_FILE_NAME)
                }
                Err(reason) => error!("Skipping module {}: {}", name, reason),
            }
            outcomes.push((name, outcome));
        }

        let (registered, failed): (Vec<_>, Vec<_>) =
            outcomes.into_iter().partition(|(_, outcome)| outcome.is_ok());

        let skipped: Vec<SkippedModule> = failed
            .into_iter()
            .filter_map(|(module_dir, outcome)| {
                outcome
                    .err()
                    .map(|reason| SkippedModule { module_dir, reason })
            })
            .collect();

        info!(
            "Agent discovery complete: {} registered, {} skipped ({})",
            registered.len(),
            skipped.len(),
            self.root.display()
        );

        DiscoveryReport {
            registry: AgentRegistry::from(store),
            skipped,
            root_missing: false,
        }
    }

    /// Immediate subdirectories of the root, or `None` if the root is unusable
    async fn module_dirs(&self) -> Option<Vec<(String, PathBuf)>> {
        match tokio::fs::metadata(&self.root).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                warn!("Module root is not a directory: {}", self.root.display());
                return None;
            }
            Err(e) => {
                warn!("Module root not found: {} ({})", self.root.display(), e);
                return None;
            }
        }

        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Cannot read module root {}: {}", self.root.display(), e);
                return None;
            }
        };

        let mut scanned = Vec::new();
        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    let is_dir = entry.file_type().await.map(|t| t.is_dir());
                    scanned.push(Ok(ScannedEntry {
                        name: entry.file_name().to_string_lossy().into_owned(),
                        path: entry.path(),
                        is_dir,
                    }));
                }
                Ok(None) => break,
                // std's ReadDir reports end of stream after an error, so this terminates
                Err(e) => scanned.push(Err(e)),
            }
        }

        Some(self.select_module_dirs(scanned))
    }

    /// Keep directories that are not ignored; log and skip unreadable entries
    fn select_module_dirs(&self, scanned: Vec<io::Result<ScannedEntry>>) -> Vec<(String, PathBuf)> {
        let mut dirs = Vec::new();
        for entry in scanned {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Error reading module root {}: {}", self.root.display(), e);
                    continue;
                }
            };

            if self.is_ignored(&entry.name) {
                debug!("Ignoring {}", entry.name);
                continue;
            }

            match entry.is_dir {
                Ok(true) => dirs.push((entry.name, entry.path)),
                Ok(false) => debug!("Ignoring non-directory entry {}", entry.name),
                Err(e) => warn!("Error accessing entry {}: {}", entry.name, e),
            }
        }
        dirs
    }

    fn is_ignored(&self, name: &str) -> bool {
        name.starts_with('.') || self.ignore_patterns.iter().any(|p| p == name)
    }
}

/// Discover agents under `root` and return only once the scan has settled
pub async fn discover_agents(root: impl Into<PathBuf>) -> DiscoveryReport {
    AgentDiscovery::new(root).discover().await
}

async fn register_module(module_dir: &Path, store: &mut RegistryStore) -> Result<String, SkipReason> {
    let raw = load_manifest(module_dir)
        .await?
        .ok_or(SkipReason::MissingManifest)?;
    let manifest = validate(raw, store)?;
    let id = manifest.id.clone();
    store.insert(manifest)?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_and_ignored_names() {
        let discovery = AgentDiscovery::new("/tmp/agents");
        assert!(discovery.is_ignored(".git"));
        assert!(discovery.is_ignored("node_modules"));
        assert!(!discovery.is_ignored("resume-builder"));

        let discovery = discovery.with_ignore_patterns(vec!["_templates".to_string()]);
        assert!(discovery.is_ignored("_templates"));
        assert!(!discovery.is_ignored("node_modules"));
    }

    fn entry(name: &str, is_dir: io::Result<bool>) -> io::Result<ScannedEntry> {
        Ok(ScannedEntry {
            name: name.to_string(),
            path: PathBuf::from("/tmp/agents").join(name),
            is_dir,
        })
    }

    #[test]
    fn test_enumeration_errors_do_not_stop_the_scan() {
        let discovery = AgentDiscovery::new("/tmp/agents");
        let scanned = vec![
            entry("resume-builder", Ok(true)),
            Err(io::Error::new(io::ErrorKind::Other, "readdir failed")),
            entry("job-matcher", Err(io::Error::new(io::ErrorKind::PermissionDenied, "stat failed"))),
            entry("billing-manager", Ok(true)),
            entry("README.md", Ok(false)),
            entry(".git", Ok(true)),
        ];

        let names: Vec<String> = discovery
            .select_module_dirs(scanned)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["resume-builder", "billing-manager"]);
    }

    #[test]
    fn test_skip_reason_kinds() {
        assert_eq!(SkipReason::MissingManifest.kind(), "missing-manifest");
        assert_eq!(
            SkipReason::from(ValidationError::MissingField("api")).kind(),
            "validation-failure"
        );
    }

    #[tokio::test]
    async fn test_root_that_is_a_file_is_treated_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("agents");
        std::fs::write(&file, "not a directory").unwrap();

        let report = discover_agents(&file).await;
        assert!(report.root_missing);
        assert!(report.registry.is_empty());
    }
}
