//! Branch exports saved as `<branch>.json` files

use std::path::PathBuf;

use tracing::{debug, info};

use crate::branch::error::SourceError;
use crate::branch::source::{BranchSource, SourceKind};
use crate::branch::types::BranchExport;

/// Reads and writes branch exports in a snapshot directory
pub struct SnapshotSource {
    dir: PathBuf,
}

impl SnapshotSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the snapshot file of a branch
    pub fn snapshot_path(&self, branch: &str) -> PathBuf {
        self.dir.join(format!("{}.json", branch))
    }

    /// Saves an export so later runs can read it offline
    pub async fn save(&self, branch: &str, export: &BranchExport) -> Result<PathBuf, SourceError> {
        let path = self.snapshot_path(branch);

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| SourceError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let data = serde_json::to_vec(export).map_err(|source| SourceError::Json {
            path: path.clone(),
            source,
        })?;

        tokio::fs::write(&path, data)
            .await
            .map_err(|source| SourceError::Io {
                path: path.clone(),
                source,
            })?;

        info!(
            "Saved snapshot of {} ({} packages) to {:?}",
            branch,
            export.packages.len(),
            path
        );

        Ok(path)
    }
}

#[async_trait::async_trait]
impl BranchSource for SnapshotSource {
    fn source_kind(&self) -> SourceKind {
        SourceKind::Snapshot
    }

    async fn fetch_branch(&self, branch: &str) -> Result<BranchExport, SourceError> {
        let path = self.snapshot_path(branch);
        debug!("Reading snapshot: {:?}", path);

        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SourceError::NotFound(branch.to_string()));
            }
            Err(source) => return Err(SourceError::Io { path, source }),
        };

        serde_json::from_slice(&data).map_err(|source| SourceError::Json { path, source })
    }
}
