//! Source trait for fetching the package export of a branch

#[cfg(test)]
use mockall::automock;

use crate::branch::error::SourceError;
use crate::branch::types::BranchExport;

/// Kind of a branch source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Repository database HTTP API
    Rdb,
    /// Previously saved `<branch>.json` files
    Snapshot,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Rdb => "rdb",
            SourceKind::Snapshot => "snapshot",
        }
    }
}

/// Trait for fetching the binary package export of a branch
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait BranchSource: Send + Sync {
    /// Returns the kind of source this implementation reads from
    fn source_kind(&self) -> SourceKind;

    /// Fetches every binary package of a branch
    ///
    /// # Arguments
    /// * `branch` - The branch name (e.g., "sisyphus" or "p11")
    ///
    /// # Returns
    /// * `Ok(BranchExport)` - Packages in the order the source lists them
    /// * `Err(SourceError)` - If the branch is unavailable
    async fn fetch_branch(&self, branch: &str) -> Result<BranchExport, SourceError>;
}
