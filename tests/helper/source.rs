//! Branch source test utilities

use std::collections::HashMap;

use async_trait::async_trait;

use branch_compare::branch::error::SourceError;
use branch_compare::branch::source::{BranchSource, SourceKind};
use branch_compare::branch::types::{BranchExport, Package};

/// Mock source serving fixed package lists per branch
#[derive(Default)]
pub struct MockSource {
    branches: HashMap<String, Vec<Package>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_branch(mut self, branch: &str, packages: Vec<Package>) -> Self {
        self.branches.insert(branch.to_string(), packages);
        self
    }
}

#[async_trait]
impl BranchSource for MockSource {
    fn source_kind(&self) -> SourceKind {
        SourceKind::Snapshot
    }

    async fn fetch_branch(&self, branch: &str) -> Result<BranchExport, SourceError> {
        match self.branches.get(branch) {
            Some(packages) => Ok(BranchExport {
                length: Some(packages.len()),
                packages: packages.clone(),
                ..BranchExport::default()
            }),
            None => Err(SourceError::NotFound(branch.to_string())),
        }
    }
}

/// Build a package with the given identity and `(epoch, version, release)`
pub fn package(arch: &str, name: &str, epoch: u64, version: &str, release: &str) -> Package {
    Package {
        name: name.to_string(),
        epoch,
        version: version.to_string(),
        release: release.to_string(),
        arch: arch.to_string(),
        build_time: 1234567890,
        source_name: name.to_string(),
    }
}
