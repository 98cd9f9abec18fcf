//! Repository database (rdb) API implementation

use std::time::Duration;

use tracing::{debug, warn};

use crate::branch::error::SourceError;
use crate::branch::source::{BranchSource, SourceKind};
use crate::branch::types::BranchExport;

/// Source implementation for the `export/branch_binary_packages` endpoint
pub struct RdbSource {
    client: reqwest::Client,
    base_url: String,
}

impl RdbSource {
    /// Creates a new RdbSource with a custom base URL and request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        Ok(Self {
            client: reqwest::Client::builder()
                .user_agent("branch-compare")
                .timeout(timeout)
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn export_url(&self, branch: &str) -> String {
        format!("{}/export/branch_binary_packages/{}", self.base_url, branch)
    }
}

#[async_trait::async_trait]
impl BranchSource for RdbSource {
    fn source_kind(&self) -> SourceKind {
        SourceKind::Rdb
    }

    async fn fetch_branch(&self, branch: &str) -> Result<BranchExport, SourceError> {
        let url = self.export_url(branch);
        debug!("Fetching branch export: {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(branch.to_string()));
        }

        if !status.is_success() {
            warn!("rdb returned status {}: {}", status, url);
            return Err(SourceError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let export: BranchExport = response.json().await.map_err(|e| {
            warn!("Failed to parse rdb response: {}", e);
            SourceError::InvalidResponse(e.to_string())
        })?;

        if let Some(length) = export.length
            && length != export.packages.len()
        {
            warn!(
                "Branch {} reports {} packages but lists {}",
                branch,
                length,
                export.packages.len()
            );
        }

        debug!(
            "Fetched {} packages for branch {}",
            export.packages.len(),
            branch
        );

        Ok(export)
    }
}
