//! Report output

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use tracing::info;

use crate::branch::error::SinkError;
use crate::branch::types::Package;

/// Trait for persisting a computed package list under an artifact name
pub trait ReportSink: Send + Sync {
    /// Writes `packages` as the artifact `artifact`
    ///
    /// # Returns
    /// * `Ok(PathBuf)` - Location the report was written to
    /// * `Err(SinkError)` - If the report could not be written
    fn write(&self, artifact: &str, packages: &[&Package]) -> Result<PathBuf, SinkError>;
}

/// Appends `.json` unless the artifact name already ends with it
pub fn artifact_file_name(artifact: &str) -> String {
    if artifact.ends_with(".json") {
        artifact.to_string()
    } else {
        format!("{}.json", artifact)
    }
}

/// Writes reports as pretty-printed JSON arrays into a directory
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ReportSink for JsonFileSink {
    fn write(&self, artifact: &str, packages: &[&Package]) -> Result<PathBuf, SinkError> {
        let path = self.dir.join(artifact_file_name(artifact));
        let io_error = |source| SinkError::Io {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(|source| SinkError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut writer = BufWriter::new(File::create(&path).map_err(io_error)?);
        serde_json::to_writer_pretty(&mut writer, packages)?;
        writer.flush().map_err(io_error)?;

        info!("Wrote {} packages to {:?}", packages.len(), path);

        Ok(path)
    }
}
