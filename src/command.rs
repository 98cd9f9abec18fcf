//! Compare commands and the fetch → diff → report pipeline behind them

use std::time::Duration;

use clap::Subcommand;
use futures::try_join;
use tracing::info;

use crate::branch::diff::DiffKind;
use crate::branch::error::CompareError;
use crate::branch::sink::{JsonFileSink, ReportSink};
use crate::branch::source::BranchSource;
use crate::branch::sources::{RdbSource, SnapshotSource};
use crate::branch::types::PackageCollection;
use crate::config::{CompareConfig, DEVEL_BRANCH, STABLE_BRANCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Count packages that are in p11 but not in Sisyphus
    #[command(name = "p11-not-in-sisyphus")]
    P11NotInSisyphus,
    /// Count packages that are in Sisyphus but not in p11
    #[command(name = "sisyphus-not-in-p11")]
    SisyphusNotInP11,
    /// Count packages whose version in Sisyphus is newer than in p11
    #[command(name = "compare-versions")]
    CompareVersions,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::P11NotInSisyphus => "p11-not-in-sisyphus",
            Command::SisyphusNotInP11 => "sisyphus-not-in-p11",
            Command::CompareVersions => "compare-versions",
        }
    }

    pub fn diff_kind(&self) -> DiffKind {
        match self {
            Command::P11NotInSisyphus => DiffKind::LeftOnly,
            Command::SisyphusNotInP11 => DiffKind::RightOnly,
            Command::CompareVersions => DiffKind::Upgraded,
        }
    }

    /// Returns the `(left, right)` branches passed to the diff
    pub fn branches(&self) -> (&'static str, &'static str) {
        match self {
            Command::P11NotInSisyphus | Command::SisyphusNotInP11 => (STABLE_BRANCH, DEVEL_BRANCH),
            Command::CompareVersions => (DEVEL_BRANCH, STABLE_BRANCH),
        }
    }

    /// Report name used when none is given on the command line
    pub fn default_artifact(&self) -> &'static str {
        match self {
            Command::P11NotInSisyphus => "p11_not_in_sisyphus.json",
            Command::SisyphusNotInP11 => "sisyphus_not_in_p11.json",
            Command::CompareVersions => "sisyphus_newer_than_p11.json",
        }
    }
}

/// Fetch a branch and build its package collection
///
/// When `snapshots` is given, the raw export is saved there before grouping.
pub async fn load_branch(
    source: &dyn BranchSource,
    branch: &str,
    snapshots: Option<&SnapshotSource>,
) -> Result<PackageCollection, CompareError> {
    let into_compare_error = |source| CompareError::Source {
        branch: branch.to_string(),
        source,
    };

    let export = source
        .fetch_branch(branch)
        .await
        .map_err(into_compare_error)?;

    if let Some(snapshots) = snapshots {
        snapshots
            .save(branch, &export)
            .await
            .map_err(into_compare_error)?;
    }

    let collection = PackageCollection::from_export(branch, export);
    info!(
        "Loaded {} packages of {} across {} architectures",
        collection.len(),
        branch,
        collection.architectures().count()
    );

    Ok(collection)
}

/// Run a command against the given source and sink
///
/// Both branches are fetched before any comparison starts. Returns the number
/// of packages written to the report.
pub async fn run(
    command: Command,
    source: &dyn BranchSource,
    sink: &dyn ReportSink,
    snapshots: Option<&SnapshotSource>,
    artifact: Option<&str>,
) -> Result<usize, CompareError> {
    let (left_branch, right_branch) = command.branches();
    info!(
        "Running {} with {} source",
        command.as_str(),
        source.source_kind().as_str()
    );

    let (left, right) = try_join!(
        load_branch(source, left_branch, snapshots),
        load_branch(source, right_branch, snapshots),
    )?;

    let kind = command.diff_kind();
    let packages = kind.run(&left, &right);
    info!(
        "{} {} vs {}: {} packages",
        kind.as_str(),
        left_branch,
        right_branch,
        packages.len()
    );

    sink.write(artifact.unwrap_or(command.default_artifact()), &packages)?;

    Ok(packages.len())
}

/// Build the source and sink described by `config`, then run the command
pub async fn execute(
    command: Command,
    config: &CompareConfig,
    artifact: Option<&str>,
) -> Result<usize, CompareError> {
    let sink = JsonFileSink::new(&config.output.dir);
    let snapshot_dir = config.source.snapshot_dir();

    if config.source.offline {
        let source = SnapshotSource::new(snapshot_dir);
        return run(command, &source, &sink, None, artifact).await;
    }

    let source = RdbSource::new(
        &config.source.base_url,
        Duration::from_millis(config.source.timeout),
    )
    .map_err(CompareError::Setup)?;
    let snapshots = config
        .source
        .save_snapshots
        .then(|| SnapshotSource::new(snapshot_dir));

    run(command, &source, &sink, snapshots.as_ref(), artifact).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    use rstest::rstest;
    use tempfile::TempDir;

    use crate::branch::error::{SinkError, SourceError};
    use crate::branch::source::{MockBranchSource, SourceKind};
    use crate::branch::types::{BranchExport, Package};

    /// Sink that records written reports instead of touching the filesystem
    #[derive(Default)]
    struct RecordingSink {
        reports: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl ReportSink for RecordingSink {
        fn write(&self, artifact: &str, packages: &[&Package]) -> Result<PathBuf, SinkError> {
            self.reports.lock().unwrap().push((
                artifact.to_string(),
                packages.iter().map(|p| p.name.clone()).collect(),
            ));
            Ok(PathBuf::from(artifact))
        }
    }

    fn export(packages: &[(&str, &str)]) -> BranchExport {
        BranchExport {
            packages: packages
                .iter()
                .map(|(name, version)| Package {
                    name: name.to_string(),
                    version: version.to_string(),
                    release: "alt1".to_string(),
                    arch: "x86_64".to_string(),
                    ..Package::default()
                })
                .collect(),
            ..BranchExport::default()
        }
    }

    fn mock_source() -> MockBranchSource {
        let mut source = MockBranchSource::new();
        source.expect_source_kind().return_const(SourceKind::Rdb);
        source
            .expect_fetch_branch()
            .withf(|branch| branch == "p11")
            .returning(|_| Ok(export(&[("foo", "1.0"), ("pkg", "1.0"), ("old", "1.0")])));
        source
            .expect_fetch_branch()
            .withf(|branch| branch == "sisyphus")
            .returning(|_| Ok(export(&[("pkg", "2.0"), ("bar", "1.0"), ("old", "0.9")])));
        source
    }

    #[rstest]
    #[case(Command::P11NotInSisyphus, "p11_not_in_sisyphus.json", vec!["foo"])]
    #[case(Command::SisyphusNotInP11, "sisyphus_not_in_p11.json", vec!["bar"])]
    #[case(Command::CompareVersions, "sisyphus_newer_than_p11.json", vec!["pkg"])]
    #[tokio::test]
    async fn run_writes_report_and_returns_count(
        #[case] command: Command,
        #[case] artifact: &str,
        #[case] expected: Vec<&str>,
    ) {
        let source = mock_source();
        let sink = RecordingSink::default();

        let count = run(command, &source, &sink, None, None).await.unwrap();

        assert_eq!(count, expected.len());
        let reports = sink.reports.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].0, artifact);
        assert_eq!(reports[0].1, expected);
    }

    #[tokio::test]
    async fn run_uses_artifact_override() {
        let source = mock_source();
        let sink = RecordingSink::default();

        run(Command::P11NotInSisyphus, &source, &sink, None, Some("custom"))
            .await
            .unwrap();

        assert_eq!(sink.reports.lock().unwrap()[0].0, "custom");
    }

    #[tokio::test]
    async fn run_fails_without_report_when_branch_is_unavailable() {
        let mut source = MockBranchSource::new();
        source.expect_source_kind().return_const(SourceKind::Rdb);
        source
            .expect_fetch_branch()
            .withf(|branch| branch == "p11")
            .returning(|_| Ok(export(&[("foo", "1.0")])));
        source
            .expect_fetch_branch()
            .withf(|branch| branch == "sisyphus")
            .returning(|branch| Err(SourceError::NotFound(branch.to_string())));
        let sink = RecordingSink::default();

        let result = run(Command::P11NotInSisyphus, &source, &sink, None, None).await;

        assert!(matches!(
            result,
            Err(CompareError::Source { ref branch, .. }) if branch == "sisyphus"
        ));
        assert!(sink.reports.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn load_branch_saves_snapshot_when_requested() {
        let temp_dir = TempDir::new().unwrap();
        let snapshots = SnapshotSource::new(temp_dir.path());
        let source = mock_source();

        let collection = load_branch(&source, "p11", Some(&snapshots)).await.unwrap();

        assert_eq!(collection.len(), 3);
        let saved = snapshots.fetch_branch("p11").await.unwrap();
        assert_eq!(saved.packages.len(), 3);
    }

    #[tokio::test]
    async fn execute_reads_snapshots_when_offline() {
        let temp_dir = TempDir::new().unwrap();
        let snapshots = SnapshotSource::new(temp_dir.path().join("snapshots"));
        snapshots
            .save("p11", &export(&[("foo", "1.0"), ("pkg", "1.0")]))
            .await
            .unwrap();
        snapshots
            .save("sisyphus", &export(&[("pkg", "1.1")]))
            .await
            .unwrap();

        let mut config = CompareConfig::default();
        config.source.offline = true;
        config.source.snapshot_dir = Some(temp_dir.path().join("snapshots"));
        config.output.dir = temp_dir.path().join("out");

        let count = execute(Command::CompareVersions, &config, Some("upgraded"))
            .await
            .unwrap();

        assert_eq!(count, 1);
        assert!(temp_dir.path().join("out/upgraded.json").exists());
    }

    #[test]
    fn commands_compare_stable_against_devel_except_compare_versions() {
        assert_eq!(Command::P11NotInSisyphus.branches(), ("p11", "sisyphus"));
        assert_eq!(Command::SisyphusNotInP11.branches(), ("p11", "sisyphus"));
        assert_eq!(Command::CompareVersions.branches(), ("sisyphus", "p11"));
    }
}
