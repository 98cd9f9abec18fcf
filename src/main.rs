use std::path::PathBuf;

use anyhow::Context;
use branch_compare::command::{self, Command};
use branch_compare::config::{self, CompareConfig};
use clap::Parser;
use tracing::error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

#[derive(Parser)]
#[command(name = "branch-compare")]
#[command(version, about = "Compare binary packages between the Sisyphus and p11 ALT Linux branches")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the repository database API
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Read branch snapshots instead of querying the API
    #[arg(long, global = true)]
    offline: bool,

    /// Save fetched branch exports as snapshots
    #[arg(long, global = true)]
    save_snapshots: bool,

    /// Directory holding `<branch>.json` snapshots
    #[arg(long, global = true)]
    snapshot_dir: Option<PathBuf>,

    /// Directory the report is written to
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Report name (`.json` is appended if missing)
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write logs to a file (defaults to the data directory), e.g. `--log-file=compare.log`
    #[arg(long, global = true, num_args = 0..=1, require_equals = true)]
    log_file: Option<Option<PathBuf>>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,
}

impl Cli {
    /// Load the config file, then apply command line overrides
    fn resolve_config(&self) -> anyhow::Result<CompareConfig> {
        let mut config = match &self.config {
            Some(path) => CompareConfig::load(path)?,
            None => CompareConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.source.base_url = base_url.clone();
        }
        if let Some(snapshot_dir) = &self.snapshot_dir {
            config.source.snapshot_dir = Some(snapshot_dir.clone());
        }
        if let Some(output_dir) = &self.output_dir {
            config.output.dir = output_dir.clone();
        }
        config.source.offline |= self.offline;
        config.source.save_snapshots |= self.save_snapshots;

        Ok(config)
    }
}

/// Logs go to stderr (or a file) so that stdout only carries the count.
fn init_logging(cli: &Cli) -> anyhow::Result<Option<WorkerGuard>> {
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let (writer, guard) = match &cli.log_file {
        Some(path) => {
            let path = path.clone().unwrap_or_else(config::log_path);
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {:?}", path))?;
            let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {:?}", dir))?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
            (BoxMakeWriter::new(writer), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(cli.log_file.is_none())
        .with_writer(writer);
    if cli.log_json {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(guard)
}

/// Run the selected command, logging a failure before it is returned
fn run(cli: &Cli, config: &CompareConfig) -> anyhow::Result<usize> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    match runtime.block_on(command::execute(cli.command, config, cli.output.as_deref())) {
        Ok(count) => Ok(count),
        Err(e) => {
            let e = anyhow::Error::new(e)
                .context(format!("Command {} failed", cli.command.as_str()));
            error!("{:#}", e);
            Err(e)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(&cli)?;

    let config = cli.resolve_config()?;
    let count = run(&cli, &config)?;

    println!("{}", count);

    Ok(())
}
