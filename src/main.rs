//! Entry point for the `strings-sync` command.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use strings_sync::config::{
    ConfigManager,
    Overrides,
    SearcherKind,
};
use strings_sync::{
    Error,
    RunOptions,
    RunSummary,
};
use tracing_subscriber::EnvFilter;

/// Extract localizable keys and update a `Localizable.strings` file.
#[derive(Debug, Parser)]
#[command(name = "strings-sync", version, about)]
struct Cli {
    /// Project path
    #[arg(short = 'p', long = "project", value_name = "PROJECT_PATH", default_value = ".")]
    project_path: PathBuf,

    /// Output file [default: Assets/en.lproj/Localizable.strings, relative to the project]
    #[arg(short = 'o', long = "output", value_name = "RENDERED_FILE")]
    output: Option<PathBuf>,

    /// Per-record minijinja template using key, description and localized_value
    #[arg(short = 't', long = "template", value_name = "TEMPLATE")]
    template: Option<String>,

    /// Search collaborator
    #[arg(long, value_enum)]
    searcher: Option<SearcherKind>,

    /// Fail on content in the existing file that is not a key/value block
    #[arg(long)]
    strict: bool,

    /// Write keys and values without escaping double quotes
    #[arg(long)]
    no_escape: bool,

    /// Report what would change without writing
    #[arg(long)]
    dry_run: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(cli) {
        Ok(summary) => {
            tracing::debug!(?summary, "Done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Resolves settings from the config file and flags, then runs the pipeline.
fn run(cli: Cli) -> Result<RunSummary, Error> {
    let mut config_manager = ConfigManager::new(cli.project_path);
    config_manager.load_settings()?;
    config_manager.apply_overrides(Overrides {
        output: cli.output,
        template: cli.template,
        searcher: cli.searcher,
        strict: cli.strict,
        no_escape: cli.no_escape,
    })?;

    let options = RunOptions {
        project_root: config_manager.project_root().to_path_buf(),
        output: config_manager.output_path(),
        dry_run: cli.dry_run,
    };

    strings_sync::run(config_manager.get_settings(), &options)
}
