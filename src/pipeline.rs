//! Load → extract → merge → render.

use std::path::{
    Path,
    PathBuf,
};

use crate::analyzer::{
    CompiledRule,
    extract_all,
};
use crate::config::Settings;
use crate::error::Error;
use crate::input::strings_file::load_records;
use crate::merge::{
    MergeStats,
    override_records,
};
use crate::render::{
    Template,
    describe,
    write_records,
};
use crate::search::{
    LineSearcher,
    searcher_for,
};

/// Where a run reads and writes.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Root of the tree to scan. Searches run relative to it.
    pub project_root: PathBuf,
    /// Strings file to read and rewrite.
    pub output: PathBuf,
    /// Merge and report without touching the filesystem.
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Records extracted before merging, duplicates included
    pub extracted: usize,
    pub stats: MergeStats,
    pub output: PathBuf,
    /// False for dry runs
    pub written: bool,
}

/// Runs the pipeline with the searcher selected in `settings`.
///
/// # Errors
/// Fails on invalid rules or template, a search that cannot run, and
/// unreadable or unwritable output.
pub fn run(settings: &Settings, options: &RunOptions) -> Result<RunSummary, Error> {
    let searcher = searcher_for(settings.searcher, &settings.exclude_patterns);
    run_with(searcher.as_ref(), settings, options)
}

/// Runs the pipeline with an explicit searcher.
///
/// The output file is only created once extraction has succeeded.
///
/// # Errors
/// See [`run`].
pub fn run_with(
    searcher: &dyn LineSearcher,
    settings: &Settings,
    options: &RunOptions,
) -> Result<RunSummary, Error> {
    let template = Template::parse(&settings.template)?;
    let rules =
        settings.rules.iter().map(CompiledRule::compile).collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        project_root = %options.project_root.display(),
        output = %options.output.display(),
        template = %describe(&template),
        rules = rules.len(),
        "Starting run"
    );

    // Search before touching the output so a failed search leaves nothing behind
    let fresh = extract_all(searcher, &options.project_root, &rules)?;
    let extracted = fresh.len();

    let persisted = if options.dry_run && !options.output.exists() {
        Vec::new()
    } else {
        if !options.dry_run {
            ensure_file_exists(&options.output)?;
        }
        load_records(&options.output, settings.parse_mode, settings.escape)?
    };

    let outcome = override_records(fresh, persisted);

    if options.dry_run {
        tracing::info!(
            "Dry run: {} keys not written to {}",
            outcome.stats.total,
            options.output.display()
        );
    } else {
        write_records(&outcome.records, &template, &options.output, settings.escape)?;
    }

    Ok(RunSummary {
        extracted,
        stats: outcome.stats,
        output: options.output.clone(),
        written: !options.dry_run,
    })
}

/// Creates an empty file (and its parent directories) if nothing exists at `path`.
fn ensure_file_exists(path: &Path) -> Result<(), Error> {
    if path.exists() {
        return Ok(());
    }

    let prepare_error = |source| Error::Prepare { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(prepare_error)?;
    }
    std::fs::write(path, "").map_err(prepare_error)?;

    tracing::info!("Created empty strings file {}", path.display());
    Ok(())
}
