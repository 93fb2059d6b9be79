//! Per-file cleanse runs: load, cleanse, write.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::{error, info, info_span};

use cleanse_ingest::{read_csv_table, write_csv_table};
use cleanse_model::{CleanseOptions, CleanseReport};
use cleanse_transform::{CleanseContext, cleanse};

/// Directory created next to an input when no output directory is given.
pub const DEFAULT_OUTPUT_DIR: &str = "processed";

/// Result of cleansing one file.
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    /// Written file, `None` on a dry run.
    pub output: Option<PathBuf>,
    pub report: CleanseReport,
}

/// Load options from a JSON file, or the defaults when no file is given.
///
/// Keys missing from the file keep their default value.
pub fn load_options(path: Option<&Path>) -> Result<CleanseOptions> {
    let Some(path) = path else {
        return Ok(CleanseOptions::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse config {}", path.display()))
}

/// `<output_dir>/<input file name>`, with `output_dir` defaulting to
/// `processed/` beside the input.
pub fn output_path(input: &Path, output_dir: Option<&Path>) -> Result<PathBuf> {
    let file_name = input
        .file_name()
        .ok_or_else(|| anyhow!("input has no file name: {}", input.display()))?;
    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => input
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(DEFAULT_OUTPUT_DIR),
    };
    Ok(dir.join(file_name))
}

/// Cleanse one file and write the result unless `dry_run` is set.
pub fn process_file(
    input: &Path,
    output_dir: Option<&Path>,
    ctx: &CleanseContext,
    dry_run: bool,
) -> Result<FileOutcome> {
    let span = info_span!("file", path = %input.display());
    let _guard = span.enter();

    let table = read_csv_table(input).with_context(|| format!("load {}", input.display()))?;
    let source = input
        .file_name()
        .map_or_else(|| input.display().to_string(), |name| name.to_string_lossy().into_owned());
    let (table, report) = cleanse(table, ctx, &source);

    let output = if dry_run {
        None
    } else {
        let path = output_path(input, output_dir)?;
        write_csv_table(&table, &path).with_context(|| format!("write {}", path.display()))?;
        info!(output = %path.display(), "wrote cleansed table");
        Some(path)
    };

    Ok(FileOutcome {
        input: input.to_path_buf(),
        output,
        report,
    })
}

/// Cleanse every input on its own worker thread.
///
/// Each worker owns its table; results come back in input order.
pub fn process_files(
    inputs: &[PathBuf],
    output_dir: Option<&Path>,
    ctx: &CleanseContext,
    dry_run: bool,
) -> Vec<(PathBuf, Result<FileOutcome>)> {
    std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| {
                let handle = scope.spawn(move || process_file(input, output_dir, ctx, dry_run));
                (input, handle)
            })
            .collect();
        handles
            .into_iter()
            .map(|(input, handle)| {
                let result = handle
                    .join()
                    .unwrap_or_else(|_| Err(anyhow!("worker panicked")));
                if let Err(error) = &result {
                    error!(input = %input.display(), "{error:#}");
                }
                (input.clone(), result)
            })
            .collect()
    })
}

/// Write reports as pretty JSON.
pub fn write_reports(path: &Path, reports: &[&CleanseReport]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create report directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(reports).context("serialize reports")?;
    fs::write(path, json).with_context(|| format!("write report {}", path.display()))
}
