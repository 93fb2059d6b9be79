use std::path::PathBuf;

use cleanse_model::CleanseOptions;

use cleanse_cli::pipeline::FileOutcome;

#[derive(Debug)]
pub struct CleanResult {
    pub files: Vec<FileOutcome>,
    /// One line per input that could not be processed.
    pub errors: Vec<String>,
    pub report: Option<PathBuf>,
    pub options: CleanseOptions,
    pub dry_run: bool,
    pub has_errors: bool,
}
