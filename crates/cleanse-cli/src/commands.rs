use anyhow::Result;
use comfy_table::Table;
use tracing::{info, info_span};

use cleanse_cli::pipeline::{load_options, process_files, write_reports};
use cleanse_model::{CleanseOptions, FieldKind, error_column_name};
use cleanse_transform::CleanseContext;

use crate::cli::CleanArgs;
use crate::summary::apply_table_style;
use crate::types::CleanResult;

pub fn run_fields() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Aliases", "Error column"]);
    apply_table_style(&mut table);
    for field in FieldKind::ALL {
        let errors = if field.is_validated() {
            error_column_name(field.display_name())
        } else {
            "-".to_string()
        };
        table.add_row(vec![
            field.display_name().to_string(),
            field.aliases().join(", "),
            errors,
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_clean(args: &CleanArgs, log_data: bool) -> Result<CleanResult> {
    let span = info_span!("clean", files = args.inputs.len());
    let _guard = span.enter();

    let options = apply_overrides(load_options(args.config.as_deref())?, args, log_data);
    let ctx = CleanseContext::new(options.clone());

    let mut files = Vec::new();
    let mut errors = Vec::new();
    for (input, result) in process_files(&args.inputs, args.output_dir.as_deref(), &ctx, args.dry_run)
    {
        match result {
            Ok(outcome) => files.push(outcome),
            Err(error) => errors.push(format!("{}: {error:#}", input.display())),
        }
    }

    if let Some(path) = &args.report {
        let reports: Vec<_> = files.iter().map(|file| &file.report).collect();
        write_reports(path, &reports)?;
        info!(path = %path.display(), "wrote report");
    }

    let has_errors = !errors.is_empty();
    Ok(CleanResult {
        files,
        errors,
        report: args.report.clone(),
        options,
        dry_run: args.dry_run,
        has_errors,
    })
}

/// Command-line flags win over the config file.
pub fn apply_overrides(mut options: CleanseOptions, args: &CleanArgs, log_data: bool) -> CleanseOptions {
    if args.no_second_phone_pass {
        options.second_phone_pass = false;
    }
    if args.correct_emails {
        options.correct_misplaced_emails = true;
    }
    if args.keep_postcode_case {
        options.uppercase_postcodes = false;
    }
    if args.country_postcodes {
        options.country_postcode_check = true;
    }
    if log_data {
        options.log_data = true;
    }
    options
}
