//! Parse command implementation
//!
//! Builds the configuration, discovers files, parses them in a batch and
//! reports either a colored summary or JSON channel rows.

use super::shared::{RunStats, create_progress_bar, plural, setup_logging};
use crate::app::services::batch::{BatchProcessor, BatchResult};
use crate::app::services::parser::Hl7Parser;
use crate::cli::args::{OutputFormat, ParseArgs};
use crate::{Error, Result};
use colored::Colorize;
use indicatif::HumanDuration;
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, info};

/// Number of failure messages printed in the summary
const SUMMARY_ERROR_LINES: usize = 10;

pub async fn run_parse(args: ParseArgs) -> Result<RunStats> {
    setup_logging(args.get_log_level(), args.quiet)?;
    info!("Starting HL7 processor");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = Arc::new(args.to_config()?);
    debug!("Configuration: {:?}", config);

    let parser = Arc::new(Hl7Parser::from_config(&config)?);
    let mut processor = BatchProcessor::new(parser, Arc::clone(&config));

    let files = processor.discover_files(&args.inputs)?;
    if files.is_empty() {
        return Err(Error::configuration(format!(
            "No .{} files found in the given inputs",
            config.file_extension
        )));
    }

    let progress = if args.show_progress() && files.len() > 1 {
        let bar = create_progress_bar(files.len() as u64, "Parsing HL7 files");
        processor = processor.with_progress(bar.clone());
        Some(bar)
    } else {
        None
    };

    let batch = processor.process_files(&files).await;

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    match args.format {
        OutputFormat::Summary => {
            if !args.quiet {
                print_summary(&batch);
            }
        }
        OutputFormat::Json => print_rows(&batch)?,
    }

    Ok(RunStats::from(&batch))
}

/// Write one JSON array of channel rows per record to stdout
fn print_rows(batch: &BatchResult) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for outcome in &batch.files {
        let Ok(result) = &outcome.result else {
            continue;
        };
        for record in &result.records {
            let json = record.to_row_json()?;
            if !json.is_empty() {
                writeln!(out, "{}", json)?;
            }
        }
    }
    Ok(())
}

fn print_summary(batch: &BatchResult) {
    let stats = &batch.stats;

    println!("\n{}", "HL7 Parsing Summary".bright_green().bold());
    println!("{}", "===================".bright_green());
    println!(
        "  {} {} file{} ({} failed)",
        "Files:".bright_cyan(),
        batch.files_processed(),
        plural(batch.files_processed()),
        batch.files_failed
    );
    println!(
        "  {} {} total, {} parsed, {} skipped, {} filtered",
        "Messages:".bright_cyan(),
        stats.total_messages,
        stats.records_parsed,
        stats.messages_skipped,
        stats.messages_filtered
    );
    println!(
        "  {} {:.1}%",
        "Success rate:".bright_cyan(),
        stats.success_rate()
    );

    if !stats.records_by_kind.is_empty() {
        println!("\n{}", "Records by kind".bold());
        for (kind, count) in &stats.records_by_kind {
            println!("  {:<10} {}", kind, count);
        }
    }

    if !stats.errors_by_kind.is_empty() {
        println!("\n{}", "Failures by kind".yellow().bold());
        for (kind, count) in &stats.errors_by_kind {
            println!("  {:<30} {}", kind.yellow(), count);
        }
        for error in stats.errors.iter().take(SUMMARY_ERROR_LINES) {
            println!("  {} {}", "-".red(), error);
        }
        if stats.errors.len() > SUMMARY_ERROR_LINES {
            println!(
                "  ... and {} more",
                stats.messages_skipped - SUMMARY_ERROR_LINES
            );
        }
    }

    for outcome in &batch.files {
        if let Err(e) = &outcome.result {
            println!("  {} {}: {}", "✗".red(), outcome.path.display(), e);
        }
    }

    println!(
        "\n  {} {}",
        "Elapsed:".bright_cyan(),
        HumanDuration(batch.elapsed)
    );
}
