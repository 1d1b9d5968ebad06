//! Shared components for CLI commands

use crate::Result;
use crate::app::services::batch::BatchResult;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

/// Totals reported back to `main` after a command
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub records_parsed: usize,
    pub messages_skipped: usize,
}

impl From<&BatchResult> for RunStats {
    fn from(batch: &BatchResult) -> Self {
        Self {
            files_processed: batch.files_processed(),
            files_failed: batch.files_failed,
            records_parsed: batch.stats.records_parsed,
            messages_skipped: batch.stats.messages_skipped,
        }
    }
}

/// Set up structured logging on stderr
///
/// `RUST_LOG` overrides the level chosen on the command line.
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hl7_processor={}", log_level)));

    if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .ok();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Create a progress bar with the standard style
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} ETA: {eta}",
        )
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Plural suffix for counts in summaries
pub fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_stats_from_batch() {
        let mut batch = BatchResult::default();
        batch.stats.records_parsed = 4;
        batch.stats.messages_skipped = 1;
        let stats = RunStats::from(&batch);
        assert_eq!(stats.records_parsed, 4);
        assert_eq!(stats.messages_skipped, 1);
        assert_eq!(stats.files_processed, 0);
    }

    #[test]
    fn test_progress_bar_length() {
        let pb = create_progress_bar(7, "Parsing");
        assert_eq!(pb.length(), Some(7));
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1), "");
        assert_eq!(plural(0), "s");
        assert_eq!(plural(2), "s");
    }
}
