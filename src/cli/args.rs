//! Command-line argument definitions for the HL7 processor
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::Config;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the HL7 feed processor
///
/// Parses bedside-monitor and admission HL7 v2 message files into typed
/// waveform, alarm, vitals and admission records.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hl7-processor",
    version,
    about = "Parse HL7 v2 monitoring feeds into typed records",
    long_about = "Parses HL7 v2 message files from bedside monitors and admission systems. \
                  Each message is tokenized with its own separators, classified as waveform, \
                  alarm, vitals or admission, and its bed location is canonicalized. Failed \
                  messages are counted and skipped."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse message files and report records or channel rows
    Parse(ParseArgs),
    /// Print the segment tree of each message in a file
    Inspect(InspectArgs),
}

/// Output format of the parse command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored summary of records and failures
    Summary,
    /// One JSON array of channel rows per message, one per line
    Json,
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// Message files or directories to parse
    ///
    /// Directories are searched recursively for files with the configured
    /// extension.
    #[arg(value_name = "PATH", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Number of files parsed concurrently
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        help = "Number of files parsed concurrently (default: CPU count)"
    )]
    pub workers: Option<usize>,

    /// Location lookup tables (JSON)
    ///
    /// Replaces the tables compiled into the binary.
    #[arg(
        short = 't',
        long = "tables",
        value_name = "FILE",
        help = "JSON location lookup tables"
    )]
    pub tables: Option<PathBuf>,

    /// Configuration file (JSON)
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Fail messages whose location encoding is unrecognized
    #[arg(
        long = "strict-location",
        help = "Fail messages with an unrecognized location encoding"
    )]
    pub strict_location: bool,

    /// Extension of files discovered in directories
    #[arg(
        long = "extension",
        value_name = "EXT",
        help = "Extension of message files inside directories (default: hl7)"
    )]
    pub extension: Option<String>,

    /// Leave admission records out of the output
    #[arg(long = "skip-admissions", help = "Leave admission records out of the output")]
    pub skip_admissions: bool,

    #[arg(
        long = "format",
        value_enum,
        default_value = "summary",
        help = "Output format for results"
    )]
    pub format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl ParseArgs {
    /// Get log level based on verbosity settings
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }

    /// Progress bars are shown for summary output unless quiet
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Summary
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<()> {
        if self.workers == Some(0) {
            return Err(Error::configuration("Worker count must be greater than 0"));
        }
        if let Some(tables) = &self.tables {
            if !tables.is_file() {
                return Err(Error::configuration(format!(
                    "Location table file not found: {}",
                    tables.display()
                )));
            }
        }
        Ok(())
    }

    /// Build the configuration: file (when given), then flags on top
    pub fn to_config(&self) -> Result<Config> {
        let mut config = match &self.config_file {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };

        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        if let Some(tables) = &self.tables {
            config = config.with_location_tables(tables);
        }
        if let Some(extension) = &self.extension {
            config = config.with_file_extension(extension);
        }
        if self.strict_location {
            config = config.with_strict_location(true);
        }
        if self.skip_admissions {
            config = config.with_include_admissions(false);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// Message file to inspect
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

impl InspectArgs {
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, false)
    }
}

fn log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    fn parse_args(argv: &[&str]) -> ParseArgs {
        match parse(argv).command {
            Some(Commands::Parse(args)) => args,
            other => panic!("expected parse command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_command_defaults() {
        let args = parse_args(&["hl7-processor", "parse", "feed.hl7"]);
        assert_eq!(args.inputs, vec![PathBuf::from("feed.hl7")]);
        assert_eq!(args.format, OutputFormat::Summary);
        assert_eq!(args.get_log_level(), "warn");
        assert!(args.show_progress());
        assert!(!args.strict_location);
    }

    #[test]
    fn test_parse_command_flags() {
        let args = parse_args(&[
            "hl7-processor",
            "parse",
            "a.hl7",
            "dir",
            "-j",
            "3",
            "--strict-location",
            "--format",
            "json",
            "--extension",
            "txt",
            "-vv",
        ]);
        assert_eq!(args.inputs.len(), 2);
        assert_eq!(args.workers, Some(3));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.get_log_level(), "debug");
        assert!(!args.show_progress());

        let config = args.to_config().unwrap();
        assert_eq!(config.workers, 3);
        assert!(config.strict_location);
        assert_eq!(config.file_extension, "txt");
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["hl7-processor", "parse", "x", "-q", "-v"]).is_err());
        let args = parse_args(&["hl7-processor", "parse", "x", "-q"]);
        assert_eq!(args.get_log_level(), "error");
        assert!(!args.show_progress());
    }

    #[test]
    fn test_parse_requires_inputs() {
        assert!(Args::try_parse_from(["hl7-processor", "parse"]).is_err());
    }

    #[test]
    fn test_validate_rejects_missing_tables() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("tables.json");
        let args = parse_args(&[
            "hl7-processor",
            "parse",
            "x",
            "--tables",
            missing.to_str().unwrap(),
        ]);
        assert!(args.validate().is_err());

        let zero = parse_args(&["hl7-processor", "parse", "x", "-j", "0"]);
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_inspect_command() {
        match parse(&["hl7-processor", "inspect", "feed.hl7", "-v"]).command {
            Some(Commands::Inspect(args)) => {
                assert_eq!(args.file, PathBuf::from("feed.hl7"));
                assert_eq!(args.get_log_level(), "info");
            }
            other => panic!("expected inspect command, got {:?}", other),
        }
    }
}
