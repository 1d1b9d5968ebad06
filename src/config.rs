//! Configuration management and validation.
//!
//! Provides the runtime settings for batch parsing: concurrency, the lookup
//! table source, location strictness and file discovery.

use crate::constants::DEFAULT_FILE_EXTENSION;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Runtime configuration for the HL7 processor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of files parsed concurrently
    pub workers: usize,

    /// JSON lookup-table file; the embedded tables are used when absent
    pub location_tables: Option<PathBuf>,

    /// Fail a message whose location shape is unrecognized instead of
    /// keeping it with a missing location
    pub strict_location: bool,

    /// Extension of message files discovered under a directory
    pub file_extension: String,

    /// Keep admission records in parse results
    pub include_admissions: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            location_tables: None,
            strict_location: false,
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            include_admissions: true,
        }
    }
}

impl Config {
    /// Create configuration with custom worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Load lookup tables from a file instead of the embedded copy
    pub fn with_location_tables(mut self, path: impl AsRef<Path>) -> Self {
        self.location_tables = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_strict_location(mut self, strict: bool) -> Self {
        self.strict_location = strict;
        self
    }

    /// Create configuration with a custom file extension (leading dot ignored)
    pub fn with_file_extension(mut self, extension: &str) -> Self {
        self.file_extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn with_include_admissions(mut self, include: bool) -> Self {
        self.include_admissions = include;
        self
    }

    /// Read a configuration from a JSON file; missing keys take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read config {}", path.display()), e))?;
        let config: Config = serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!("Invalid config {}: {}", path.display(), e))
        })?;
        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::configuration("Worker count must be greater than 0"));
        }

        if self.file_extension.trim().is_empty() {
            return Err(Error::configuration("File extension must not be empty"));
        }

        if let Some(path) = &self.location_tables {
            if path.as_os_str().is_empty() {
                return Err(Error::configuration("Location table path must not be empty"));
            }
        }

        debug!(
            "Configuration validated: {} workers, strict location {}",
            self.workers, self.strict_location
        );
        Ok(())
    }
}
