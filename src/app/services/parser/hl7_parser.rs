//! Core HL7 parser implementation
//!
//! Orchestrates one message through tokenizer, assembler and classifier, and
//! applies that to every message of a file, counting failures instead of
//! stopping at them.

use super::stats::{ParseResult, ParseStats};
use crate::app::models::{MessageTree, RecordKind, TypedRecord};
use crate::app::services::assembler::assemble;
use crate::app::services::classifier::Classifier;
use crate::app::services::location::LocationTables;
use crate::app::services::tokenizer::{split_messages, tokenize};
use crate::config::Config;
use crate::{Error, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Parser for HL7 v2 monitoring and admission feeds
#[derive(Debug, Clone)]
pub struct Hl7Parser {
    classifier: Classifier,
    include_admissions: bool,
}

impl Hl7Parser {
    /// Create a parser sharing the given lookup tables
    pub fn new(tables: Arc<LocationTables>) -> Self {
        Self {
            classifier: Classifier::new(tables),
            include_admissions: true,
        }
    }

    /// Create a parser from configuration, loading the configured tables
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let tables = LocationTables::load(config.location_tables.as_deref())?;
        Ok(Self::with_config(Arc::new(tables), config))
    }

    /// Create a parser with already-loaded tables and configured behavior
    pub fn with_config(tables: Arc<LocationTables>, config: &Config) -> Self {
        Self {
            classifier: Classifier::new(tables).with_strict_location(config.strict_location),
            include_admissions: config.include_admissions,
        }
    }

    pub fn with_strict_location(mut self, strict: bool) -> Self {
        self.classifier = self.classifier.with_strict_location(strict);
        self
    }

    /// Tokenize and assemble one message without classifying it
    pub fn parse_tree(&self, text: &str) -> Result<MessageTree> {
        let tokenized = tokenize(text)?;
        assemble(tokenized.segments, &tokenized.kinds)
    }

    /// Parse one message into a typed record
    pub fn parse_message(&self, text: &str) -> Result<TypedRecord> {
        let tree = self.parse_tree(text)?;
        self.classifier.classify(&tree)
    }

    /// Parse every message of a text, continuing past failed messages
    pub fn parse_text(&self, text: &str) -> ParseResult {
        let mut stats = ParseStats::new();
        let mut records = Vec::new();

        for (index, message) in split_messages(text).iter().enumerate() {
            stats.total_messages += 1;

            match self.parse_message(message) {
                Ok(record) if record.kind == RecordKind::Admission && !self.include_admissions => {
                    stats.messages_filtered += 1;
                }
                Ok(record) => {
                    stats.record_success(&record);
                    records.push(record);
                }
                Err(e) => {
                    debug!("Skipped message {}: {}", index + 1, e);
                    stats.record_failure(&format!("Message {}", index + 1), &e);
                }
            }
        }

        ParseResult { records, stats }
    }

    /// Parse a message file and return records with statistics
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than failing the file.
    pub fn parse_file(&self, file_path: &Path) -> Result<ParseResult> {
        info!("Parsing HL7 file: {}", file_path.display());

        let bytes = std::fs::read(file_path).map_err(|e| {
            Error::io(format!("Failed to read file {}", file_path.display()), e)
        })?;
        let content = String::from_utf8_lossy(&bytes);

        let result = self.parse_text(&content);
        if result.stats.total_messages == 0 {
            warn!("No messages found in {}", file_path.display());
        } else {
            info!(
                "Parsed {} records from {} messages ({} skipped)",
                result.stats.records_parsed,
                result.stats.total_messages,
                result.stats.messages_skipped
            );
        }

        Ok(result)
    }
}
