//! Message-file parsing with per-message failure isolation
//!
//! ## Architecture
//!
//! - [`hl7_parser`] - Tokenize, assemble and classify one message or a file
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use hl7_processor::app::services::location::LocationTables;
//! use hl7_processor::app::services::parser::Hl7Parser;
//!
//! # fn example() -> hl7_processor::Result<()> {
//! let parser = Hl7Parser::new(Arc::new(LocationTables::embedded()?));
//! let result = parser.parse_file(std::path::Path::new("feed.hl7"))?;
//!
//! println!("Parsed {} records from {} messages",
//!          result.stats.records_parsed,
//!          result.stats.total_messages);
//! # Ok(())
//! # }
//! ```

pub mod hl7_parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use hl7_parser::Hl7Parser;
pub use stats::{ParseResult, ParseStats};
