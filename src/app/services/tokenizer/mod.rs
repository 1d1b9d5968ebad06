//! HL7 v2 tokenizer
//!
//! Splits raw message text into segments and fields using the separators the
//! message declares in its own header. Fields are split lazily: a level of
//! nesting only appears where its separator occurs in the text.
//!
//! ## Architecture
//!
//! - [`separators`] - Reading the separator declaration from the header
//! - [`fields`] - Lazy field splitting and observation value coercion
//! - [`messages`] - Splitting a file's text into individual messages
//!
//! ## Usage
//!
//! ```rust
//! use hl7_processor::app::services::tokenizer::tokenize;
//!
//! let text = "MSH|^~\\&|MONITOR||||20240315120000-0400||ORU^R01|1|P|2.6\rPID|||12345\rPV1||I|EUH-4TN-T434";
//! let message = tokenize(text).unwrap();
//! assert_eq!(message.segments.len(), 3);
//! assert!(message.kinds.contains("PV1"));
//! ```

pub mod fields;
pub mod messages;
pub mod separators;

#[cfg(test)]
pub mod tests;

pub use fields::{split_field, tokenize, TokenizedMessage};
pub use messages::split_messages;
