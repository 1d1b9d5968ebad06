//! Separator declaration parsing

use crate::app::models::SeparatorSet;
use crate::constants::{HEADER_SEPARATOR_COUNT, HEADER_SEPARATOR_OFFSET, segments};
use crate::{Error, Result};

impl SeparatorSet {
    /// Read the separator set declared at offsets 3..8 of a header segment
    ///
    /// The text must start with the header tag. Line breaks cannot act as
    /// separators and the four data separators must be distinct.
    pub fn from_header(text: &str) -> Result<Self> {
        if !text.starts_with(segments::MSH) {
            return Err(Error::malformed_message(format!(
                "first segment is not {}",
                segments::MSH
            )));
        }

        let declared: Vec<char> = text
            .chars()
            .skip(HEADER_SEPARATOR_OFFSET)
            .take(HEADER_SEPARATOR_COUNT)
            .collect();
        if declared.len() < HEADER_SEPARATOR_COUNT {
            return Err(Error::malformed_message(
                "header too short to declare separators",
            ));
        }
        if declared.iter().any(|c| matches!(c, '\r' | '\n')) {
            return Err(Error::malformed_message(
                "line break inside separator declaration",
            ));
        }

        let separators = SeparatorSet {
            field: declared[0],
            component: declared[1],
            repetition: declared[2],
            escape: declared[3],
            subcomponent: declared[4],
        };

        let data = [
            separators.field,
            separators.component,
            separators.repetition,
            separators.subcomponent,
        ];
        for (i, c) in data.iter().enumerate() {
            if data[i + 1..].contains(c) {
                return Err(Error::malformed_message(format!(
                    "separator '{}' declared more than once",
                    c
                )));
            }
        }

        Ok(separators)
    }
}
