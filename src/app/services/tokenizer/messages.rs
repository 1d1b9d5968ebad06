//! Message boundary detection

/// Split text holding several messages on blank lines
///
/// CRLF and lone CR line endings are normalized to LF first, so any pair of
/// line breaks is a boundary. Segments inside a message come back separated
/// by LF, which the tokenizer accepts. Leading line breaks and
/// whitespace-only chunks are dropped.
pub fn split_messages(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    normalized
        .split("\n\n")
        .map(|chunk| chunk.trim_start_matches('\n'))
        .filter(|chunk| !chunk.trim().is_empty())
        .map(str::to_string)
        .collect()
}
