//! Reply splitting for Discord's message size limit
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;

/// Split a reply into pieces no longer than `max_size` bytes
///
/// Splits on line boundaries where possible and never inside a UTF-8
/// character. Lines longer than `max_size` are cut by character.
pub fn chunk_text(text: &str, max_size: usize) -> Vec<String> {
    if text.len() <= max_size {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        // +1 for the newline joining it to the next line
        if !current.is_empty() && current.len() + line.len() + 1 > max_size {
            chunks.push(std::mem::take(&mut current));
        }

        if line.len() > max_size {
            chunks.extend(split_line(line, max_size));
            continue;
        }

        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn split_line(line: &str, max_size: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();

    for ch in line.chars() {
        if current.len() + ch.len_utf8() > max_size && !current.is_empty() {
            pieces.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }

    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Chunk a reply for message content (2000 byte limit)
pub fn chunk_for_message(text: &str) -> Vec<String> {
    chunk_text(text, MESSAGE_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_chunk() {
        assert_eq!(chunk_text("hello", 100), vec!["hello"]);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(chunk_text("", 100), vec![""]);
    }

    #[test]
    fn test_splits_on_lines() {
        let result = chunk_text("line1\nline2\nline3", 12);
        assert_eq!(result, vec!["line1\nline2", "line3"]);
    }

    #[test]
    fn test_long_line_is_cut() {
        let result = chunk_text(&"a".repeat(100), 30);
        assert_eq!(result.len(), 4);
        assert!(result.iter().all(|c| c.len() <= 30));
    }

    #[test]
    fn test_message_limit() {
        let listing = "Alice: Fri May 10 2024\n".repeat(200);
        let chunks = chunk_for_message(&listing);
        assert!(chunks.len() >= 2);
        assert!(chunks.iter().all(|c| c.len() <= MESSAGE_LIMIT));
        assert!(chunks.iter().all(|c| c.ends_with("2024")));
    }

    #[test]
    fn test_utf8_safety() {
        let text = "🎂".repeat(1000);
        for chunk in chunk_for_message(&text) {
            assert!(chunk.len() <= MESSAGE_LIMIT);
            assert!(chunk.chars().all(|c| c == '🎂'));
        }
    }
}
