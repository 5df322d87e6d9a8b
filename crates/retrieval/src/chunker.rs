//! Page text chunking.
//!
//! Splits page text into passages small enough for similarity scoring and
//! prompt inclusion. Paragraphs are accumulated up to a byte budget; a
//! paragraph that alone exceeds the budget is split on whitespace.

/// Default maximum bytes per chunk.
pub const DEFAULT_MAX_CHUNK_BYTES: usize = 1000;

/// Minimum bytes for a chunk to be worth indexing.
const MIN_CHUNK_BYTES: usize = 10;

/// Split page text into chunks of at most `max_bytes` bytes.
///
/// Paragraph boundaries (blank lines) are preferred split points; order is
/// preserved. Whitespace-only fragments are dropped. A single word longer
/// than the budget is emitted whole as its own oversized chunk rather than
/// cut mid-word.
pub fn chunk_text(text: &str, max_bytes: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for paragraph in text.split("\n\n") {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }

        if paragraph.len() > max_bytes {
            flush(&mut chunks, &mut current);
            split_long_paragraph(paragraph, max_bytes, &mut chunks);
            continue;
        }

        if !current.is_empty() && current.len() + paragraph.len() + 2 > max_bytes {
            flush(&mut chunks, &mut current);
        }

        if !current.is_empty() {
            current.push_str("\n\n");
        }
        current.push_str(paragraph);
    }

    flush(&mut chunks, &mut current);
    chunks
}

fn flush(chunks: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if trimmed.len() >= MIN_CHUNK_BYTES {
        chunks.push(trimmed.to_string());
    }
    current.clear();
}

/// Split an oversized paragraph on word boundaries.
fn split_long_paragraph(paragraph: &str, max_bytes: usize, chunks: &mut Vec<String>) {
    let mut current = String::new();

    for word in paragraph.split_whitespace() {
        if !current.is_empty() && current.len() + word.len() + 1 > max_bytes {
            flush(chunks, &mut current);
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    flush(chunks, &mut current);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunks = chunk_text("A single short paragraph.", 100);
        assert_eq!(chunks, vec!["A single short paragraph.".to_string()]);
    }

    #[test]
    fn test_paragraphs_accumulate_up_to_budget() {
        let text = "First paragraph here.\n\nSecond paragraph here.";
        let chunks = chunk_text(text, 100);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].contains("First paragraph"));
        assert!(chunks[0].contains("Second paragraph"));
    }

    #[test]
    fn test_budget_forces_split() {
        let text = "First paragraph here.\n\nSecond paragraph here.";
        let chunks = chunk_text(text, 25);
        assert_eq!(chunks.len(), 2);
    }

    #[test]
    fn test_long_paragraph_split_on_words() {
        let word = "revenue ";
        let text = word.repeat(50);
        let chunks = chunk_text(&text, 80);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.len() <= 80);
        }
    }

    #[test]
    fn test_overlong_word_emitted_whole() {
        let word = "a".repeat(120);
        let chunks = chunk_text(&word, 80);
        assert_eq!(chunks, vec![word]);
    }

    #[test]
    fn test_whitespace_only_dropped() {
        let chunks = chunk_text("   \n\n  \n\n ", 100);
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let text = "alpha block one.\n\nbeta block two.\n\ngamma block three.";
        let chunks = chunk_text(text, 20);
        assert_eq!(chunks.len(), 3);
        assert!(chunks[0].starts_with("alpha"));
        assert!(chunks[1].starts_with("beta"));
        assert!(chunks[2].starts_with("gamma"));
    }
}
