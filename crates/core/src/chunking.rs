use crate::models::{ChunkStrategy, TextChunk};
use regex::Regex;
use std::sync::OnceLock;

pub const DEFAULT_WORDS_PER_CHUNK: usize = 500;

fn paragraph_boundary() -> &'static Regex {
    static BOUNDARY: OnceLock<Regex> = OnceLock::new();
    BOUNDARY.get_or_init(|| {
        Regex::new(r"\n\s*\n").expect("paragraph boundary pattern is a valid literal")
    })
}

/// Splits `text` into windows of `words_per_chunk` whitespace-delimited
/// words, joined back with single spaces. The final chunk may be shorter.
pub fn chunk_fixed(text: &str, words_per_chunk: usize) -> Vec<String> {
    let window = words_per_chunk.max(1);
    let words: Vec<&str> = text.split_whitespace().collect();

    words
        .chunks(window)
        .map(|group| group.join(" "))
        .collect()
}

/// Splits `text` on blank-line boundaries, trims each segment, and drops
/// segments that are empty after trimming.
pub fn chunk_paragraphs(text: &str) -> Vec<String> {
    paragraph_boundary()
        .split(text)
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(str::to_string)
        .collect()
}

/// Chunks `text` by the requested strategy, assigning zero-based sequence
/// indexes. Never fails; empty input yields an empty sequence, which callers
/// treat as an ingestion failure.
pub fn build_chunks(text: &str, strategy: ChunkStrategy, words_per_chunk: usize) -> Vec<TextChunk> {
    let pieces = match strategy {
        ChunkStrategy::Fixed => chunk_fixed(text, words_per_chunk),
        ChunkStrategy::Paragraph => chunk_paragraphs(text),
    };

    pieces
        .into_iter()
        .enumerate()
        .map(|(index, text)| TextChunk { index, text })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_chunking_covers_every_word_in_order() {
        let words: Vec<String> = (0..23).map(|n| format!("word{n}")).collect();
        let text = words.join(" ");

        let chunks = chunk_fixed(&text, 5);

        assert_eq!(chunks.len(), 5);
        for chunk in &chunks[..chunks.len() - 1] {
            assert_eq!(chunk.split_whitespace().count(), 5);
        }
        assert_eq!(chunks[4].split_whitespace().count(), 3);

        let rejoined: Vec<&str> = chunks
            .iter()
            .flat_map(|chunk| chunk.split_whitespace())
            .collect();
        assert_eq!(rejoined, words.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn fixed_chunking_of_empty_text_is_empty() {
        assert!(chunk_fixed("", 500).is_empty());
        assert!(chunk_fixed("   \n\t ", 500).is_empty());
    }

    #[test]
    fn fixed_chunking_joins_with_single_spaces() {
        let chunks = chunk_fixed("a  b\tc\nd", 10);
        assert_eq!(chunks, vec!["a b c d".to_string()]);
    }

    #[test]
    fn paragraph_chunking_drops_blank_segments() {
        let text = "  first paragraph \n\n\n second\nparagraph\n\n   \n\nthird";
        let chunks = chunk_paragraphs(text);

        assert_eq!(
            chunks,
            vec![
                "first paragraph".to_string(),
                "second\nparagraph".to_string(),
                "third".to_string(),
            ]
        );
    }

    #[test]
    fn paragraph_chunking_splits_on_whitespace_only_lines() {
        let chunks = chunk_paragraphs("one\n \t \ntwo");
        assert_eq!(chunks, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn build_chunks_assigns_sequential_indexes() {
        let chunks = build_chunks("para one.\n\npara two.", ChunkStrategy::Paragraph, 500);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[0].text, "para one.");
        assert_eq!(chunks[1].index, 1);
        assert_eq!(chunks[1].text, "para two.");
    }

    #[test]
    fn build_chunks_of_empty_input_is_empty_for_both_strategies() {
        assert!(build_chunks("", ChunkStrategy::Fixed, 500).is_empty());
        assert!(build_chunks("", ChunkStrategy::Paragraph, 500).is_empty());
    }
}
