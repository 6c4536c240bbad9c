//! Boundary-aware sliding window splitter.
//!
//! Each passage ends at the latest natural boundary inside its window,
//! trying paragraph breaks first, then line breaks, sentence ends and
//! whitespace, before falling back to a hard cut at the size limit. The next
//! passage starts exactly `overlap` characters before that end, so stripping
//! the first `overlap` characters of every passage after the first and
//! concatenating gives back the original text.

use super::{ChunkingConfig, Passage};
use crate::error::{Result, TldwError};
use tracing::debug;

/// Places a passage may end, in order of preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Paragraph,
    Line,
    Sentence,
    Word,
}

impl Boundary {
    const PREFERENCE: [Boundary; 4] = [
        Boundary::Paragraph,
        Boundary::Line,
        Boundary::Sentence,
        Boundary::Word,
    ];

    /// Whether a passage ending just before `chars[end]` ends on this boundary.
    fn matches(self, chars: &[char], end: usize) -> bool {
        match self {
            Boundary::Paragraph => end >= 2 && chars[end - 1] == '\n' && chars[end - 2] == '\n',
            Boundary::Line => end >= 1 && chars[end - 1] == '\n',
            Boundary::Sentence => {
                end >= 2
                    && chars[end - 1].is_whitespace()
                    && matches!(chars[end - 2], '.' | '!' | '?')
            }
            Boundary::Word => end >= 1 && chars[end - 1].is_whitespace(),
        }
    }
}

/// Splits text into overlapping passages.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    config: ChunkingConfig,
}

impl TextSplitter {
    /// Create a splitter, rejecting configurations that cannot make progress.
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Split `text` into passages.
    pub fn split(&self, text: &str) -> Result<Vec<Passage>> {
        if text.is_empty() {
            return Err(TldwError::InvalidInput(
                "Cannot chunk an empty transcript".to_string(),
            ));
        }

        let chars: Vec<char> = text.chars().collect();
        let total = chars.len();
        let mut passages = Vec::new();
        let mut start = 0;

        loop {
            let end = if total - start <= self.config.max_chars {
                total
            } else {
                self.find_cut(&chars, start)
            };

            passages.push(Passage {
                content: chars[start..end].iter().collect(),
                start,
                end,
                order: passages.len(),
            });

            if end == total {
                break;
            }
            start = end - self.config.overlap;
        }

        debug!("Split {} characters into {} passages", total, passages.len());
        Ok(passages)
    }

    /// Pick the end of the passage starting at `start`.
    ///
    /// Candidates lie in the back half of the window and past the overlap,
    /// so every passage advances the start by at least one character.
    fn find_cut(&self, chars: &[char], start: usize) -> usize {
        let hi = start + self.config.max_chars;
        let lo = start + (self.config.overlap + 1).max(self.config.max_chars / 2);

        for boundary in Boundary::PREFERENCE {
            if let Some(end) = (lo..=hi).rev().find(|&end| boundary.matches(chars, end)) {
                return end;
            }
        }

        hi
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::chunk;

    fn reconstruct(passages: &[Passage], overlap: usize) -> String {
        let mut text = String::new();
        for (i, passage) in passages.iter().enumerate() {
            if i == 0 {
                text.push_str(&passage.content);
            } else {
                text.extend(passage.content.chars().skip(overlap));
            }
        }
        text
    }

    #[test]
    fn test_short_text_single_passage() {
        let passages = chunk("Hello, world!", 20, 5).unwrap();
        assert_eq!(passages.len(), 1);
        assert_eq!(passages[0].content, "Hello, world!");
        assert_eq!((passages[0].start, passages[0].end), (0, 13));
    }

    #[test]
    fn test_text_exactly_max_size() {
        let text = "a".repeat(20);
        let passages = chunk(&text, 20, 5).unwrap();
        assert_eq!(passages.len(), 1);
        assert_eq!(passages[0].content, text);
    }

    #[test]
    fn test_empty_text_rejected() {
        let err = chunk("", 20, 5).unwrap_err();
        assert!(matches!(err, TldwError::InvalidInput(_)));
    }

    #[test]
    fn test_cats_and_dogs() {
        let text = "Cats are mammals. Dogs are mammals too.";
        let passages = chunk(text, 20, 5).unwrap();

        assert!(passages.len() >= 2);
        for passage in &passages {
            assert!(passage.len() <= 20, "passage too long: {:?}", passage);
        }
        for pair in passages.windows(2) {
            assert_eq!(pair[1].start, pair[0].end - 5);
            let tail: String = pair[0].content.chars().skip(pair[0].len() - 5).collect();
            let head: String = pair[1].content.chars().take(5).collect();
            assert_eq!(tail, head);
        }

        assert_eq!(passages[0].content, "Cats are mammals. ");
        assert_eq!(reconstruct(&passages, 5), text);
    }

    #[test]
    fn test_prefers_paragraph_over_word() {
        let text = "aaaa aaaa\n\nbbbb bbbb cccc";
        let passages = chunk(text, 16, 2).unwrap();
        assert_eq!(passages[0].content, "aaaa aaaa\n\n");
        assert_eq!(reconstruct(&passages, 2), text);
    }

    #[test]
    fn test_prefers_sentence_over_word() {
        let text = "One two three. Four five six seven eight nine.";
        let passages = chunk(text, 24, 3).unwrap();
        assert_eq!(passages[0].content, "One two three. ");
    }

    #[test]
    fn test_hard_cut_without_boundaries() {
        let text = "x".repeat(45);
        let passages = chunk(&text, 10, 3).unwrap();
        for passage in &passages {
            assert_eq!(passage.content.chars().count(), passage.len());
            assert!(passage.len() <= 10);
        }
        assert_eq!(passages[0].len(), 10);
        assert_eq!(reconstruct(&passages, 3), text);
    }

    #[test]
    fn test_bounds_and_reconstruction_across_inputs() {
        let texts = [
            "The quick brown fox jumps over the lazy dog. ".repeat(12),
            "Line one\nLine two\nLine three\n\nNew paragraph here. And more!".repeat(5),
            "naïve café résumé — ünïcödé ".repeat(9),
            "nowhitespaceatallinthisverylongtranscriptline".repeat(4),
        ];
        let params = [(20, 0), (20, 5), (64, 16), (100, 99), (7, 1)];

        for text in &texts {
            for &(max, overlap) in &params {
                let passages = chunk(text, max, overlap).unwrap();
                for (i, passage) in passages.iter().enumerate() {
                    assert!(passage.len() <= max);
                    assert_eq!(passage.order, i);
                }
                assert_eq!(&reconstruct(&passages, overlap), text, "max={} overlap={}", max, overlap);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let text = "Some words repeated a few times. ".repeat(30);
        let first = chunk(&text, 50, 10).unwrap();
        let second = chunk(&text, 50, 10).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_overlap_rejected() {
        assert!(TextSplitter::new(ChunkingConfig::new(10, 10)).is_err());
    }
}
