//! Word tokenization for predictor inputs
//!
//! Sentence-level tasks split their input into words before featurization.
//! The splitting itself is delegated to the `tokenizers` crate's whitespace
//! pre-tokenizer, which separates punctuation from word characters; this
//! module only keeps the byte offsets needed to echo spans back out of the
//! original text.

use modelshelf_core::{Error, Result};
use tokenizers::pre_tokenizers::whitespace::Whitespace;
use tokenizers::{OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer};

/// A word with its byte span in the original text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Whitespace-and-punctuation word splitter
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    splitter: Whitespace,
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self { splitter: Whitespace {} }
    }
}

impl WordTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split text into words with byte offsets
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        let mut pretokenized = PreTokenizedString::from(text);
        self.splitter
            .pre_tokenize(&mut pretokenized)
            .map_err(|e| Error::inference(format!("tokenization failed: {}", e)))?;

        Ok(pretokenized
            .get_splits(OffsetReferential::Original, OffsetType::Byte)
            .into_iter()
            .map(|(piece, (start, end), _)| Token {
                text: piece.to_string(),
                start,
                end,
            })
            .collect())
    }

    /// The word strings alone, for `words` output fields
    pub fn words(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.tokenize(text)?.into_iter().map(|t| t.text).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_words_and_punctuation() {
        let tokenizer = WordTokenizer::new();
        let words = tokenizer.words("Michael Jordan is a professor at Berkeley.").unwrap();
        assert_eq!(
            words,
            vec!["Michael", "Jordan", "is", "a", "professor", "at", "Berkeley", "."]
        );
    }

    #[test]
    fn offsets_point_into_the_original_text() {
        let tokenizer = WordTokenizer::new();
        let text = "He ate spaghetti with chopsticks.";
        let tokens = tokenizer.tokenize(text).unwrap();

        for token in &tokens {
            assert_eq!(&text[token.start..token.end], token.text);
        }
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        let tokenizer = WordTokenizer::new();
        assert!(tokenizer.tokenize("").unwrap().is_empty());
    }
}
