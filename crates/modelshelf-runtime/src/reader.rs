//! Dataset-reader configuration carried by an archive
//!
//! The archive's `config.json` records how training inputs were featurized,
//! under a `dataset_reader` block. Prediction reuses that block so inputs
//! are indexed exactly the way the model was trained. The
//! `min_padding_length` of a character indexer is also the target of the
//! documented padding fix-up some cataloged models require.

use modelshelf_core::Result;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// One token indexer declared by the reader
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TokenIndexerConfig {
    /// Indexer family, e.g. `single_id`, `characters`, `elmo_characters`
    #[serde(rename = "type", default = "default_indexer_kind")]
    pub kind: String,

    /// Minimum width of character features, when the indexer has any
    #[serde(default)]
    pub min_padding_length: Option<usize>,
}

fn default_indexer_kind() -> String {
    "single_id".to_string()
}

impl TokenIndexerConfig {
    fn single_id() -> Self {
        Self {
            kind: default_indexer_kind(),
            min_padding_length: None,
        }
    }
}

/// The reader block of an archive configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReaderConfig {
    /// Token indexers by name, in deterministic order
    #[serde(default)]
    pub token_indexers: BTreeMap<String, TokenIndexerConfig>,
}

impl ReaderConfig {
    /// Extract the reader block from an archive configuration
    ///
    /// Archives for tasks whose readers take no token indexers (the
    /// semantic parsers) simply get a single-id default.
    pub fn from_archive_config(config: &Value) -> Result<Self> {
        let mut reader: Self = match config.get("dataset_reader") {
            Some(block) => serde_json::from_value(block.clone())?,
            None => Self::default(),
        };
        if reader.token_indexers.is_empty() {
            reader
                .token_indexers
                .insert("tokens".to_string(), TokenIndexerConfig::single_id());
        }
        Ok(reader)
    }

    /// Set an indexer's minimum character-padding length
    ///
    /// This is the stable setter behind [`crate::Predictor::set_min_padding_length`].
    /// Applying the same length twice is a no-op; the indexer entry is
    /// created if the reader did not declare it.
    pub fn set_min_padding_length(&mut self, indexer: &str, length: usize) {
        self.token_indexers
            .entry(indexer.to_string())
            .or_insert_with(|| TokenIndexerConfig {
                kind: "characters".to_string(),
                min_padding_length: None,
            })
            .min_padding_length = Some(length);
    }

    /// An indexer's minimum character-padding length, if configured
    pub fn min_padding_length(&self, indexer: &str) -> Option<usize> {
        self.token_indexers
            .get(indexer)
            .and_then(|i| i.min_padding_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_indexers_from_archive_config() {
        let config = json!({
            "dataset_reader": {
                "type": "tagging",
                "token_indexers": {
                    "tokens": {"type": "single_id", "lowercase_tokens": true},
                    "token_characters": {"type": "characters", "min_padding_length": 3}
                }
            }
        });

        let reader = ReaderConfig::from_archive_config(&config).unwrap();
        assert_eq!(reader.token_indexers.len(), 2);
        assert_eq!(reader.min_padding_length("token_characters"), Some(3));
        assert_eq!(reader.token_indexers["tokens"].kind, "single_id");
    }

    #[test]
    fn missing_reader_block_defaults_to_single_id() {
        let reader = ReaderConfig::from_archive_config(&json!({"model": {}})).unwrap();
        assert_eq!(reader.token_indexers.len(), 1);
        assert_eq!(reader.token_indexers["tokens"], TokenIndexerConfig::single_id());
    }

    #[test]
    fn padding_fix_up_is_idempotent() {
        let mut reader = ReaderConfig::default();
        reader.set_min_padding_length("token_characters", 5);
        let once = reader.clone();

        reader.set_min_padding_length("token_characters", 5);
        assert_eq!(reader.min_padding_length("token_characters"), once.min_padding_length("token_characters"));
    }

    #[test]
    fn padding_fix_up_creates_missing_indexers() {
        let mut reader = ReaderConfig::default();
        assert_eq!(reader.min_padding_length("token_characters"), None);

        reader.set_min_padding_length("token_characters", 3);
        assert_eq!(reader.min_padding_length("token_characters"), Some(3));
        assert_eq!(reader.token_indexers["token_characters"].kind, "characters");
    }
}
