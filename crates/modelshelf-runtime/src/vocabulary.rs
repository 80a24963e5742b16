//! Archive vocabulary files
//!
//! A vocabulary directory holds one plain-text file per namespace, one
//! token per line, in index order. The runtime uses it in two directions:
//! mapping input tokens to ids, and mapping output ids back to labels.

use modelshelf_core::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

const UNKNOWN_TOKEN: &str = "@@UNKNOWN@@";

/// Fallback id when a namespace has no explicit unknown entry
const DEFAULT_UNKNOWN_INDEX: i64 = 1;

/// Token/id maps for every namespace in an archive
#[derive(Debug, Default)]
pub struct Vocabulary {
    tokens: HashMap<String, Vec<String>>,
    indices: HashMap<String, HashMap<String, i64>>,
}

impl Vocabulary {
    /// Read every namespace file from an archive's vocabulary directory
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut vocabulary = Self::default();

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if stem == "non_padded_namespaces" {
                continue;
            }

            let contents = std::fs::read_to_string(&path)?;
            let tokens: Vec<String> = contents.lines().map(str::to_string).collect();
            let indices = tokens
                .iter()
                .enumerate()
                .map(|(i, t)| (t.clone(), i as i64))
                .collect();

            vocabulary.tokens.insert(stem.to_string(), tokens);
            vocabulary.indices.insert(stem.to_string(), indices);
        }

        Ok(vocabulary)
    }

    /// Id for a token, falling back to the namespace's unknown entry
    pub fn index_of(&self, namespace: &str, token: &str) -> i64 {
        let Some(indices) = self.indices.get(namespace) else {
            return DEFAULT_UNKNOWN_INDEX;
        };
        indices
            .get(token)
            .or_else(|| indices.get(UNKNOWN_TOKEN))
            .copied()
            .unwrap_or(DEFAULT_UNKNOWN_INDEX)
    }

    /// Token text for an output id
    pub fn token(&self, namespace: &str, index: i64) -> Result<&str> {
        let tokens = self.tokens.get(namespace).ok_or_else(|| {
            Error::inference(format!("vocabulary has no `{}` namespace", namespace))
        })?;
        usize::try_from(index)
            .ok()
            .and_then(|i| tokens.get(i))
            .map(String::as_str)
            .ok_or_else(|| {
                Error::inference(format!(
                    "id {} is out of range for vocabulary namespace `{}`",
                    index, namespace
                ))
            })
    }

    /// Number of entries in a namespace, if present
    pub fn namespace_len(&self, namespace: &str) -> Option<usize> {
        self.tokens.get(namespace).map(Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vocabulary {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("tokens.txt"),
            "@@PADDING@@\n@@UNKNOWN@@\nthe\nspaghetti\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("labels.txt"), "O\nB-PER\nL-PER\nU-LOC\n").unwrap();
        std::fs::write(dir.path().join("non_padded_namespaces.txt"), "labels\n").unwrap();
        Vocabulary::from_dir(dir.path()).unwrap()
    }

    #[test]
    fn maps_tokens_both_directions() {
        let vocab = sample();
        assert_eq!(vocab.index_of("tokens", "spaghetti"), 3);
        assert_eq!(vocab.token("labels", 1).unwrap(), "B-PER");
    }

    #[test]
    fn unknown_tokens_fall_back() {
        let vocab = sample();
        assert_eq!(vocab.index_of("tokens", "chopsticks"), 1);
        assert_eq!(vocab.index_of("missing_namespace", "anything"), 1);
    }

    #[test]
    fn out_of_range_ids_are_inference_errors() {
        let vocab = sample();
        assert!(vocab.token("labels", 99).is_err());
        assert!(vocab.token("labels", -1).is_err());
    }

    #[test]
    fn bookkeeping_files_are_skipped() {
        let vocab = sample();
        assert!(vocab.namespace_len("non_padded_namespaces").is_none());
        assert_eq!(vocab.namespace_len("labels"), Some(4));
    }
}
