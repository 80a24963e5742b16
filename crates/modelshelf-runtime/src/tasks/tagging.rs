//! Sentence tagging (named entity recognition)

use super::{decode_tag_logits, featurize, tokenize_field};
use crate::predictor::Predictor;
use modelshelf_core::{record, Result};
use serde_json::{json, Value};

/// `{sentence}` → `{words, tags}`
pub(crate) fn predict(predictor: &Predictor, inputs: &Value) -> Result<Value> {
    let sentence = record::require_str(inputs, "sentence")?;
    let tokens = tokenize_field(predictor, "sentence", sentence)?;

    let outputs = predictor.run_module(featurize(predictor, "", &tokens))?;
    let tags = decode_tag_logits(predictor, outputs.tensor("tag_logits")?, "labels")?;

    let words: Vec<String> = tokens.into_iter().map(|t| t.text).collect();
    Ok(json!({ "words": words, "tags": tags }))
}
