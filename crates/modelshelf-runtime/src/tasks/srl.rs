//! Semantic role labeling

use super::{bio_description, decode_tag_logits, featurize, tokenize_field};
use crate::predictor::Predictor;
use modelshelf_core::{record, Error, Result};
use serde_json::{json, Value};

/// `{sentence}` → `{words, verbs: [{verb, description, tags}]}`
///
/// The module locates the predicates itself and returns one tag sequence
/// per predicate.
pub(crate) fn predict(predictor: &Predictor, inputs: &Value) -> Result<Value> {
    let sentence = record::require_str(inputs, "sentence")?;
    let tokens = tokenize_field(predictor, "sentence", sentence)?;

    let outputs = predictor.run_module(featurize(predictor, "", &tokens))?;
    let verb_indices = outputs.ints("verb_indices")?;
    let tag_logits = outputs.tensor("tag_logits")?;

    let words: Vec<String> = tokens.into_iter().map(|t| t.text).collect();

    let mut verbs = Vec::with_capacity(verb_indices.len());
    for (row, &index) in verb_indices.iter().enumerate() {
        let verb = words
            .get(usize::try_from(index).unwrap_or(usize::MAX))
            .ok_or_else(|| {
                Error::inference(format!("predicate index {} is out of range", index))
            })?;
        let tags = decode_tag_logits(predictor, &tag_logits.get(row as i64), "labels")?;
        verbs.push(json!({
            "verb": verb,
            "description": bio_description(&words, &tags),
            "tags": tags,
        }));
    }

    Ok(json!({ "words": words, "verbs": verbs }))
}
