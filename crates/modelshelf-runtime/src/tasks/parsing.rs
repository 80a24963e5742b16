//! Constituency and dependency parsing

use super::{decode_tag_logits, featurize, tokenize_field};
use crate::predictor::{Predictor, PredictorKind};
use modelshelf_core::{record, Result};
use serde_json::{json, Value};

pub(crate) fn predict(predictor: &Predictor, inputs: &Value) -> Result<Value> {
    let sentence = record::require_str(inputs, "sentence")?;
    let tokens = tokenize_field(predictor, "sentence", sentence)?;

    let outputs = predictor.run_module(featurize(predictor, "", &tokens))?;
    let words: Vec<String> = tokens.into_iter().map(|t| t.text).collect();

    match predictor.kind() {
        // `{sentence}` → `{trees, tokens}`; the module linearizes the tree
        PredictorKind::ConstituencyParser => Ok(json!({
            "trees": outputs.string("trees")?,
            "tokens": words,
        })),

        // `{sentence}` → `{words, predicted_heads, predicted_dependencies}`;
        // heads are 1-based token indices, 0 marking the root
        _ => {
            let heads = outputs.ints("predicted_heads")?;
            let dependencies =
                decode_tag_logits(predictor, outputs.tensor("head_tag_logits")?, "head_tags")?;
            Ok(json!({
                "words": words,
                "predicted_heads": heads,
                "predicted_dependencies": dependencies,
            }))
        }
    }
}
