//! Coreference resolution

use super::{featurize, tokenize_field};
use crate::predictor::Predictor;
use modelshelf_core::{record, Result};
use serde_json::{json, Value};

/// `{document}` → `{document, clusters}`
///
/// Clusters come back as nested `[cluster][mention][start, end]` token
/// index lists, exactly as the module emits them.
pub(crate) fn predict(predictor: &Predictor, inputs: &Value) -> Result<Value> {
    let document = record::require_str(inputs, "document")?;
    let tokens = tokenize_field(predictor, "document", document)?;

    let outputs = predictor.run_module(featurize(predictor, "", &tokens))?;
    let clusters = outputs.int_tree("clusters")?;

    let words: Vec<String> = tokens.into_iter().map(|t| t.text).collect();
    Ok(json!({ "document": words, "clusters": clusters }))
}
