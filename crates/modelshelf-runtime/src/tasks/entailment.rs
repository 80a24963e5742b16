//! Textual entailment

use super::{featurize, tokenize_field};
use crate::predictor::Predictor;
use modelshelf_core::{record, Result};
use serde_json::{json, Value};

/// `{premise, hypothesis}` → `{label_probs}`
///
/// Probabilities are ordered entailment, contradiction, neutral.
pub(crate) fn predict(predictor: &Predictor, inputs: &Value) -> Result<Value> {
    let premise = record::require_str(inputs, "premise")?;
    let hypothesis = record::require_str(inputs, "hypothesis")?;

    let premise_tokens = tokenize_field(predictor, "premise", premise)?;
    let hypothesis_tokens = tokenize_field(predictor, "hypothesis", hypothesis)?;

    let mut module_inputs = featurize(predictor, "premise", &premise_tokens);
    module_inputs.extend(featurize(predictor, "hypothesis", &hypothesis_tokens));
    let outputs = predictor.run_module(module_inputs)?;

    Ok(json!({ "label_probs": outputs.floats("label_probs")? }))
}
