//! Machine comprehension (extractive question answering)

use super::{featurize, tokenize_field};
use crate::predictor::Predictor;
use modelshelf_core::{record, Error, Result};
use serde_json::{json, Value};

/// `{passage, question}` → `{best_span, best_span_str, question_tokens, passage_tokens}`
pub(crate) fn predict(predictor: &Predictor, inputs: &Value) -> Result<Value> {
    let passage = record::require_str(inputs, "passage")?;
    let question = record::require_str(inputs, "question")?;

    let passage_tokens = tokenize_field(predictor, "passage", passage)?;
    let question_tokens = tokenize_field(predictor, "question", question)?;

    let mut module_inputs = featurize(predictor, "question", &question_tokens);
    module_inputs.extend(featurize(predictor, "passage", &passage_tokens));
    let outputs = predictor.run_module(module_inputs)?;

    let best_span = outputs.ints("best_span")?;
    let &[start, end] = best_span.as_slice() else {
        return Err(Error::inference("best_span is not a [start, end] pair"));
    };

    let first = passage_tokens
        .get(usize::try_from(start).unwrap_or(usize::MAX))
        .ok_or_else(|| Error::inference(format!("span start {} is out of range", start)))?;
    let last = passage_tokens
        .get(usize::try_from(end).unwrap_or(usize::MAX))
        .ok_or_else(|| Error::inference(format!("span end {} is out of range", end)))?;
    let best_span_str = &passage[first.start..last.end];

    Ok(json!({
        "best_span": [start, end],
        "best_span_str": best_span_str,
        "question_tokens": question_tokens.iter().map(|t| t.text.as_str()).collect::<Vec<_>>(),
        "passage_tokens": passage_tokens.iter().map(|t| t.text.as_str()).collect::<Vec<_>>(),
    }))
}
