//! Semantic parsing (wikitables, nlvr, atis, quarel)
//!
//! The parsers consume raw strings and structured context rather than
//! pre-tokenized words, so their inputs go to the module verbatim and
//! their outputs come back as already-decoded strings.

use crate::predictor::{Predictor, PredictorKind};
use modelshelf_core::{record, Result};
use serde_json::{json, Value};
use tch::IValue;

pub(crate) fn predict(predictor: &Predictor, inputs: &Value) -> Result<Value> {
    match predictor.kind() {
        // `{question, table}` → `{logical_form, answer?}`
        PredictorKind::WikitablesParser => {
            let question = record::require_str(inputs, "question")?;
            let table = record::require_str(inputs, "table")?;
            let outputs = predictor.run_module(vec![
                ("question".to_string(), IValue::String(question.to_string())),
                ("table".to_string(), IValue::String(table.to_string())),
            ])?;
            Ok(json!({
                "logical_form": outputs.string("logical_form")?,
                "answer": outputs.optional_string("answer"),
            }))
        }

        // `{sentence, structured_rep}` → `{logical_form}`
        PredictorKind::NlvrParser => {
            let sentence = record::require_str(inputs, "sentence")?;
            let structured_rep = inputs
                .get("structured_rep")
                .map(serde_json::to_string)
                .transpose()?
                .unwrap_or_default();
            let outputs = predictor.run_module(vec![
                ("sentence".to_string(), IValue::String(sentence.to_string())),
                ("structured_rep".to_string(), IValue::String(structured_rep)),
            ])?;
            Ok(json!({ "logical_form": outputs.string("logical_form")? }))
        }

        // `{utterance}` → `{predicted_sql_query}`
        PredictorKind::AtisParser => {
            let utterance = record::require_str(inputs, "utterance")?;
            let outputs = predictor.run_module(vec![(
                "utterance".to_string(),
                IValue::String(utterance.to_string()),
            )])?;
            Ok(json!({ "predicted_sql_query": outputs.string("predicted_sql_query")? }))
        }

        // `{question}` → `{answer, logical_form?}`
        _ => {
            let question = record::require_str(inputs, "question")?;
            let outputs = predictor.run_module(vec![(
                "question".to_string(),
                IValue::String(question.to_string()),
            )])?;
            Ok(json!({
                "answer": outputs.string("answer")?,
                "logical_form": outputs.optional_string("logical_form"),
            }))
        }
    }
}
