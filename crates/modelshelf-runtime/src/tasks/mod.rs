//! Per-task record marshalling
//!
//! Each task module turns its input record into named module inputs, runs
//! the scripted module, and relabels the outputs into the task's record
//! shape. Nothing here computes over tensors beyond reading them out.

mod comprehension;
mod coref;
mod entailment;
mod openie;
mod parsing;
mod semparse;
mod srl;
mod tagging;

use crate::predictor::{Predictor, PredictorKind};
use crate::text::Token;
use modelshelf_core::{Error, Result};
use serde_json::Value;
use tch::{IValue, Tensor};

pub(crate) fn dispatch(predictor: &Predictor, inputs: &Value) -> Result<Value> {
    match predictor.kind() {
        PredictorKind::SentenceTagger => tagging::predict(predictor, inputs),
        PredictorKind::SemanticRoleLabeling => srl::predict(predictor, inputs),
        PredictorKind::OpenInformationExtraction => openie::predict(predictor, inputs),
        PredictorKind::MachineComprehension => comprehension::predict(predictor, inputs),
        PredictorKind::CoreferenceResolution => coref::predict(predictor, inputs),
        PredictorKind::TextualEntailment => entailment::predict(predictor, inputs),
        PredictorKind::ConstituencyParser | PredictorKind::BiaffineDependencyParser => {
            parsing::predict(predictor, inputs)
        }
        PredictorKind::WikitablesParser
        | PredictorKind::NlvrParser
        | PredictorKind::AtisParser
        | PredictorKind::QuarelParser => semparse::predict(predictor, inputs),
    }
}

/// Tokenize a text field, rejecting inputs that produce no tokens
pub(crate) fn tokenize_field(predictor: &Predictor, field: &str, text: &str) -> Result<Vec<Token>> {
    let tokens = predictor.tokenizer.tokenize(text)?;
    if tokens.is_empty() {
        return Err(Error::inference(format!(
            "`{}` field produced no tokens",
            field
        )));
    }
    Ok(tokens)
}

/// Build module inputs for one tokenized text field
///
/// One entry per token indexer the archive's reader declares, named after
/// the indexer, with `prefix_` prepended for multi-field tasks.
pub(crate) fn featurize(
    predictor: &Predictor,
    prefix: &str,
    tokens: &[Token],
) -> Vec<(String, IValue)> {
    let mut inputs = Vec::new();
    for (name, indexer) in &predictor.reader.token_indexers {
        let field = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}_{}", prefix, name)
        };
        let tensor = match indexer.kind.as_str() {
            "characters" | "token_characters" => char_ids(
                predictor,
                tokens,
                indexer.min_padding_length.unwrap_or(0),
            ),
            "elmo" | "elmo_characters" => elmo_char_ids(tokens),
            _ => token_ids(predictor, tokens),
        };
        inputs.push((field, IValue::Tensor(tensor)));
    }
    inputs
}

fn token_ids(predictor: &Predictor, tokens: &[Token]) -> Tensor {
    let ids: Vec<i64> = tokens
        .iter()
        .map(|t| predictor.vocabulary.index_of("tokens", &t.text))
        .collect();
    Tensor::from_slice(&ids).view([1, tokens.len() as i64])
}

fn char_ids(predictor: &Predictor, tokens: &[Token], min_padding_length: usize) -> Tensor {
    let width = tokens
        .iter()
        .map(|t| t.text.chars().count())
        .max()
        .unwrap_or(0)
        .max(min_padding_length)
        .max(1);

    let mut flat = Vec::with_capacity(tokens.len() * width);
    for token in tokens {
        let mut filled = 0;
        for ch in token.text.chars().take(width) {
            flat.push(
                predictor
                    .vocabulary
                    .index_of("token_characters", ch.encode_utf8(&mut [0; 4])),
            );
            filled += 1;
        }
        flat.resize(flat.len() + width - filled, 0);
    }
    Tensor::from_slice(&flat).view([1, tokens.len() as i64, width as i64])
}

/// Byte-level character ids at the fixed width ELMo models were trained with
fn elmo_char_ids(tokens: &[Token]) -> Tensor {
    const WIDTH: usize = 50;

    let mut flat = Vec::with_capacity(tokens.len() * WIDTH);
    for token in tokens {
        let mut filled = 0;
        for byte in token.text.bytes().take(WIDTH) {
            flat.push(i64::from(byte) + 1);
            filled += 1;
        }
        flat.resize(flat.len() + WIDTH - filled, 0);
    }
    Tensor::from_slice(&flat).view([1, tokens.len() as i64, WIDTH as i64])
}

/// Decode a sequence of tag logits into label strings via the vocabulary
pub(crate) fn decode_tag_logits(
    predictor: &Predictor,
    logits: &Tensor,
    namespace: &str,
) -> Result<Vec<String>> {
    let flat = logits.argmax(-1, false).view(-1);
    let ids = Vec::<i64>::try_from(&flat)
        .map_err(|e| Error::inference(format!("tag logits are not numeric: {}", e)))?;
    ids.iter()
        .map(|&id| predictor.vocabulary.token(namespace, id).map(str::to_string))
        .collect()
}

/// Render a BIO tag sequence as the bracketed description line
pub(crate) fn bio_description(words: &[String], tags: &[String]) -> String {
    let mut chunks: Vec<String> = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    let mut flush = |current: &mut Option<(String, Vec<&str>)>, chunks: &mut Vec<String>| {
        if let Some((label, words)) = current.take() {
            chunks.push(format!("[{}: {}]", label, words.join(" ")));
        }
    };

    for (word, tag) in words.iter().zip(tags) {
        if let Some(label) = tag.strip_prefix("B-") {
            flush(&mut current, &mut chunks);
            current = Some((label.to_string(), vec![word.as_str()]));
        } else if tag.starts_with("I-") && current.is_some() {
            if let Some((_, span)) = current.as_mut() {
                span.push(word.as_str());
            }
        } else {
            flush(&mut current, &mut chunks);
            chunks.push(word.clone());
        }
    }
    flush(&mut current, &mut chunks);
    chunks.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bio_description_brackets_spans() {
        let words: Vec<String> = ["He", "ate", "spaghetti", "."]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let tags: Vec<String> = ["B-ARG0", "B-V", "B-ARG1", "O"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(
            bio_description(&words, &tags),
            "[ARG0: He] [V: ate] [ARG1: spaghetti] ."
        );
    }

    #[test]
    fn bio_description_joins_multiword_spans() {
        let words: Vec<String> = ["Michael", "Jordan", "smiled"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let tags: Vec<String> = ["B-ARG0", "I-ARG0", "B-V"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(
            bio_description(&words, &tags),
            "[ARG0: Michael Jordan] [V: smiled]"
        );
    }
}
