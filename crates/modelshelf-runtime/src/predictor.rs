//! Predictor construction and record-level prediction
//!
//! A predictor pairs a deserialized archive with one of a closed set of
//! task kinds. Its single operation maps a structured JSON input record to
//! a structured JSON output record; everything tensor-shaped in between is
//! delegated to the archive's scripted module.

use crate::archive::ModelArchive;
use crate::module::{Outputs, ScriptedModule};
use crate::reader::ReaderConfig;
use crate::tasks;
use crate::text::WordTokenizer;
use crate::vocabulary::Vocabulary;
use modelshelf_core::{Error, Result};
use parking_lot::Mutex;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tch::IValue;
use tracing::debug;

/// The closed vocabulary of predictor kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredictorKind {
    SemanticRoleLabeling,
    MachineComprehension,
    CoreferenceResolution,
    SentenceTagger,
    ConstituencyParser,
    BiaffineDependencyParser,
    TextualEntailment,
    OpenInformationExtraction,
    WikitablesParser,
    NlvrParser,
    AtisParser,
    QuarelParser,
}

impl PredictorKind {
    /// Every registered kind
    pub const ALL: [PredictorKind; 12] = [
        Self::SemanticRoleLabeling,
        Self::MachineComprehension,
        Self::CoreferenceResolution,
        Self::SentenceTagger,
        Self::ConstituencyParser,
        Self::BiaffineDependencyParser,
        Self::TextualEntailment,
        Self::OpenInformationExtraction,
        Self::WikitablesParser,
        Self::NlvrParser,
        Self::AtisParser,
        Self::QuarelParser,
    ];

    /// The kind's registry key
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SemanticRoleLabeling => "semantic-role-labeling",
            Self::MachineComprehension => "machine-comprehension",
            Self::CoreferenceResolution => "coreference-resolution",
            Self::SentenceTagger => "sentence-tagger",
            Self::ConstituencyParser => "constituency-parser",
            Self::BiaffineDependencyParser => "biaffine-dependency-parser",
            Self::TextualEntailment => "textual-entailment",
            Self::OpenInformationExtraction => "open-information-extraction",
            Self::WikitablesParser => "wikitables-parser",
            Self::NlvrParser => "nlvr-parser",
            Self::AtisParser => "atis-parser",
            Self::QuarelParser => "quarel-parser",
        }
    }
}

impl fmt::Display for PredictorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PredictorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::archive(format!("unknown predictor kind `{}`", s)))
    }
}

/// A task-specific inference wrapper around a deserialized model
pub struct Predictor {
    kind: PredictorKind,
    module: Mutex<ScriptedModule>,
    pub(crate) vocabulary: Vocabulary,
    pub(crate) tokenizer: WordTokenizer,
    pub(crate) reader: ReaderConfig,
}

impl Predictor {
    /// Construct a predictor of the given kind from a loaded archive
    pub fn from_archive(archive: &ModelArchive, kind: PredictorKind) -> Result<Self> {
        let reader = ReaderConfig::from_archive_config(archive.config())?;
        let vocabulary = Vocabulary::from_dir(archive.vocabulary_dir())?;
        let module = ScriptedModule::load(archive.weights_path())?;

        debug!(kind = kind.as_str(), "constructed predictor");
        Ok(Self {
            kind,
            module: Mutex::new(module),
            vocabulary,
            tokenizer: WordTokenizer::new(),
            reader,
        })
    }

    /// The kind this predictor was constructed as
    pub fn kind(&self) -> PredictorKind {
        self.kind
    }

    /// Map one structured input record to the task's output record
    pub fn predict(&self, inputs: &Value) -> Result<Value> {
        tasks::dispatch(self, inputs)
    }

    /// Set a token indexer's minimum character-padding length
    ///
    /// Stable setter for the padding fix-up a few cataloged pretrained
    /// configurations need. Idempotent; see
    /// [`ReaderConfig::set_min_padding_length`].
    pub fn set_min_padding_length(&mut self, indexer: &str, length: usize) {
        self.reader.set_min_padding_length(indexer, length);
    }

    /// A token indexer's configured minimum character-padding length
    pub fn min_padding_length(&self, indexer: &str) -> Option<usize> {
        self.reader.min_padding_length(indexer)
    }

    pub(crate) fn run_module(&self, inputs: Vec<(String, IValue)>) -> Result<Outputs> {
        self.module.lock().run(inputs)
    }
}
