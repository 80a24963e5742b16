//! The cataloged models
//!
//! One descriptor and one accessor per published model. Accessor names are
//! citation-style slugs (`<task>_<method>_<author>_<year>`) so callers can
//! cite what they ran without tracking URLs or predictor-kind strings.

use crate::descriptor::{Fixup, ModelDescriptor};
use modelshelf_core::Result;
use modelshelf_runtime::{Predictor, PredictorKind};

/// Padding corrections for models whose bundled configuration lost the
/// character-convolution minimum width they were trained with.
const CHAR_PADDING_3: &[Fixup] = &[Fixup::MinPaddingLength {
    indexer: "token_characters",
    length: 3,
}];
const CHAR_PADDING_5: &[Fixup] = &[Fixup::MinPaddingLength {
    indexer: "token_characters",
    length: 5,
}];

// Core models

const SRL_WITH_ELMO_LUHENG_2018: ModelDescriptor = ModelDescriptor {
    name: "srl_with_elmo_luheng_2018",
    archive: "https://allennlp.s3.amazonaws.com/models/srl-model-2018.05.25.tar.gz",
    kind: PredictorKind::SemanticRoleLabeling,
    fixups: &[],
    quiet_deprecations: true,
};

const BERT_SRL_SHI_2019: ModelDescriptor = ModelDescriptor {
    name: "bert_srl_shi_2019",
    archive: "https://s3-us-west-2.amazonaws.com/allennlp/models/bert-base-srl-2019.06.17.tar.gz",
    kind: PredictorKind::SemanticRoleLabeling,
    fixups: &[],
    quiet_deprecations: true,
};

const BIDIRECTIONAL_ATTENTION_FLOW_SEO_2017: ModelDescriptor = ModelDescriptor {
    name: "bidirectional_attention_flow_seo_2017",
    archive: "https://allennlp.s3.amazonaws.com/models/bidaf-model-2017.09.15-charpad.tar.gz",
    kind: PredictorKind::MachineComprehension,
    fixups: &[],
    quiet_deprecations: true,
};

const NAQANET_DUA_2019: ModelDescriptor = ModelDescriptor {
    name: "naqanet_dua_2019",
    archive: "https://allennlp.s3.amazonaws.com/models/naqanet-2019.04.29-fixed-weight-names.tar.gz",
    kind: PredictorKind::MachineComprehension,
    fixups: &[],
    quiet_deprecations: true,
};

const OPEN_INFORMATION_EXTRACTION_STANOVSKY_2018: ModelDescriptor = ModelDescriptor {
    name: "open_information_extraction_stanovsky_2018",
    archive: "https://allennlp.s3.amazonaws.com/models/openie-model.2018-08-20.tar.gz",
    kind: PredictorKind::OpenInformationExtraction,
    fixups: &[],
    quiet_deprecations: false,
};

const DECOMPOSABLE_ATTENTION_WITH_ELMO_PARIKH_2017: ModelDescriptor = ModelDescriptor {
    name: "decomposable_attention_with_elmo_parikh_2017",
    archive: "https://allennlp.s3.amazonaws.com/models/decomposable-attention-elmo-2018.02.19.tar.gz",
    kind: PredictorKind::TextualEntailment,
    fixups: &[],
    quiet_deprecations: true,
};

const NEURAL_COREFERENCE_RESOLUTION_LEE_2017: ModelDescriptor = ModelDescriptor {
    name: "neural_coreference_resolution_lee_2017",
    archive: "https://allennlp.s3.amazonaws.com/models/coref-model-2018.02.05.tar.gz",
    kind: PredictorKind::CoreferenceResolution,
    fixups: CHAR_PADDING_5,
    quiet_deprecations: true,
};

const NAMED_ENTITY_RECOGNITION_WITH_ELMO_PETERS_2018: ModelDescriptor = ModelDescriptor {
    name: "named_entity_recognition_with_elmo_peters_2018",
    archive: "https://allennlp.s3.amazonaws.com/models/ner-model-2018.12.18.tar.gz",
    kind: PredictorKind::SentenceTagger,
    fixups: CHAR_PADDING_3,
    quiet_deprecations: true,
};

const FINE_GRAINED_NER_WITH_ELMO_PETERS_2018: ModelDescriptor = ModelDescriptor {
    name: "fine_grained_named_entity_recognition_with_elmo_peters_2018",
    archive: "https://allennlp.s3.amazonaws.com/models/fine-grained-ner-model-elmo-2018.12.21.tar.gz",
    kind: PredictorKind::SentenceTagger,
    fixups: CHAR_PADDING_3,
    quiet_deprecations: false,
};

const SPAN_BASED_CONSTITUENCY_PARSING_WITH_ELMO_JOSHI_2018: ModelDescriptor = ModelDescriptor {
    name: "span_based_constituency_parsing_with_elmo_joshi_2018",
    archive: "https://allennlp.s3.amazonaws.com/models/elmo-constituency-parser-2018.03.14.tar.gz",
    kind: PredictorKind::ConstituencyParser,
    fixups: &[],
    quiet_deprecations: true,
};

const BIAFFINE_PARSER_STANFORD_DEPENDENCIES_TODZAT_2017: ModelDescriptor = ModelDescriptor {
    name: "biaffine_parser_stanford_dependencies_todzat_2017",
    archive: "https://allennlp.s3.amazonaws.com/models/biaffine-dependency-parser-ptb-2018.08.23.tar.gz",
    kind: PredictorKind::BiaffineDependencyParser,
    fixups: &[],
    quiet_deprecations: true,
};

const BIAFFINE_PARSER_UNIVERSAL_DEPENDENCIES_TODZAT_2017: ModelDescriptor = ModelDescriptor {
    name: "biaffine_parser_universal_dependencies_todzat_2017",
    archive: "https://allennlp.s3.amazonaws.com/models/biaffine-dependency-parser-ud-2018.08.23.tar.gz",
    kind: PredictorKind::BiaffineDependencyParser,
    fixups: &[],
    quiet_deprecations: true,
};

const ESIM_NLI_WITH_ELMO_CHEN_2017: ModelDescriptor = ModelDescriptor {
    name: "esim_nli_with_elmo_chen_2017",
    archive: "https://allennlp.s3.amazonaws.com/models/esim-elmo-2018.05.17.tar.gz",
    kind: PredictorKind::TextualEntailment,
    fixups: &[],
    quiet_deprecations: true,
};

// Semantic-parsing models

const WIKITABLES_PARSER_DASIGI_2019: ModelDescriptor = ModelDescriptor {
    name: "wikitables_parser_dasigi_2019",
    archive: "https://storage.googleapis.com/allennlp-public-models/wikitables-model-2019.07.29.tar.gz",
    kind: PredictorKind::WikitablesParser,
    fixups: &[],
    quiet_deprecations: false,
};

const NLVR_PARSER_DASIGI_2019: ModelDescriptor = ModelDescriptor {
    name: "nlvr_parser_dasigi_2019",
    archive: "https://storage.googleapis.com/allennlp-public-models/nlvr-erm-model-2018-12-18-rule-vocabulary-updated.tar.gz",
    kind: PredictorKind::NlvrParser,
    fixups: &[],
    quiet_deprecations: false,
};

const ATIS_PARSER_LIN_2019: ModelDescriptor = ModelDescriptor {
    name: "atis_parser_lin_2019",
    archive: "https://storage.googleapis.com/allennlp-public-models/atis-parser-2018.11.10.tar.gz",
    kind: PredictorKind::AtisParser,
    fixups: &[],
    quiet_deprecations: false,
};

const QUAREL_PARSER_TAFJORD_2019: ModelDescriptor = ModelDescriptor {
    name: "quarel_parser_tafjord_2019",
    archive: "https://storage.googleapis.com/allennlp-public-models/quarel-parser-zero-2018.12.20.tar.gz",
    kind: PredictorKind::QuarelParser,
    fixups: &[],
    quiet_deprecations: false,
};

/// Every cataloged model, in catalog order
pub static CATALOG: [ModelDescriptor; 17] = [
    SRL_WITH_ELMO_LUHENG_2018,
    BERT_SRL_SHI_2019,
    BIDIRECTIONAL_ATTENTION_FLOW_SEO_2017,
    NAQANET_DUA_2019,
    OPEN_INFORMATION_EXTRACTION_STANOVSKY_2018,
    DECOMPOSABLE_ATTENTION_WITH_ELMO_PARIKH_2017,
    NEURAL_COREFERENCE_RESOLUTION_LEE_2017,
    NAMED_ENTITY_RECOGNITION_WITH_ELMO_PETERS_2018,
    FINE_GRAINED_NER_WITH_ELMO_PETERS_2018,
    SPAN_BASED_CONSTITUENCY_PARSING_WITH_ELMO_JOSHI_2018,
    BIAFFINE_PARSER_STANFORD_DEPENDENCIES_TODZAT_2017,
    BIAFFINE_PARSER_UNIVERSAL_DEPENDENCIES_TODZAT_2017,
    ESIM_NLI_WITH_ELMO_CHEN_2017,
    WIKITABLES_PARSER_DASIGI_2019,
    NLVR_PARSER_DASIGI_2019,
    ATIS_PARSER_LIN_2019,
    QUAREL_PARSER_TAFJORD_2019,
];

/// Span-based semantic role labeler with ELMo embeddings (He et al., 2018)
pub fn srl_with_elmo_luheng_2018() -> Result<Predictor> {
    SRL_WITH_ELMO_LUHENG_2018.load()
}

/// BERT-based semantic role labeler (Shi and Lin, 2019)
pub fn bert_srl_shi_2019() -> Result<Predictor> {
    BERT_SRL_SHI_2019.load()
}

/// BiDAF reading comprehension model (Seo et al., 2017)
pub fn bidirectional_attention_flow_seo_2017() -> Result<Predictor> {
    BIDIRECTIONAL_ATTENTION_FLOW_SEO_2017.load()
}

/// NAQANet numerically-augmented reading comprehension model, trained on
/// DROP (Dua et al., 2019)
pub fn naqanet_dua_2019() -> Result<Predictor> {
    NAQANET_DUA_2019.load()
}

/// Supervised open information extraction (Stanovsky et al., 2018)
pub fn open_information_extraction_stanovsky_2018() -> Result<Predictor> {
    OPEN_INFORMATION_EXTRACTION_STANOVSKY_2018.load()
}

/// Decomposable attention entailment model with ELMo (Parikh et al., 2017)
pub fn decomposable_attention_with_elmo_parikh_2017() -> Result<Predictor> {
    DECOMPOSABLE_ATTENTION_WITH_ELMO_PARIKH_2017.load()
}

/// End-to-end neural coreference resolution (Lee et al., 2017)
pub fn neural_coreference_resolution_lee_2017() -> Result<Predictor> {
    NEURAL_COREFERENCE_RESOLUTION_LEE_2017.load()
}

/// CoNLL-2003 named entity tagger with ELMo (Peters et al., 2018)
pub fn named_entity_recognition_with_elmo_peters_2018() -> Result<Predictor> {
    NAMED_ENTITY_RECOGNITION_WITH_ELMO_PETERS_2018.load()
}

/// OntoNotes fine-grained named entity tagger with ELMo
pub fn fine_grained_named_entity_recognition_with_elmo_peters_2018() -> Result<Predictor> {
    FINE_GRAINED_NER_WITH_ELMO_PETERS_2018.load()
}

/// Minimal span-based constituency parser with ELMo (Joshi et al., 2018)
pub fn span_based_constituency_parsing_with_elmo_joshi_2018() -> Result<Predictor> {
    SPAN_BASED_CONSTITUENCY_PARSING_WITH_ELMO_JOSHI_2018.load()
}

/// Deep biaffine attention parser producing Stanford dependencies
/// (Dozat and Manning, 2017)
pub fn biaffine_parser_stanford_dependencies_todzat_2017() -> Result<Predictor> {
    BIAFFINE_PARSER_STANFORD_DEPENDENCIES_TODZAT_2017.load()
}

/// Deep biaffine attention parser producing Universal Dependencies
pub fn biaffine_parser_universal_dependencies_todzat_2017() -> Result<Predictor> {
    BIAFFINE_PARSER_UNIVERSAL_DEPENDENCIES_TODZAT_2017.load()
}

/// ESIM entailment model with ELMo (Chen et al., 2017)
pub fn esim_nli_with_elmo_chen_2017() -> Result<Predictor> {
    ESIM_NLI_WITH_ELMO_CHEN_2017.load()
}

/// Iterative-search semantic parser for WikiTableQuestions
/// (Dasigi et al., 2019)
pub fn wikitables_parser_dasigi_2019() -> Result<Predictor> {
    WIKITABLES_PARSER_DASIGI_2019.load()
}

/// Iterative-search semantic parser for NLVR (Dasigi et al., 2019)
pub fn nlvr_parser_dasigi_2019() -> Result<Predictor> {
    NLVR_PARSER_DASIGI_2019.load()
}

/// Seq2seq-with-grammar text-to-SQL parser for ATIS
pub fn atis_parser_lin_2019() -> Result<Predictor> {
    ATIS_PARSER_LIN_2019.load()
}

/// QuaRel zero-shot qualitative-relationship parser (Tafjord et al., 2019)
pub fn quarel_parser_tafjord_2019() -> Result<Predictor> {
    QUAREL_PARSER_TAFJORD_2019.load()
}
