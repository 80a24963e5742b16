//! Modelshelf Runtime
//!
//! The framework-facing layer of Modelshelf: everything between an archive
//! URL and a working [`Predictor`].
//!
//! The hard parts are delegated to third-party crates: libtorch (via `tch`)
//! owns deserialization and execution of the archived TorchScript module,
//! and the `tokenizers` crate owns word splitting. This crate only fetches
//! and unpacks archives, reads their vocabulary and reader configuration,
//! and marshals JSON records in and out of the module.

pub mod archive;
pub mod module;
pub mod predictor;
pub mod reader;
mod tasks;
pub mod text;
pub mod vocabulary;

pub use archive::{load_archive, ModelArchive};
pub use module::{Outputs, ScriptedModule};
pub use predictor::{Predictor, PredictorKind};
pub use reader::{ReaderConfig, TokenIndexerConfig};
pub use text::{Token, WordTokenizer};
pub use vocabulary::Vocabulary;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::archive::{load_archive, ModelArchive};
    pub use crate::predictor::{Predictor, PredictorKind};
}
