//! Modelshelf Catalog
//!
//! A catalog of published pretrained NLP models. Every entry pairs an
//! archive URL with a predictor kind under a memorable, citation-style
//! name, so callers need to know neither; calling the accessor returns a
//! working [`modelshelf_runtime::Predictor`] with any known
//! post-construction fix-ups already applied.
//!
//! The catalog is a statically initialized table: registering a model
//! means adding an entry to [`models::CATALOG`] in source, not calling a
//! runtime API.

pub mod descriptor;
pub mod models;

pub use descriptor::{descriptor, Fixup, ModelDescriptor};
pub use models::*;
