//! Model descriptors and the catalog lookup table

use modelshelf_core::{suppress, Category, Result};
use modelshelf_runtime::{load_archive, Predictor, PredictorKind};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::info;

/// A declared post-construction correction for one cataloged model
///
/// Fix-ups patch known defects in a pretrained model's bundled
/// configuration. They are data on the descriptor, applied through the
/// predictor's documented setters, and idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixup {
    /// Raise a token indexer's minimum character-padding length
    MinPaddingLength {
        indexer: &'static str,
        length: usize,
    },
}

impl Fixup {
    /// Apply the correction to a freshly constructed predictor
    pub fn apply(&self, predictor: &mut Predictor) {
        match self {
            Self::MinPaddingLength { indexer, length } => {
                predictor.set_min_padding_length(indexer, *length);
            }
        }
    }
}

/// One cataloged pretrained model
///
/// Descriptors are immutable process-wide constants; identity is the
/// accessor name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelDescriptor {
    /// Accessor name, `<task>_<method>_<author>_<year>`
    pub name: &'static str,

    /// Location of the packaged model
    pub archive: &'static str,

    /// Which predictor to construct from the archive
    pub kind: PredictorKind,

    /// Corrections to apply after construction
    pub fixups: &'static [Fixup],

    /// Silence the runtime's deprecation warnings for the duration of the
    /// load (some published archives still use deprecated packaging)
    pub quiet_deprecations: bool,
}

impl ModelDescriptor {
    /// Fetch the archive, construct the predictor, apply fix-ups
    ///
    /// Fetch, deserialization, and construction failures propagate
    /// unmodified; there is no retry and no fallback.
    pub fn load(&self) -> Result<Predictor> {
        info!(model = self.name, kind = self.kind.as_str(), "loading pretrained model");

        let mut predictor = {
            let _quiet = self
                .quiet_deprecations
                .then(|| suppress(Category::Deprecation));
            let archive = load_archive(self.archive)?;
            Predictor::from_archive(&archive, self.kind)?
        };

        for fixup in self.fixups {
            fixup.apply(&mut predictor);
        }
        Ok(predictor)
    }
}

static BY_NAME: Lazy<HashMap<&'static str, &'static ModelDescriptor>> =
    Lazy::new(|| crate::models::CATALOG.iter().map(|d| (d.name, d)).collect());

/// Look up a cataloged model by accessor name
pub fn descriptor(name: &str) -> Option<&'static ModelDescriptor> {
    BY_NAME.get(name).copied()
}
