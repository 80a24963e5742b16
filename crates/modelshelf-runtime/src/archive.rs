//! Model archive fetching, caching, and unpacking
//!
//! An archive is a `.tar.gz` bundling everything needed to reconstruct a
//! trained model: the construction configuration (`config.json`), the
//! vocabulary files (`vocabulary/`), and the serialized TorchScript module
//! (`model.pt`). Remote archives are downloaded once and cached under the
//! user cache directory; repeated loads reuse the unpacked tree.

use flate2::read::GzDecoder;
use modelshelf_core::{warnings, Error, Result};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Construction configuration file inside an archive
pub const CONFIG_NAME: &str = "config.json";

/// Vocabulary directory inside an archive
pub const VOCABULARY_DIR: &str = "vocabulary";

/// Serialized module file inside an archive
pub const WEIGHTS_NAME: &str = "model.pt";

/// Module file name written by pre-1.0 trainers; accepted with a warning
pub const LEGACY_WEIGHTS_NAME: &str = "weights.th";

/// An unpacked model archive
#[derive(Debug)]
pub struct ModelArchive {
    root: PathBuf,
    config: Value,
    weights: PathBuf,
    vocabulary_dir: PathBuf,
}

impl ModelArchive {
    /// Open an already-unpacked archive directory
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        let config_path = root.join(CONFIG_NAME);
        let config_file = File::open(&config_path).map_err(|e| {
            Error::archive(format!(
                "archive has no {} ({}): {}",
                CONFIG_NAME,
                config_path.display(),
                e
            ))
        })?;
        let config: Value = serde_json::from_reader(BufReader::new(config_file))?;

        let weights = Self::locate_weights(&root)?;

        let vocabulary_dir = root.join(VOCABULARY_DIR);
        if !vocabulary_dir.is_dir() {
            return Err(Error::archive(format!(
                "archive has no {}/ directory: {}",
                VOCABULARY_DIR,
                root.display()
            )));
        }

        Ok(Self {
            root,
            config,
            weights,
            vocabulary_dir,
        })
    }

    fn locate_weights(root: &Path) -> Result<PathBuf> {
        let weights = root.join(WEIGHTS_NAME);
        if weights.is_file() {
            return Ok(weights);
        }

        let legacy = root.join(LEGACY_WEIGHTS_NAME);
        if legacy.is_file() {
            warnings::warn(
                warnings::Category::Deprecation,
                &format!(
                    "archive stores its module as {}; re-package it as {}",
                    LEGACY_WEIGHTS_NAME, WEIGHTS_NAME
                ),
            );
            return Ok(legacy);
        }

        Err(Error::archive(format!(
            "archive has neither {} nor {}: {}",
            WEIGHTS_NAME,
            LEGACY_WEIGHTS_NAME,
            root.display()
        )))
    }

    /// Root directory of the unpacked archive
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Parsed construction configuration
    pub fn config(&self) -> &Value {
        &self.config
    }

    /// Path to the serialized module
    pub fn weights_path(&self) -> &Path {
        &self.weights
    }

    /// Path to the vocabulary directory
    pub fn vocabulary_dir(&self) -> &Path {
        &self.vocabulary_dir
    }
}

/// Load an archive from an HTTP(S) URL or a local path
///
/// Remote archives are downloaded into the cache on first use. Local
/// locations may point at either a packed `.tar.gz` or an already-unpacked
/// directory.
pub fn load_archive(location: &str) -> Result<ModelArchive> {
    let is_remote = location.starts_with("http://") || location.starts_with("https://");

    let packed = if is_remote {
        fetch_archive(location)?
    } else {
        let path = PathBuf::from(location);
        if path.is_dir() {
            return ModelArchive::open(path);
        }
        path
    };

    if !packed.is_file() {
        return Err(Error::fetch(format!(
            "archive not found: {}",
            packed.display()
        )));
    }

    let unpacked = extraction_dir(location)?;
    if !unpacked.join(CONFIG_NAME).is_file() {
        unpack(&packed, &unpacked)?;
    } else {
        debug!(dir = %unpacked.display(), "reusing unpacked archive");
    }

    ModelArchive::open(unpacked)
}

/// Root of the on-disk archive cache
pub fn cache_root() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("modelshelf")
        .join("archives")
}

fn cache_key(location: &str) -> String {
    let digest = Sha256::digest(location.as_bytes());
    let prefix: String = digest.iter().take(8).map(|b| format!("{:02x}", b)).collect();
    let name = location
        .rsplit('/')
        .next()
        .filter(|n| !n.is_empty())
        .unwrap_or("archive.tar.gz");
    format!("{}-{}", prefix, name)
}

fn extraction_dir(location: &str) -> Result<PathBuf> {
    let dir = cache_root().join(format!("{}.unpacked", cache_key(location)));
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn fetch_archive(url: &str) -> Result<PathBuf> {
    let target = cache_root().join(cache_key(url));
    if target.is_file() {
        debug!(path = %target.display(), "archive already cached");
        return Ok(target);
    }

    std::fs::create_dir_all(cache_root())?;
    info!(url, "downloading archive");

    let response = reqwest::blocking::get(url)
        .map_err(|e| Error::fetch(format!("failed to fetch archive {}: {}", url, e)))?;
    if !response.status().is_success() {
        return Err(Error::fetch(format!(
            "archive fetch failed ({}): {}",
            response.status(),
            url
        )));
    }
    let bytes = response
        .bytes()
        .map_err(|e| Error::fetch(format!("archive transfer interrupted for {}: {}", url, e)))?;

    // Write to a sibling first so an interrupted download never looks cached.
    let partial = target.with_extension("part");
    std::fs::write(&partial, &bytes)?;
    std::fs::rename(&partial, &target)?;

    info!(path = %target.display(), "archive cached");
    Ok(target)
}

fn unpack(packed: &Path, dest: &Path) -> Result<()> {
    debug!(archive = %packed.display(), dest = %dest.display(), "unpacking archive");

    let file = File::open(packed)?;
    let tar = GzDecoder::new(BufReader::new(file));
    let mut archive = tar::Archive::new(tar);
    // tar::Archive::unpack refuses entries that would escape `dest`.
    archive.unpack(dest).map_err(|e| {
        Error::archive(format!(
            "failed to unpack archive {}: {}",
            packed.display(),
            e
        ))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_archive_tree(root: &Path, weights_name: &str) {
        std::fs::write(
            root.join(CONFIG_NAME),
            r#"{"model": {"type": "tagger"}, "dataset_reader": {"type": "tagging"}}"#,
        )
        .unwrap();
        std::fs::create_dir_all(root.join(VOCABULARY_DIR)).unwrap();
        std::fs::write(root.join(VOCABULARY_DIR).join("labels.txt"), "O\nB-PER\n").unwrap();
        std::fs::write(root.join(weights_name), b"not a real module").unwrap();
    }

    fn pack(root: &Path, out: &Path) {
        let file = File::create(out).unwrap();
        let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);
        builder.append_dir_all(".", root).unwrap();
        builder.into_inner().unwrap().finish().unwrap().flush().unwrap();
    }

    #[test]
    fn opens_an_unpacked_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_archive_tree(dir.path(), WEIGHTS_NAME);

        let archive = ModelArchive::open(dir.path()).unwrap();
        assert_eq!(archive.config()["model"]["type"], "tagger");
        assert!(archive.weights_path().ends_with(WEIGHTS_NAME));
    }

    #[test]
    fn accepts_legacy_weights_name() {
        let dir = tempfile::tempdir().unwrap();
        write_archive_tree(dir.path(), LEGACY_WEIGHTS_NAME);

        let archive = ModelArchive::open(dir.path()).unwrap();
        assert!(archive.weights_path().ends_with(LEGACY_WEIGHTS_NAME));
    }

    #[test]
    fn missing_config_is_an_archive_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelArchive::open(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Archive(_)));
    }

    #[test]
    fn missing_weights_is_an_archive_error() {
        let dir = tempfile::tempdir().unwrap();
        write_archive_tree(dir.path(), WEIGHTS_NAME);
        std::fs::remove_file(dir.path().join(WEIGHTS_NAME)).unwrap();

        let err = ModelArchive::open(dir.path()).unwrap_err();
        assert!(err.to_string().contains(WEIGHTS_NAME));
    }

    #[test]
    fn unpacks_a_packed_archive() {
        let src = tempfile::tempdir().unwrap();
        write_archive_tree(src.path(), WEIGHTS_NAME);

        let work = tempfile::tempdir().unwrap();
        let packed = work.path().join("model.tar.gz");
        pack(src.path(), &packed);

        let dest = work.path().join("unpacked");
        unpack(&packed, &dest).unwrap();

        let archive = ModelArchive::open(&dest).unwrap();
        assert!(archive.vocabulary_dir().join("labels.txt").is_file());
    }

    #[test]
    fn cache_keys_distinguish_hosts_with_identical_filenames() {
        let a = cache_key("https://one.example.com/models/srl.tar.gz");
        let b = cache_key("https://two.example.com/models/srl.tar.gz");
        assert_ne!(a, b);
        assert!(a.ends_with("srl.tar.gz"));
    }
}
