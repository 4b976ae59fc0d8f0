//! Asset lookup.
//!
//! Assets are addressed by [`NamespacedKey`] and resolved to logical paths
//! under `/assets/<namespace>/`:
//!
//! | asset              | logical path                                  |
//! |--------------------|-----------------------------------------------|
//! | texture            | `/assets/<ns>/<path>.png`                     |
//! | animation metadata | `/assets/<ns>/<path>.json`                    |
//! | shader             | `/assets/<ns>/<path>/{vertex,fragment}.glsl`  |
//! | raw resource       | `/assets/<ns>/<path>`                         |
//!
//! An [`AssetProvider`] turns a logical path into bytes. The game reads from
//! a [`DirectoryAssetProvider`]; tests use a [`MemoryAssetProvider`].

use crate::namespacedkey::NamespacedKey;
use rustc_hash::FxHashMap;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Couldn't find resource {path}")]
    NotFound { path: String },
    #[error("Couldn't read resource {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Couldn't decode {key}: {reason}")]
    Decode { key: NamespacedKey, reason: String },
    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid animation metadata for {key}: {reason}")]
    Metadata { key: NamespacedKey, reason: String },
}

pub fn resource_path(key: NamespacedKey) -> String {
    format!("/assets/{}/{}", key.namespace(), key.path())
}

pub fn texture_path(key: NamespacedKey) -> String {
    format!("{}.png", resource_path(key))
}

pub fn metadata_path(key: NamespacedKey) -> String {
    format!("{}.json", resource_path(key))
}

/// `(vertex, fragment)` source paths.
pub fn shader_paths(key: NamespacedKey) -> (String, String) {
    let base = resource_path(key);
    (format!("{}/vertex.glsl", base), format!("{}/fragment.glsl", base))
}

/// Source of raw asset bytes.
pub trait AssetProvider {
    fn read(&self, path: &str) -> Result<Vec<u8>, AssetError>;

    fn exists(&self, path: &str) -> bool;

    fn read_to_string(&self, path: &str) -> Result<String, AssetError> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|e| AssetError::Io {
            path: path.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })
    }
}

/// Reads assets from a directory that contains the `assets/` tree.
pub struct DirectoryAssetProvider {
    root: PathBuf,
}

impl DirectoryAssetProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl AssetProvider for DirectoryAssetProvider {
    fn read(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        let full = self.resolve(path);
        std::fs::read(&full).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AssetError::NotFound {
                path: full.display().to_string(),
            },
            _ => AssetError::Io {
                path: full.display().to_string(),
                source: e,
            },
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }
}

/// In-memory assets keyed by logical path.
#[derive(Default)]
pub struct MemoryAssetProvider {
    files: FxHashMap<String, Vec<u8>>,
}

impl MemoryAssetProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), bytes.into());
    }

    pub fn with(mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, bytes);
        self
    }
}

impl AssetProvider for MemoryAssetProvider {
    fn read(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        self.files.get(path).cloned().ok_or_else(|| AssetError::NotFound {
            path: path.to_string(),
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}
