use std::collections::HashMap;
use std::path::PathBuf;

use log::{debug, info};

use crate::{AssetCache, AssetError, AssetKind, AssetPath, LoadedAsset};

/// The resource collaborator a level talks to while it preloads, loads and
/// unloads.
pub trait AssetLoader {
    fn load(&mut self, path: &AssetPath, kind: AssetKind) -> Result<(), AssetError>;
    fn unload(&mut self, path: &AssetPath);
    fn is_loaded(&self, path: &AssetPath) -> bool;
    fn retrieve_text(&self, path: &AssetPath) -> Option<&str>;
}

/// Where an [`AssetStore`] gets its bytes from.
pub trait AssetSource {
    fn read(&self, path: &AssetPath) -> Result<Vec<u8>, AssetError>;
}

/// Reads assets relative to a root directory.
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for FileSource {
    fn read(&self, path: &AssetPath) -> Result<Vec<u8>, AssetError> {
        let full = self.root.join(path.as_str());
        std::fs::read(&full).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => AssetError::NotFound(path.clone()),
            _ => AssetError::Io {
                path: path.clone(),
                source,
            },
        })
    }
}

/// Assets registered up front, for tests and embedded content.
#[derive(Default)]
pub struct MemorySource {
    files: HashMap<AssetPath, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, path: &str, text: &str) -> Self {
        self.insert(path, text.as_bytes().to_vec());
        self
    }

    pub fn with_bytes(mut self, path: &str, bytes: &[u8]) -> Self {
        self.insert(path, bytes.to_vec());
        self
    }

    pub fn insert(&mut self, path: &str, bytes: Vec<u8>) {
        self.files.insert(AssetPath::new(path), bytes);
    }
}

impl AssetSource for MemorySource {
    fn read(&self, path: &AssetPath) -> Result<Vec<u8>, AssetError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(path.clone()))
    }
}

/// Reference-counted resource map over an [`AssetSource`]. Loading a path
/// twice reads it once; it stays resident until unloaded as many times.
pub struct AssetStore<S: AssetSource> {
    source: S,
    cache: AssetCache<LoadedAsset>,
}

impl<S: AssetSource> AssetStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: AssetCache::new(),
        }
    }

    pub fn get(&self, path: &AssetPath) -> Option<&LoadedAsset> {
        let handle = self.cache.get_handle_for_path(path)?;
        self.cache.get(handle)
    }

    pub fn resident_count(&self) -> usize {
        self.cache.len()
    }

    pub fn ref_count(&self, path: &AssetPath) -> u32 {
        self.cache
            .get_handle_for_path(path)
            .map_or(0, |h| self.cache.ref_count(h))
    }
}

impl<S: AssetSource> AssetLoader for AssetStore<S> {
    fn load(&mut self, path: &AssetPath, kind: AssetKind) -> Result<(), AssetError> {
        if self.cache.retain(path).is_some() {
            debug!("{} {path} already resident", kind.as_str());
            return Ok(());
        }

        let bytes = self.source.read(path)?;
        info!("loaded {} {path} ({} bytes)", kind.as_str(), bytes.len());
        self.cache.insert(LoadedAsset { kind, bytes }, Some(path.clone()));
        Ok(())
    }

    fn unload(&mut self, path: &AssetPath) {
        let Some(handle) = self.cache.get_handle_for_path(path) else {
            debug!("unload of {path}, which is not resident");
            return;
        };
        if self.cache.release(handle).is_some() {
            info!("unloaded {path}");
        }
    }

    fn is_loaded(&self, path: &AssetPath) -> bool {
        self.cache.get_handle_for_path(path).is_some()
    }

    fn retrieve_text(&self, path: &AssetPath) -> Option<&str> {
        self.get(path).and_then(LoadedAsset::as_text)
    }
}
