use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Deserialize;

// Static and thread-safe
pub trait Asset: 'static + Send + Sync {}

/// Name of an asset as written in level files, e.g. `assets/levels/level0.json`.
#[derive(Clone, Eq, Deserialize)]
#[serde(transparent)]
pub struct AssetPath {
    path: String,
}

impl AssetPath {
    pub fn new<S: Into<String>>(path: S) -> Self {
        Self { path: path.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }
}

impl fmt::Debug for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AssetPath").field(&self.path).finish()
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl PartialEq for AssetPath {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Hash for AssetPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl From<&str> for AssetPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// The kinds of resource a level can declare in its `assetList`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Texture,
    Text,
    Sound,
    Font,
}

impl AssetKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "texture" => Some(Self::Texture),
            "text" => Some(Self::Text),
            "sound" => Some(Self::Sound),
            "font" => Some(Self::Font),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Texture => "texture",
            Self::Text => "text",
            Self::Sound => "sound",
            Self::Font => "font",
        }
    }
}

/// Raw bytes of a loaded resource. Decoding textures, sounds and fonts is the
/// renderer's and audio backend's business.
#[derive(Debug, Clone)]
pub struct LoadedAsset {
    pub kind: AssetKind,
    pub bytes: Vec<u8>,
}

impl Asset for LoadedAsset {}

impl LoadedAsset {
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}
