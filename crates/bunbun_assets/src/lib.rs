mod asset;
mod assets;
mod error;
mod handle;
mod loader;

pub use crate::asset::{Asset, AssetKind, AssetPath, LoadedAsset};
pub use crate::assets::AssetCache;
pub use crate::error::AssetError;
pub use crate::handle::Handle;
pub use crate::loader::{AssetLoader, AssetSource, AssetStore, FileSource, MemorySource};
