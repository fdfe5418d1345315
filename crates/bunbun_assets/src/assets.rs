use std::collections::HashMap;

use crate::asset::{Asset, AssetPath};
use crate::handle::{Handle, Index};

/// Reference-counted asset storage. Inserting a path that is already cached
/// bumps its count and hands back the existing handle; the entry is dropped
/// once every insert has been matched by a [`release`](AssetCache::release).
pub struct AssetCache<T: Asset> {
    assets: HashMap<Handle<T>, Entry<T>>,
    path_lookup: HashMap<AssetPath, Handle<T>>,
    next_index: Index,
}

impl<T: Asset> Default for AssetCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Asset> AssetCache<T> {
    pub fn new() -> Self {
        Self {
            assets: HashMap::new(),
            path_lookup: HashMap::new(),
            next_index: 0,
        }
    }

    pub fn insert(&mut self, asset: T, path: Option<AssetPath>) -> Handle<T> {
        if let Some(p) = &path {
            if let Some(existing) = self.retain(p) {
                return existing;
            }
        }

        let handle = Handle::new(self.next_index);
        self.next_index += 1;

        self.assets.insert(
            handle,
            Entry {
                asset,
                path: path.clone(),
                ref_count: 1,
            },
        );

        if let Some(p) = path {
            self.path_lookup.insert(p, handle);
        }

        handle
    }

    /// Bumps the count of a cached path and returns its handle.
    pub fn retain(&mut self, path: &AssetPath) -> Option<Handle<T>> {
        let handle = *self.path_lookup.get(path)?;
        if let Some(entry) = self.assets.get_mut(&handle) {
            entry.ref_count += 1;
        }
        Some(handle)
    }

    /// Drops one reference. Returns the asset when the last one goes.
    pub fn release(&mut self, handle: Handle<T>) -> Option<T> {
        let entry = self.assets.get_mut(&handle)?;
        entry.ref_count = entry.ref_count.saturating_sub(1);
        if entry.ref_count > 0 {
            return None;
        }

        let entry = self.assets.remove(&handle)?;
        if let Some(p) = &entry.path {
            self.path_lookup.remove(p);
        }
        Some(entry.asset)
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        self.assets.get(&handle).map(|entry| &entry.asset)
    }

    pub fn get_handle_for_path(&self, path: &AssetPath) -> Option<Handle<T>> {
        self.path_lookup.get(path).copied()
    }

    pub fn ref_count(&self, handle: Handle<T>) -> u32 {
        self.assets.get(&handle).map_or(0, |entry| entry.ref_count)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

struct Entry<T: Asset> {
    asset: T,
    path: Option<AssetPath>,
    ref_count: u32,
}
