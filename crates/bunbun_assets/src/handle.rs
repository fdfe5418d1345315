use std::{fmt, hash::Hash, hash::Hasher, marker::PhantomData};

use crate::Asset;

pub type Index = u32;

/// Typed key into an [`AssetCache`](crate::AssetCache). Cheap to copy; says
/// nothing about whether the asset is still resident.
pub struct Handle<T: Asset> {
    index: Index,
    marker: PhantomData<T>,
}

impl<T: Asset> Handle<T> {
    pub(crate) fn new(index: Index) -> Self {
        Self {
            index,
            marker: PhantomData,
        }
    }
}

impl<T: Asset> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.index).finish()
    }
}

impl<A: Asset> Hash for Handle<A> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<A: Asset> PartialEq for Handle<A> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<A: Asset> Eq for Handle<A> {}
impl<T: Asset> Copy for Handle<T> {}
impl<T: Asset> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}
