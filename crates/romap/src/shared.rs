//! The producer-side handle to a shared map.
//!
//! [`SharedMap`] owns a map behind an `Arc<RwLock<_>>`. The producer keeps
//! the handle and mutates through it; consumers receive a
//! [`ReadOnlyMap`] from [`SharedMap::view`] that observes every change but
//! cannot make one.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard, TryLockError};

use tracing::trace;

use crate::error::ViewResult;
use crate::traits::{MapMut, ReadMap};
use crate::view::ReadOnlyMap;

/// A map shared between one producer and any number of read-only views.
///
/// Cloning a `SharedMap` clones the handle, not the map.
pub struct SharedMap<M> {
    inner: Arc<RwLock<M>>,
}

impl<M> SharedMap<M> {
    /// Create a handle owning `map`.
    pub fn from_map(map: M) -> Self {
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    /// Exclusive access for bulk edits.
    ///
    /// Readers on any view wait until the guard is dropped. Do not hold a
    /// view's read guard on the same thread while calling this, and do not
    /// read through a view on the thread holding the returned guard.
    /// Creating views and formatting them with `Debug` never wait.
    pub fn write(&self) -> RwLockWriteGuard<'_, M> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn handle(&self) -> &Arc<RwLock<M>> {
        &self.inner
    }
}

impl<M: Default> SharedMap<M> {
    /// Create a handle owning an empty map.
    pub fn new() -> Self {
        Self::from_map(M::default())
    }
}

impl<M: ReadMap> SharedMap<M> {
    /// Hand out a read-only view of this map.
    pub fn view(&self) -> ReadOnlyMap<M> {
        ReadOnlyMap::wrap(self)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<M: MapMut> SharedMap<M> {
    /// Insert or overwrite the entry for `key`, returning the previous value.
    pub fn insert(&self, key: M::Key, value: M::Value) -> ViewResult<Option<M::Value>> {
        trace!(op = "insert", "shared map write");
        self.write().set(key, value)
    }

    /// Remove the entry for `key`. Returns `true` if it existed.
    pub fn remove<Q>(&self, key: &Q) -> ViewResult<bool>
    where
        M::Key: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
    {
        trace!(op = "remove", "shared map write");
        self.write().remove(key)
    }

    /// Remove every entry.
    pub fn clear(&self) -> ViewResult<()> {
        trace!(op = "clear", "shared map write");
        self.write().clear()
    }
}

impl<M: MapMut> MapMut for SharedMap<M> {
    type Key = M::Key;
    type Value = M::Value;

    fn add(&mut self, key: M::Key, value: M::Value) -> ViewResult<()> {
        trace!(op = "add", "shared map write");
        self.write().add(key, value)
    }

    fn set(&mut self, key: M::Key, value: M::Value) -> ViewResult<Option<M::Value>> {
        SharedMap::insert(self, key, value)
    }

    fn remove<Q>(&mut self, key: &Q) -> ViewResult<bool>
    where
        Self::Key: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
    {
        SharedMap::remove(self, key)
    }

    fn clear(&mut self) -> ViewResult<()> {
        SharedMap::clear(self)
    }

    fn remove_entry<Q>(&mut self, key: &Q, value: &M::Value) -> ViewResult<bool>
    where
        Self::Key: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
        Self::Value: PartialEq,
    {
        trace!(op = "remove_entry", "shared map write");
        self.write().remove_entry(key, value)
    }

    fn is_read_only(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_read_only()
    }
}

impl<M> Clone for SharedMap<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<M: Default> Default for SharedMap<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> From<M> for SharedMap<M> {
    fn from(map: M) -> Self {
        Self::from_map(map)
    }
}

impl<M: fmt::Debug> fmt::Debug for SharedMap<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let map = match self.inner.try_read() {
            Ok(map) => map,
            Err(TryLockError::Poisoned(e)) => e.into_inner(),
            Err(TryLockError::WouldBlock) => return f.write_str("SharedMap(<locked>)"),
        };
        f.debug_tuple("SharedMap").field(&*map).finish()
    }
}
