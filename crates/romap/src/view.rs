//! The read-only map view.
//!
//! [`ReadOnlyMap`] shares a map with its producer and forwards every read to
//! it. It is a live projection: whatever the producer writes through its
//! [`SharedMap`] is visible on the next read. The inherent API has no
//! mutators at all. The [`MapMut`] impl exists only so a view can be handed
//! to code written against the writable interface, and it rejects every
//! call with [`ViewError::NotSupported`].
//!
//! Scalar reads (`get`, `try_get`, `keys`, ...) take the read lock for the
//! duration of the call and return owned data. For borrowed access and lazy
//! iteration, [`ReadOnlyMap::read`] returns a [`MapGuard`] that derefs to the
//! wrapped map.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::ops::Deref;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, TryLockError};

use tracing::debug;

use crate::error::{ViewError, ViewResult};
use crate::shared::SharedMap;
use crate::traits::{MapMut, ReadMap};

/// An immutable, live view over a shared map.
///
/// Cloning a view clones the handle; both clones observe the same map.
pub struct ReadOnlyMap<M> {
    source: Arc<RwLock<M>>,
}

impl<M: ReadMap> ReadOnlyMap<M> {
    /// Create a view over a fresh empty map.
    ///
    /// Nothing else holds the map, so the view stays empty.
    pub fn new() -> Self
    where
        M: Default,
    {
        Self::from_shared(Arc::new(RwLock::new(M::default())))
    }

    /// Create a view over the producer's map. No entries are copied.
    pub fn wrap(source: &SharedMap<M>) -> Self {
        Self::from_shared(Arc::clone(source.handle()))
    }

    /// Create a view over a lock handle the producer already holds.
    ///
    /// Construction never touches the lock, so it succeeds while a producer
    /// holds [`SharedMap::write`].
    pub fn from_shared(source: Arc<RwLock<M>>) -> Self {
        debug!(handles = Arc::strong_count(&source), "read-only view created");
        Self { source }
    }

    /// Take the read lock and return a guard for borrowed access.
    ///
    /// The guard derefs to the wrapped map and implements [`ReadMap`], so
    /// `guard.iter()` is a lazy traversal in the map's own order. Producer
    /// writes wait until the guard is dropped.
    pub fn read(&self) -> MapGuard<'_, M> {
        MapGuard {
            inner: self.source.read().unwrap_or_else(PoisonError::into_inner),
        }
    }

    /// Returns `true` if an entry exists for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        M::Key: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
    {
        self.read().contains_key(key)
    }

    /// The value stored under `key`, or `None` if absent.
    pub fn try_get<Q>(&self, key: &Q) -> Option<M::Value>
    where
        M::Key: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
        M::Value: Clone,
    {
        self.read().get(key).cloned()
    }

    /// The value stored under `key`.
    ///
    /// Fails with [`ViewError::KeyNotFound`] if absent.
    pub fn get<Q>(&self, key: &Q) -> ViewResult<M::Value>
    where
        M::Key: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
        M::Value: Clone,
    {
        self.try_get(key).ok_or(ViewError::KeyNotFound)
    }

    /// Returns `true` if `key` is present with a value equal to `value`.
    pub fn contains<Q>(&self, key: &Q, value: &M::Value) -> bool
    where
        M::Key: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
        M::Value: PartialEq,
    {
        self.read().contains_entry(key, value)
    }

    /// Snapshot of the current keys, in the map's order.
    pub fn keys(&self) -> Vec<M::Key>
    where
        M::Key: Clone,
    {
        self.read().keys().cloned().collect()
    }

    /// Snapshot of the current values, aligned with [`ReadOnlyMap::keys`].
    pub fn values(&self) -> Vec<M::Value>
    where
        M::Value: Clone,
    {
        self.read().values().cloned().collect()
    }

    /// Snapshot of the current entries, in the map's order.
    pub fn entries(&self) -> Vec<(M::Key, M::Value)>
    where
        M::Key: Clone,
        M::Value: Clone,
    {
        self.read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Always `true`.
    pub fn is_read_only(&self) -> bool {
        true
    }

    /// Copy every entry into `buffer`, starting at `offset`.
    ///
    /// Fails with [`ViewError::OutOfBounds`] if `buffer[offset..]` cannot
    /// hold [`len`](ReadOnlyMap::len) entries. The check and the copy run
    /// under one read lock, and nothing is written on failure.
    pub fn copy_into(&self, buffer: &mut [(M::Key, M::Value)], offset: usize) -> ViewResult<()>
    where
        M::Key: Clone,
        M::Value: Clone,
    {
        let map = self.read();
        let required = map.len();
        let capacity = buffer.len();
        if offset > capacity || capacity - offset < required {
            return Err(ViewError::OutOfBounds {
                offset,
                required,
                capacity,
            });
        }

        for (slot, (k, v)) in buffer[offset..].iter_mut().zip(map.iter()) {
            *slot = (k.clone(), v.clone());
        }
        Ok(())
    }

    /// Returns `true` if this view reads from `source`'s map.
    pub fn is_view_of(&self, source: &SharedMap<M>) -> bool {
        Arc::ptr_eq(&self.source, source.handle())
    }
}

impl<M: ReadMap> MapMut for ReadOnlyMap<M> {
    type Key = M::Key;
    type Value = M::Value;

    fn add(&mut self, _key: M::Key, _value: M::Value) -> ViewResult<()> {
        Err(ViewError::NotSupported { op: "add" })
    }

    fn set(&mut self, _key: M::Key, _value: M::Value) -> ViewResult<Option<M::Value>> {
        Err(ViewError::NotSupported { op: "set" })
    }

    fn remove<Q>(&mut self, _key: &Q) -> ViewResult<bool>
    where
        Self::Key: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
    {
        Err(ViewError::NotSupported { op: "remove" })
    }

    fn clear(&mut self) -> ViewResult<()> {
        Err(ViewError::NotSupported { op: "clear" })
    }

    fn remove_entry<Q>(&mut self, _key: &Q, _value: &M::Value) -> ViewResult<bool>
    where
        Self::Key: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
        Self::Value: PartialEq,
    {
        Err(ViewError::NotSupported { op: "remove_entry" })
    }

    fn add_entry(&mut self, _entry: (M::Key, M::Value)) -> ViewResult<()> {
        Err(ViewError::NotSupported { op: "add_entry" })
    }

    fn is_read_only(&self) -> bool {
        true
    }
}

impl<M> Clone for ReadOnlyMap<M> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<M: ReadMap + Default> Default for ReadOnlyMap<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: ReadMap> From<&SharedMap<M>> for ReadOnlyMap<M> {
    fn from(source: &SharedMap<M>) -> Self {
        Self::wrap(source)
    }
}

impl<M: ReadMap> TryFrom<Option<SharedMap<M>>> for ReadOnlyMap<M> {
    type Error = ViewError;

    fn try_from(source: Option<SharedMap<M>>) -> ViewResult<Self> {
        match source {
            Some(shared) => Ok(Self::wrap(&shared)),
            None => Err(ViewError::InvalidArgument { name: "source" }),
        }
    }
}

/// Prints `ReadOnlyMap(<locked>)` instead of waiting while a writer holds
/// the lock.
impl<M: fmt::Debug> fmt::Debug for ReadOnlyMap<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let map = match self.source.try_read() {
            Ok(map) => map,
            Err(TryLockError::Poisoned(e)) => e.into_inner(),
            Err(TryLockError::WouldBlock) => return f.write_str("ReadOnlyMap(<locked>)"),
        };
        f.debug_tuple("ReadOnlyMap").field(&*map).finish()
    }
}

/// Shared borrow of a view's map, held under the read lock.
pub struct MapGuard<'a, M> {
    inner: RwLockReadGuard<'a, M>,
}

impl<M> Deref for MapGuard<'_, M> {
    type Target = M;

    fn deref(&self) -> &M {
        &self.inner
    }
}

impl<M: ReadMap> ReadMap for MapGuard<'_, M> {
    type Key = M::Key;
    type Value = M::Value;
    type Iter<'b>
        = M::Iter<'b>
    where
        Self: 'b;

    fn len(&self) -> usize {
        ReadMap::len(&*self.inner)
    }

    fn get<Q>(&self, key: &Q) -> Option<&Self::Value>
    where
        Self::Key: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
    {
        ReadMap::get(&*self.inner, key)
    }

    fn iter(&self) -> Self::Iter<'_> {
        ReadMap::iter(&*self.inner)
    }
}

impl<'g, M: ReadMap> IntoIterator for &'g MapGuard<'_, M> {
    type Item = (&'g M::Key, &'g M::Value);
    type IntoIter = M::Iter<'g>;

    fn into_iter(self) -> Self::IntoIter {
        ReadMap::iter(&**self)
    }
}

impl<M: fmt::Debug> fmt::Debug for MapGuard<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}
