//! The [`ReadMap`] and [`MapMut`] traits.
//!
//! [`ReadMap`] is the read-only half of a key-value map: lookups, length,
//! and borrowed iteration. Anything that only needs to inspect a map should
//! take `&impl ReadMap`, which accepts plain maps and view guards alike.
//!
//! [`MapMut`] is the write half. Every method is fallible so that a read-only
//! view can stand in where generic code asks for a writable map, rejecting
//! each call instead of silently ignoring it.

use std::borrow::Borrow;
use std::hash::Hash;

use crate::error::ViewResult;

/// Read-only access to a key-value map.
///
/// Lookup keys follow the `Borrow` pattern of the standard maps. The lookup
/// type must be both hashable and ordered so that one signature serves
/// hashed and tree-based backends; `str`, `String`, and the integer types
/// all qualify.
pub trait ReadMap {
    /// Key type.
    type Key;
    /// Value type.
    type Value;
    /// Borrowed iterator over `(key, value)` pairs, in the map's own order.
    type Iter<'a>: Iterator<Item = (&'a Self::Key, &'a Self::Value)>
    where
        Self: 'a;

    /// Number of entries.
    fn len(&self) -> usize;

    /// The value stored under `key`, if any.
    fn get<Q>(&self, key: &Q) -> Option<&Self::Value>
    where
        Self::Key: Borrow<Q>,
        Q: Hash + Ord + ?Sized;

    /// Iterate over all entries.
    ///
    /// Every call starts a fresh traversal.
    fn iter(&self) -> Self::Iter<'_>;

    /// Returns `true` if the map has no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if an entry exists for `key`.
    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Self::Key: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Iterate over keys, aligned with [`ReadMap::values`].
    fn keys(&self) -> impl Iterator<Item = &Self::Key> {
        self.iter().map(|(k, _)| k)
    }

    /// Iterate over values, aligned with [`ReadMap::keys`].
    fn values(&self) -> impl Iterator<Item = &Self::Value> {
        self.iter().map(|(_, v)| v)
    }

    /// Returns `true` if `key` is present and maps to a value equal to `value`.
    fn contains_entry<Q>(&self, key: &Q, value: &Self::Value) -> bool
    where
        Self::Key: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
        Self::Value: PartialEq,
    {
        self.get(key) == Some(value)
    }
}

/// Fallible write access to a key-value map.
///
/// Writable backends succeed (apart from [`MapMut::add`] on an existing key).
/// Read-only views fail every call with
/// [`ViewError::NotSupported`](crate::ViewError::NotSupported) and leave the
/// map untouched.
pub trait MapMut {
    /// Key type.
    type Key;
    /// Value type.
    type Value;

    /// Insert a new entry.
    ///
    /// Fails with [`ViewError::DuplicateKey`](crate::ViewError::DuplicateKey)
    /// if `key` is already present; the existing value is kept.
    fn add(&mut self, key: Self::Key, value: Self::Value) -> ViewResult<()>;

    /// Insert or overwrite the entry for `key`, returning the previous value.
    fn set(&mut self, key: Self::Key, value: Self::Value) -> ViewResult<Option<Self::Value>>;

    /// Remove the entry for `key`. Returns `true` if it existed.
    fn remove<Q>(&mut self, key: &Q) -> ViewResult<bool>
    where
        Self::Key: Borrow<Q>,
        Q: Hash + Ord + ?Sized;

    /// Remove every entry.
    fn clear(&mut self) -> ViewResult<()>;

    /// Remove the entry for `key` only if its value equals `value`.
    fn remove_entry<Q>(&mut self, key: &Q, value: &Self::Value) -> ViewResult<bool>
    where
        Self::Key: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
        Self::Value: PartialEq;

    /// Insert a `(key, value)` pair. Same semantics as [`MapMut::add`].
    fn add_entry(&mut self, entry: (Self::Key, Self::Value)) -> ViewResult<()> {
        let (key, value) = entry;
        self.add(key, value)
    }

    /// Returns `true` if every mutation on this map is rejected.
    fn is_read_only(&self) -> bool {
        false
    }
}
