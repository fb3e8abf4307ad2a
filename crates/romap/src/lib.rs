//! Read-only live views over shared key-value maps.
//!
//! A producer keeps a [`SharedMap`] and hands out [`ReadOnlyMap`] views.
//! Consumers can read everything the producer has written, including writes
//! made after the view was created, but cannot change anything through the
//! view.
//!
//! # Architecture
//!
//! - [`ReadMap`] is the read-only half of a map. Generic consumers take
//!   `&impl ReadMap`; the standard maps and [`MapGuard`] implement it.
//! - [`MapMut`] is the fallible write half. Writable maps succeed; a
//!   [`ReadOnlyMap`] rejects every call with [`ViewError::NotSupported`].
//! - [`SharedMap`] owns the map behind an `Arc<RwLock<_>>`. Every view holds
//!   a clone of that `Arc`, never a copy of the entries.
//!
//! # Modules
//!
//! - [`error`] -- [`ViewError`] and [`ViewResult`]
//! - [`traits`] -- [`ReadMap`] and [`MapMut`]
//! - [`backends`] -- impls for `HashMap`, `BTreeMap`, and `IndexMap`
//!   (feature `indexmap`)
//! - [`shared`] -- the producer handle [`SharedMap`]
//! - [`view`] -- [`ReadOnlyMap`] and its read guard [`MapGuard`]
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//!
//! use romap::{MapMut, SharedMap, ViewError};
//!
//! let shared: SharedMap<HashMap<String, i32>> = SharedMap::new();
//! shared.insert("a".to_string(), 1).unwrap();
//!
//! let mut view = shared.view();
//! assert_eq!(view.get("a"), Ok(1));
//!
//! shared.insert("b".to_string(), 2).unwrap();
//! assert_eq!(view.len(), 2);
//!
//! assert_eq!(view.remove("a"), Err(ViewError::NotSupported { op: "remove" }));
//! assert_eq!(shared.len(), 2);
//! ```

pub mod backends;
pub mod error;
pub mod shared;
pub mod traits;
pub mod view;

use std::collections::{BTreeMap, HashMap};

pub use error::{ViewError, ViewResult};
pub use shared::SharedMap;
pub use traits::{MapMut, ReadMap};
pub use view::{MapGuard, ReadOnlyMap};

/// A read-only view over a `HashMap`.
pub type ReadOnlyHashMap<K, V> = ReadOnlyMap<HashMap<K, V>>;

/// A read-only view over a `BTreeMap`.
pub type ReadOnlyBTreeMap<K, V> = ReadOnlyMap<BTreeMap<K, V>>;

/// A shared `HashMap` that hands out [`ReadOnlyHashMap`] views.
pub type SharedHashMap<K, V> = SharedMap<HashMap<K, V>>;

/// A shared `BTreeMap` that hands out [`ReadOnlyBTreeMap`] views.
pub type SharedBTreeMap<K, V> = SharedMap<BTreeMap<K, V>>;

/// A read-only view over an `IndexMap`, iterating in insertion order.
#[cfg(feature = "indexmap")]
pub type ReadOnlyIndexMap<K, V> = ReadOnlyMap<indexmap::IndexMap<K, V>>;

/// A shared `IndexMap` that hands out [`ReadOnlyIndexMap`] views.
#[cfg(feature = "indexmap")]
pub type SharedIndexMap<K, V> = SharedMap<indexmap::IndexMap<K, V>>;
