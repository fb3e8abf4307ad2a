//! [`ReadMap`] and [`MapMut`] for the standard map types.
//!
//! `HashMap` and `BTreeMap` are always available. `IndexMap` is available
//! behind the `indexmap` feature; its removals use `shift_remove` so the
//! remaining entries keep their insertion order.

use std::borrow::Borrow;
use std::collections::{btree_map, hash_map, BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use crate::error::{ViewError, ViewResult};
use crate::traits::{MapMut, ReadMap};

impl<K, V, S> ReadMap for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Key = K;
    type Value = V;
    type Iter<'a>
        = hash_map::Iter<'a, K, V>
    where
        Self: 'a;

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
    {
        HashMap::get(self, key)
    }

    fn iter(&self) -> Self::Iter<'_> {
        HashMap::iter(self)
    }
}

impl<K, V, S> MapMut for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Key = K;
    type Value = V;

    fn add(&mut self, key: K, value: V) -> ViewResult<()> {
        match self.entry(key) {
            hash_map::Entry::Occupied(_) => Err(ViewError::DuplicateKey),
            hash_map::Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(())
            }
        }
    }

    fn set(&mut self, key: K, value: V) -> ViewResult<Option<V>> {
        Ok(self.insert(key, value))
    }

    fn remove<Q>(&mut self, key: &Q) -> ViewResult<bool>
    where
        K: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
    {
        Ok(HashMap::remove(self, key).is_some())
    }

    fn clear(&mut self) -> ViewResult<()> {
        HashMap::clear(self);
        Ok(())
    }

    fn remove_entry<Q>(&mut self, key: &Q, value: &V) -> ViewResult<bool>
    where
        K: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
        V: PartialEq,
    {
        if HashMap::get(self, key) != Some(value) {
            return Ok(false);
        }
        Ok(HashMap::remove(self, key).is_some())
    }
}

impl<K, V> ReadMap for BTreeMap<K, V>
where
    K: Ord,
{
    type Key = K;
    type Value = V;
    type Iter<'a>
        = btree_map::Iter<'a, K, V>
    where
        Self: 'a;

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
    {
        BTreeMap::get(self, key)
    }

    fn iter(&self) -> Self::Iter<'_> {
        BTreeMap::iter(self)
    }
}

impl<K, V> MapMut for BTreeMap<K, V>
where
    K: Ord,
{
    type Key = K;
    type Value = V;

    fn add(&mut self, key: K, value: V) -> ViewResult<()> {
        match self.entry(key) {
            btree_map::Entry::Occupied(_) => Err(ViewError::DuplicateKey),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(())
            }
        }
    }

    fn set(&mut self, key: K, value: V) -> ViewResult<Option<V>> {
        Ok(self.insert(key, value))
    }

    fn remove<Q>(&mut self, key: &Q) -> ViewResult<bool>
    where
        K: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
    {
        Ok(BTreeMap::remove(self, key).is_some())
    }

    fn clear(&mut self) -> ViewResult<()> {
        BTreeMap::clear(self);
        Ok(())
    }

    fn remove_entry<Q>(&mut self, key: &Q, value: &V) -> ViewResult<bool>
    where
        K: Borrow<Q>,
        Q: Hash + Ord + ?Sized,
        V: PartialEq,
    {
        if BTreeMap::get(self, key) != Some(value) {
            return Ok(false);
        }
        Ok(BTreeMap::remove(self, key).is_some())
    }
}

#[cfg(feature = "indexmap")]
mod index {
    use std::borrow::Borrow;
    use std::hash::{BuildHasher, Hash};

    use indexmap::map::{Entry, Iter};
    use indexmap::IndexMap;

    use crate::error::{ViewError, ViewResult};
    use crate::traits::{MapMut, ReadMap};

    impl<K, V, S> ReadMap for IndexMap<K, V, S>
    where
        K: Eq + Hash,
        S: BuildHasher,
    {
        type Key = K;
        type Value = V;
        type Iter<'a>
            = Iter<'a, K, V>
        where
            Self: 'a;

        fn len(&self) -> usize {
            IndexMap::len(self)
        }

        fn get<Q>(&self, key: &Q) -> Option<&V>
        where
            K: Borrow<Q>,
            Q: Hash + Ord + ?Sized,
        {
            IndexMap::get(self, key)
        }

        fn iter(&self) -> Self::Iter<'_> {
            IndexMap::iter(self)
        }
    }

    impl<K, V, S> MapMut for IndexMap<K, V, S>
    where
        K: Eq + Hash,
        S: BuildHasher,
    {
        type Key = K;
        type Value = V;

        fn add(&mut self, key: K, value: V) -> ViewResult<()> {
            match self.entry(key) {
                Entry::Occupied(_) => Err(ViewError::DuplicateKey),
                Entry::Vacant(slot) => {
                    slot.insert(value);
                    Ok(())
                }
            }
        }

        fn set(&mut self, key: K, value: V) -> ViewResult<Option<V>> {
            Ok(self.insert(key, value))
        }

        fn remove<Q>(&mut self, key: &Q) -> ViewResult<bool>
        where
            K: Borrow<Q>,
            Q: Hash + Ord + ?Sized,
        {
            Ok(self.shift_remove(key).is_some())
        }

        fn clear(&mut self) -> ViewResult<()> {
            IndexMap::clear(self);
            Ok(())
        }

        fn remove_entry<Q>(&mut self, key: &Q, value: &V) -> ViewResult<bool>
        where
            K: Borrow<Q>,
            Q: Hash + Ord + ?Sized,
            V: PartialEq,
        {
            if IndexMap::get(self, key) != Some(value) {
                return Ok(false);
            }
            Ok(self.shift_remove(key).is_some())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_hash() -> HashMap<String, i32> {
        let mut map = HashMap::new();
        map.insert("a".to_string(), 1);
        map.insert("b".to_string(), 2);
        map
    }

    fn sample_btree() -> BTreeMap<String, i32> {
        sample_hash().into_iter().collect()
    }

    #[test]
    fn hash_map_reads_through_trait() {
        let map = sample_hash();
        assert_eq!(ReadMap::len(&map), 2);
        assert_eq!(ReadMap::get(&map, "a"), Some(&1));
        assert!(ReadMap::contains_key(&map, "b"));
        assert!(!ReadMap::contains_key(&map, "c"));
        assert!(map.contains_entry("a", &1));
        assert!(!map.contains_entry("a", &2));
    }

    #[test]
    fn keys_and_values_are_aligned() {
        let map = sample_hash();
        let keys: Vec<&String> = ReadMap::keys(&map).collect();
        let values: Vec<&i32> = ReadMap::values(&map).collect();
        assert_eq!(keys.len(), values.len());
        for (k, v) in keys.iter().zip(values.iter()) {
            assert_eq!(map.get(k.as_str()), Some(*v));
        }
    }

    #[test]
    fn btree_map_iterates_in_key_order() {
        let map = sample_btree();
        let keys: Vec<&str> = ReadMap::keys(&map).map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn add_rejects_duplicate_key() {
        let mut map = sample_hash();
        let err = MapMut::add(&mut map, "a".to_string(), 10).unwrap_err();
        assert_eq!(err, ViewError::DuplicateKey);
        assert_eq!(map["a"], 1);

        let mut tree = sample_btree();
        assert_eq!(
            MapMut::add(&mut tree, "b".to_string(), 20),
            Err(ViewError::DuplicateKey)
        );
        assert_eq!(tree["b"], 2);
    }

    #[test]
    fn set_overwrites_and_returns_previous() {
        let mut map = sample_hash();
        assert_eq!(MapMut::set(&mut map, "a".to_string(), 5), Ok(Some(1)));
        assert_eq!(MapMut::set(&mut map, "c".to_string(), 3), Ok(None));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn remove_entry_requires_matching_value() {
        let mut map = sample_btree();
        assert_eq!(MapMut::remove_entry(&mut map, "a", &9), Ok(false));
        assert!(map.contains_key("a"));
        assert_eq!(MapMut::remove_entry(&mut map, "a", &1), Ok(true));
        assert!(!map.contains_key("a"));
    }

    #[test]
    fn add_entry_and_clear() {
        let mut map: HashMap<String, i32> = HashMap::new();
        map.add_entry(("x".to_string(), 7)).unwrap();
        assert_eq!(map.get("x"), Some(&7));
        assert!(!MapMut::is_read_only(&map));
        MapMut::clear(&mut map).unwrap();
        assert!(ReadMap::is_empty(&map));
    }

    #[cfg(feature = "indexmap")]
    #[test]
    fn index_map_remove_keeps_insertion_order() {
        let mut map = indexmap::IndexMap::new();
        for (k, v) in [("c", 3), ("a", 1), ("b", 2)] {
            MapMut::add(&mut map, k, v).unwrap();
        }
        assert_eq!(MapMut::remove(&mut map, "a"), Ok(true));
        let keys: Vec<&&str> = ReadMap::keys(&map).collect();
        assert_eq!(keys, vec![&"c", &"b"]);
    }
}
