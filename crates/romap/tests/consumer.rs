//! Consumer-side tests: a producer shares a map and hands out views.

use std::collections::{BTreeMap, HashMap};
use std::sync::mpsc;
use std::time::Duration;

use romap::{
    MapMut, ReadMap, ReadOnlyBTreeMap, ReadOnlyHashMap, SharedBTreeMap, SharedHashMap, SharedMap,
    ViewError,
};

/// Generic code written against the read-only trait.
fn total<M>(map: &M) -> i64
where
    M: ReadMap<Value = i64>,
{
    map.values().sum()
}

/// Generic code written against the writable trait.
fn try_reset<M: MapMut>(map: &mut M) -> Result<(), ViewError> {
    map.clear()
}

fn producer() -> SharedHashMap<String, i64> {
    let shared = SharedMap::new();
    shared.insert("a".to_string(), 1).unwrap();
    shared.insert("b".to_string(), 2).unwrap();
    shared
}

#[test]
fn two_entry_scenario() {
    let shared = producer();
    let mut view: ReadOnlyHashMap<String, i64> = shared.view();

    assert_eq!(view.len(), 2);
    assert_eq!(view.get("a"), Ok(1));
    assert!(!view.contains_key("c"));

    assert_eq!(
        view.remove("a"),
        Err(ViewError::NotSupported { op: "remove" })
    );
    let expected = HashMap::from([("a".to_string(), 1), ("b".to_string(), 2)]);
    assert_eq!(*shared.write(), expected);
}

#[test]
fn guard_substitutes_for_a_plain_map() {
    let shared = producer();
    let view = shared.view();

    let plain = HashMap::from([("a".to_string(), 1i64), ("b".to_string(), 2)]);
    assert_eq!(total(&view.read()), total(&plain));

    shared.insert("c".to_string(), 10).unwrap();
    assert_eq!(total(&view.read()), 13);
}

#[test]
fn view_substitutes_for_a_writable_map_but_rejects() {
    let shared = producer();
    let mut view = shared.view();

    let err = try_reset(&mut view).unwrap_err();
    assert!(err.is_read_only());
    assert_eq!(view.len(), 2);

    let mut owner = shared.clone();
    try_reset(&mut owner).unwrap();
    assert!(view.is_empty());
}

#[test]
fn views_outlive_the_producer_handle() {
    let view: ReadOnlyBTreeMap<u32, &str> = {
        let shared: SharedBTreeMap<u32, &str> = SharedMap::from(BTreeMap::from([(7, "seven")]));
        shared.view()
    };
    assert_eq!(view.get(&7), Ok("seven"));
    assert_eq!(view.keys(), vec![7]);
}

#[test]
fn views_read_across_threads() {
    let shared = producer();
    let view = shared.view();

    let reader = std::thread::spawn(move || (view.len(), view.try_get("a")));
    let (len, a) = reader.join().unwrap();
    assert_eq!(len, 2);
    assert_eq!(a, Some(1));
}

#[test]
fn view_construction_does_not_wait_for_writer() {
    let shared = producer();
    let guard = shared.write();

    let (tx, rx) = mpsc::channel();
    let handle = shared.clone();
    let builder = std::thread::spawn(move || {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let view = handle.view();
            tx.send(view).unwrap();
        });
    });

    let view = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("view construction waited on the write lock");
    drop(guard);
    builder.join().unwrap();
    assert_eq!(view.len(), 2);
}

#[test]
fn copy_into_preserves_map_order() {
    let shared = SharedMap::from(BTreeMap::from([("x", 1), ("y", 2), ("z", 3)]));
    let view = shared.view();
    let mut buffer = vec![("", 0); 3];

    view.copy_into(&mut buffer, 0).unwrap();
    assert_eq!(buffer, vec![("x", 1), ("y", 2), ("z", 3)]);

    shared.insert("w", 0).unwrap();
    let err = view.copy_into(&mut buffer, 0).unwrap_err();
    assert_eq!(
        err,
        ViewError::OutOfBounds {
            offset: 0,
            required: 4,
            capacity: 3
        }
    );
    assert_eq!(buffer, vec![("x", 1), ("y", 2), ("z", 3)]);
}

#[cfg(feature = "indexmap")]
#[test]
fn index_map_views_keep_insertion_order() {
    use romap::SharedIndexMap;

    let shared: SharedIndexMap<&str, i32> = SharedMap::new();
    for (k, v) in [("z", 26), ("a", 1), ("m", 13)] {
        shared.insert(k, v).unwrap();
    }
    let view = shared.view();
    assert_eq!(view.keys(), vec!["z", "a", "m"]);

    shared.remove("a").unwrap();
    assert_eq!(view.values(), vec![26, 13]);
}
