//! Property-Based Tests for Storage Module
//!
//! Uses proptest to check the store's contract over generated operations.

use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::storage::{is_valid_entry_identifier, MemoryBackend, NamespacedStore};

// == Strategies ==
/// Generates valid entry identifiers
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,32}"
}

/// Generates JSON values of a few shapes
fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,64}".prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        prop::collection::vec(any::<u8>(), 0..8).prop_map(|v| json!(v)),
    ]
}

/// Generates a sequence of store operations for testing
#[derive(Debug, Clone)]
enum StoreOp {
    Set { key: String, value: Value },
    Remove { key: String },
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        ("[a-d]", value_strategy()).prop_map(|(key, value)| StoreOp::Set { key, value }),
        "[a-d]".prop_map(|key| StoreOp::Remove { key }),
    ]
}

fn new_store(identifier: &str) -> NamespacedStore<MemoryBackend> {
    NamespacedStore::new(Arc::new(MemoryBackend::new()), identifier)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Storing a value and reading it back returns the same value.
    #[test]
    fn prop_roundtrip_storage(key in valid_key_strategy(), value in value_strategy()) {
        let store = new_store("prop_");

        store.set(&key, value.clone(), &[], None).unwrap();

        prop_assert_eq!(store.get(&key).unwrap(), Some(value));
    }

    // After a remove, the key is gone and a second remove reports false.
    #[test]
    fn prop_remove_deletes_entry(key in valid_key_strategy(), value in value_strategy()) {
        let store = new_store("prop_");

        store.set(&key, value, &[], None).unwrap();

        prop_assert!(store.remove(&key).unwrap());
        prop_assert!(!store.has(&key).unwrap());
        prop_assert!(!store.remove(&key).unwrap());
    }

    // The store behaves like a map under any sequence of sets and removes.
    #[test]
    fn prop_matches_model(ops in prop::collection::vec(store_op_strategy(), 1..50)) {
        let store = new_store("prop_");
        let mut model: HashMap<String, Value> = HashMap::new();

        for op in ops {
            match op {
                StoreOp::Set { key, value } => {
                    store.set(&key, value.clone(), &[], None).unwrap();
                    model.insert(key, value);
                }
                StoreOp::Remove { key } => {
                    let existed = store.remove(&key).unwrap();
                    prop_assert_eq!(existed, model.remove(&key).is_some());
                }
            }
        }

        for key in ["a", "b", "c", "d"] {
            prop_assert_eq!(store.get(key).unwrap(), model.get(key).cloned());
        }
    }

    // A tag index lists each tagged key exactly once, however often it is tagged.
    #[test]
    fn prop_tag_index_is_a_set(keys in prop::collection::vec("[a-f]", 1..30)) {
        let store = new_store("prop_");

        for key in &keys {
            store.set(key, json!(1), &["grp"], None).unwrap();
        }

        let tagged = store.get_by_tag("grp").unwrap().unwrap();
        let unique: HashSet<String> = keys.iter().map(|k| format!("prop_{}", k)).collect();
        prop_assert_eq!(tagged.len(), unique.len());
        prop_assert_eq!(tagged.into_iter().collect::<HashSet<_>>(), unique);
    }

    // Flushing one namespace never touches another sharing the backend.
    #[test]
    fn prop_flush_isolation(
        own in prop::collection::hash_set("[a-z]{1,8}", 0..20),
        foreign in prop::collection::hash_set("[a-z]{1,8}", 1..20)
    ) {
        let backend = Arc::new(MemoryBackend::new());
        let first = NamespacedStore::new(Arc::clone(&backend), "first_");
        let second = NamespacedStore::new(Arc::clone(&backend), "second_");

        for key in &own {
            first.set(key, json!(key), &[], None).unwrap();
        }
        for key in &foreign {
            second.set(key, json!(key), &[], None).unwrap();
        }

        prop_assert_eq!(first.flush().unwrap(), own.len());
        prop_assert!(first.keys().unwrap().is_empty());
        for key in &foreign {
            prop_assert_eq!(second.get(key).unwrap(), Some(json!(key)));
        }
    }

    // Only letters, digits and underscores make a valid identifier.
    #[test]
    fn prop_identifier_validity(id in "\\PC{0,16}") {
        let expected = !id.is_empty()
            && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        prop_assert_eq!(is_valid_entry_identifier(&id), expected);
    }
}
