//! RECSTORE - Integration Tests
//! End-to-end checks of the record store's public behavior:
//! put → get → filtered get → header → exists → touch → compound writes → delete.

use recstore::{
    Bin, ClusterOps, Config, Key, Operation, RecordClient, RecordStore, StoreError, Value,
    WritePolicy,
};

mod common {
    use recstore::{Bin, Key};

    pub fn key(user_key: &str) -> Key {
        Key::new("test", "test_set", user_key)
    }

    pub fn sample_bins(suffix: &str, second: i64) -> Vec<Bin> {
        vec![
            Bin::new("first", format!("first-{}", suffix)),
            Bin::new("second", second),
            Bin::new("third", format!("third-{}", suffix)),
        ]
    }
}

#[test]
fn test_never_put_key_is_absent() {
    let store = RecordStore::new();
    let key = common::key("never");

    assert!(!store.exists(&key));
    assert_eq!(store.get(&key), None);
    assert_eq!(store.get_header(&key), None);
    assert_eq!(store.get_bins(&key, &["first"]), None);
}

#[test]
fn test_put_get_delete() {
    let store = RecordStore::new();
    let key = common::key("Key1");
    let bins = common::sample_bins("1", 123);

    store.put(&key, &bins);
    assert!(store.exists(&key));

    let record = store.get(&key).unwrap();
    assert_eq!(record.bins.len(), 3);
    assert_eq!(record.get("first"), Some(&Value::from("first-1")));
    assert_eq!(record.get("second"), Some(&Value::Long(123)));
    assert_eq!(record.get("third"), Some(&Value::from("third-1")));

    assert!(store.delete(&key));
    assert!(!store.exists(&key));
    assert_eq!(store.get(&key), None);
    assert!(!store.delete(&key));
}

#[test]
fn test_delete_missing_key() {
    let store = RecordStore::new();
    assert!(!store.delete(&common::key("Non-key")));
}

#[test]
fn test_boolean_bins_read_back_as_integers() {
    let store = RecordStore::new();
    let key = common::key("Key3");
    store.put(
        &key,
        &[Bin::new("boolean_true", true), Bin::new("boolean_false", false)],
    );

    let record = store.get(&key).unwrap();
    assert_eq!(record.bins.len(), 2);
    assert_eq!(record.get("boolean_true"), Some(&Value::Long(1)));
    assert_eq!(record.get("boolean_false"), Some(&Value::Long(0)));
}

#[test]
fn test_header_has_no_bins() {
    let store = RecordStore::new();
    let key = common::key("Key1");
    store.put(&key, &common::sample_bins("1", 123));

    let header = store.get_header(&key).unwrap();
    assert_eq!(header.generation, 0);
    assert_eq!(header.expiration, 0);
    assert_eq!(header, store.get(&key).unwrap().header());
}

#[test]
fn test_exists_many_is_positional() {
    let store = RecordStore::new();
    let (a, b, c) = (common::key("a"), common::key("b"), common::key("c"));
    store.put(&a, &[Bin::new("x", 1i64)]);
    store.put(&b, &[Bin::new("x", 2i64)]);

    assert_eq!(
        store.exists_many(&[a.clone(), b.clone(), c.clone()]),
        vec![true, true, false]
    );
    assert_eq!(
        store.exists_many(&[c.clone(), a.clone(), c.clone(), a]),
        vec![false, true, false, true]
    );
    assert!(store.exists_many(&[]).is_empty());
}

#[test]
fn test_filtered_get() {
    let store = RecordStore::new();
    let key = common::key("Key1");
    store.put(&key, &common::sample_bins("1", 123));
    store.touch(&key, Some(&WritePolicy::with_expiration(1000))).unwrap();

    let partial = store.get_bins(&key, &["first", "second"]).unwrap();
    assert_eq!(partial.bins.len(), 2);
    assert_eq!(partial.get("first"), Some(&Value::from("first-1")));
    assert_eq!(partial.get("second"), Some(&Value::Long(123)));
    assert_eq!(partial.header(), store.get_header(&key).unwrap());

    let partial = store.get_bins(&key, &["first", "nope"]).unwrap();
    assert_eq!(partial.bins.len(), 2);
    assert_eq!(partial.bins.get("nope"), Some(&None));
}

#[test]
fn test_batch_reads() {
    let store = RecordStore::new();
    let keys = vec![common::key("Key1"), common::key("Key2"), common::key("Non-key")];
    store.put(&keys[0], &common::sample_bins("1", 123));
    store.put(&keys[1], &common::sample_bins("2", 124));

    let records = store.get_many(&keys);
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].as_ref().unwrap().get("first"), Some(&Value::from("first-1")));
    assert_eq!(records[1].as_ref().unwrap().get("second"), Some(&Value::Long(124)));
    assert!(records[2].is_none());

    let headers = store.get_headers(&keys);
    assert!(headers[0].is_some());
    assert!(headers[1].is_some());
    assert!(headers[2].is_none());

    let partials = store.get_many_bins(&keys, &["first", "second"]);
    assert_eq!(partials[0].as_ref().unwrap().bins.len(), 2);
    assert_eq!(partials[1].as_ref().unwrap().get("first"), Some(&Value::from("first-2")));
    assert!(partials[2].is_none());
}

#[test]
fn test_touch() {
    let store = RecordStore::new();
    let key = common::key("Key1");
    store.put(&key, &common::sample_bins("1", 123));
    let before = store.get(&key).unwrap();

    store.touch(&key, Some(&WritePolicy::with_expiration(1000))).unwrap();
    let after = store.get(&key).unwrap();
    assert_eq!(after.bins, before.bins);
    assert_eq!(after.generation, before.generation);
    assert_eq!(after.expiration, 1000);
}

#[test]
fn test_touch_missing_key() {
    let store = RecordStore::new();
    let key = common::key("Non-key");

    let err = store
        .touch(&key, Some(&WritePolicy::with_expiration(1000)))
        .unwrap_err();
    assert_eq!(err, StoreError::NotFound(key.clone()));
    assert_eq!(err.result_code(), Some(2));
    assert!(!store.exists(&key));
}

#[test]
fn test_append_and_prepend() {
    let store = RecordStore::new();
    let key = common::key("Temp Key");
    store.put(
        &key,
        &[Bin::new("first", "val"), Bin::new("second", 1.0), Bin::new("third", 1i32)],
    );

    store.append(&key, &[Bin::new("first", "ue")]).unwrap();
    assert_eq!(store.get(&key).unwrap().get("first"), Some(&Value::from("value")));

    store.prepend(&key, &[Bin::new("first", ">")]).unwrap();
    assert_eq!(store.get(&key).unwrap().get("first"), Some(&Value::from(">value")));

    let err = store.append(&key, &[Bin::new("second", 2i32)]).unwrap_err();
    assert!(matches!(err, StoreError::TypeMismatch { .. }));
    assert_eq!(err.result_code(), Some(12));
    assert!(store.prepend(&key, &[Bin::new("third", "x")]).is_err());
}

#[test]
fn test_append_on_missing_key_creates_record() {
    let store = RecordStore::new();
    let key = common::key("Temp Key");

    store.append(&key, &[Bin::new("first", "val")]).unwrap();
    assert_eq!(store.get(&key).unwrap().get("first"), Some(&Value::from("val")));
}

#[test]
fn test_append_ignores_bins_the_record_lacks() {
    let store = RecordStore::new();
    let key = common::key("k");
    store.put(&key, &[Bin::new("name", "A")]);

    store
        .append(&key, &[Bin::new("name", "B"), Bin::new("other", "C")])
        .unwrap();
    let record = store.get(&key).unwrap();
    assert_eq!(record.get("name"), Some(&Value::from("AB")));
    assert_eq!(record.get("other"), None);
}

#[test]
fn test_multi_bin_mismatch_is_atomic() {
    let store = RecordStore::new();
    let key = common::key("k");
    store.put(&key, &[Bin::new("a", "x"), Bin::new("n", 5i64)]);
    let before = store.get(&key).unwrap();

    assert!(store
        .append(&key, &[Bin::new("a", "y"), Bin::new("n", "z")])
        .is_err());
    assert!(store
        .add(&key, &[Bin::new("n", 1i64), Bin::new("a", 1i64)])
        .is_err());
    assert_eq!(store.get(&key).unwrap(), before);
}

#[test]
fn test_add() {
    let store = RecordStore::new();
    let key = common::key("counter");
    store.put(&key, &[Bin::new("n", 1i64), Bin::new("small", 1i32), Bin::new("s", "x")]);

    store.add(&key, &[Bin::new("n", 1i64)]).unwrap();
    store.add(&key, &[Bin::new("n", 1i64)]).unwrap();
    assert_eq!(store.get(&key).unwrap().get("n"), Some(&Value::Long(3)));

    store.add(&key, &[Bin::new("small", 1i64)]).unwrap();
    assert_eq!(store.get(&key).unwrap().get("small"), Some(&Value::Int(2)));

    let err = store.add(&key, &[Bin::new("s", 1i64)]).unwrap_err();
    assert!(matches!(err, StoreError::TypeMismatch { .. }));
}

#[test]
fn test_add_double_operand_truncates() {
    let store = RecordStore::new();
    let key = common::key("counter");
    store.put(&key, &[Bin::new("n", 1i64), Bin::new("small", 1i32)]);

    store.add(&key, &[Bin::new("n", 2.0)]).unwrap();
    store.add(&key, &[Bin::new("small", 2.7)]).unwrap();

    let record = store.get(&key).unwrap();
    assert_eq!(record.get("n"), Some(&Value::Long(3)));
    assert_eq!(record.get("small"), Some(&Value::Int(3)));

    let err = store.add(&key, &[Bin::new("n", "2")]).unwrap_err();
    assert!(matches!(err, StoreError::TypeMismatch { .. }));
}

#[test]
fn test_operate() {
    let store = RecordStore::new();
    let key = common::key("Key1");

    let record = store
        .operate(
            &key,
            &[
                Operation::put(Bin::new("test1", "test")),
                Operation::put(Bin::new("test2", "test")),
            ],
        )
        .unwrap();
    assert!(record.bins.contains_key("test1"));
    assert!(record.bins.contains_key("test2"));
    assert_eq!(record.bins.len(), 2);

    let record = store
        .operate(
            &key,
            &[
                Operation::get("test1"),
                Operation::append(Bin::new("test1", "-x")),
                Operation::add(Bin::new("hits", 2i64)),
            ],
        )
        .unwrap();
    // The full record comes back with every write applied.
    assert_eq!(record.bins.len(), 3);
    assert_eq!(record.get("test1"), Some(&Value::from("test-x")));
    assert_eq!(record.get("test2"), Some(&Value::from("test")));
    assert_eq!(record.get("hits"), Some(&Value::Long(2)));
    assert_eq!(store.get(&key).unwrap(), record);
}

#[test]
fn test_operate_read_of_missing_bin() {
    let store = RecordStore::new();
    let key = common::key("k");
    store.put(&key, &[Bin::new("a", 1i64), Bin::new("b", 2i64)]);

    let record = store
        .operate(
            &key,
            &[
                Operation::add(Bin::new("a", 1i64)),
                Operation::get("a"),
                Operation::get("missing"),
            ],
        )
        .unwrap();
    assert_eq!(record.bins.len(), 2);
    assert_eq!(record.get("a"), Some(&Value::Long(2)));
    assert_eq!(record.get("b"), Some(&Value::Long(2)));
    assert!(!record.bins.contains_key("missing"));
}

#[test]
fn test_operate_read_only_on_absent_key_creates_record() {
    let store = RecordStore::new();
    let key = common::key("absent");

    let record = store.operate(&key, &[Operation::get("x")]).unwrap();
    assert!(record.bins.is_empty());
    assert!(store.exists(&key));
}

#[test]
fn test_operate_keeps_header() {
    let store = RecordStore::new();
    let key = common::key("k");
    store.put(&key, &[Bin::new("a", 1i64)]);
    store.touch(&key, Some(&WritePolicy::with_expiration(30))).unwrap();

    let record = store
        .operate(&key, &[Operation::put(Bin::new("b", 2i64))])
        .unwrap();
    assert_eq!(record.expiration, 30);
    assert_eq!(record.bins.len(), 2);
}

#[test]
fn test_close_clears_records() {
    let store = RecordStore::open(Config::default().with_shard_amount(4)).unwrap();
    for i in 0..10 {
        store.put(&common::key(&format!("k{}", i)), &[Bin::new("i", i as i64)]);
    }
    assert_eq!(store.len(), 10);

    store.close();
    assert!(store.is_empty());
    assert!(!store.exists(&common::key("k0")));

    // The store stays usable after close.
    store.put(&common::key("k0"), &[Bin::new("i", 0i64)]);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_unsupported_surface_is_distinct() {
    let store = RecordStore::new();
    let err = store.query_users().unwrap_err();
    assert!(err.is_unsupported());
    assert_eq!(err.result_code(), None);
    assert!(store.node_names().is_empty());
}

#[test]
fn test_generic_client_usage() {
    fn roundtrip<C: RecordClient>(client: &C) -> recstore::Result<Option<Value>> {
        let key = Key::new("test", "generic", 7i64);
        client.put(&key, &[Bin::new("v", "one")])?;
        client.prepend(&key, &[Bin::new("v", "zero-")])?;
        Ok(client.get(&key)?.and_then(|r| r.get("v").cloned()))
    }

    let store = RecordStore::new();
    assert_eq!(roundtrip(&store).unwrap(), Some(Value::from("zero-one")));
}
