mod common;
use common::with_table;

use probing_table::{Error, ProbingTable, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR};

use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[test]
fn new() {
    with_table::<usize, usize>(|table| drop(table()));
}

#[test]
fn defaults() {
    let table: ProbingTable<usize, usize> = ProbingTable::new();
    assert_eq!(table.capacity(), DEFAULT_CAPACITY);
    assert_eq!(table.capacity(), 16);
    assert_eq!(table.load_factor(), DEFAULT_LOAD_FACTOR);
    assert!((table.load_factor() - 0.75).abs() < 0.0001);
    assert!(table.is_empty());

    let table: ProbingTable<usize, usize> = ProbingTable::default();
    assert_eq!(table.capacity(), DEFAULT_CAPACITY);
}

#[test]
fn capacity() {
    let table: ProbingTable<usize, usize> = ProbingTable::with_capacity(32).unwrap();
    assert_eq!(table.capacity(), 32);

    let table: ProbingTable<usize, usize> = ProbingTable::with_capacity(1).unwrap();
    assert_eq!(table.capacity(), 1);
}

#[test]
fn load_factor() {
    let table: ProbingTable<usize, usize> = ProbingTable::with_load_factor(0.1).unwrap();
    assert!((table.load_factor() - 0.1).abs() < 0.0001);
    assert_eq!(table.capacity(), DEFAULT_CAPACITY);

    let table: ProbingTable<usize, usize> =
        ProbingTable::with_capacity_and_load_factor(8, 0.5).unwrap();
    assert_eq!(table.capacity(), 8);
    assert_eq!(table.load_factor(), 0.5);
}

#[test]
fn invalid_capacity() {
    let result = ProbingTable::<usize, usize>::with_capacity(0);
    assert_eq!(result.err(), Some(Error::InvalidCapacity(0)));

    let result = ProbingTable::<usize, usize>::with_capacity_and_load_factor(0, 0.5);
    assert!(result.unwrap_err().is_invalid_argument());
}

#[test]
fn invalid_load_factor() {
    for load_factor in [0.0, 1.0, -0.5, 1.5, f64::INFINITY] {
        let result = ProbingTable::<usize, usize>::with_load_factor(load_factor);
        assert_eq!(result.err(), Some(Error::InvalidLoadFactor(load_factor)));
    }

    let result = ProbingTable::<usize, usize>::with_load_factor(f64::NAN);
    assert!(matches!(result, Err(Error::InvalidLoadFactor(lf)) if lf.is_nan()));
}

#[test]
fn size() {
    with_table::<usize, usize>(|table| {
        let mut table = table();
        assert_eq!(table.len(), 0);
        table.insert(0, 0).unwrap();
        assert_eq!(table.len(), 1);
        table.insert(0, 0).unwrap();
        assert_eq!(table.len(), 1);
        table.insert(1, 0).unwrap();
        assert_eq!(table.len(), 2);
    });
}

#[test]
fn is_empty() {
    with_table::<usize, usize>(|table| {
        let mut table = table();
        assert!(table.is_empty());
        table.insert(0, 0).unwrap();
        assert!(!table.is_empty());
    });
}

#[test]
fn insert() {
    with_table::<usize, usize>(|table| {
        let mut table = table();
        let old = table.insert(42, 0).unwrap();
        assert!(old.is_none());
    });
}

#[test]
fn get_empty() {
    with_table::<usize, usize>(|table| {
        let table = table();
        assert!(table.get(&42).is_none());
        assert!(table.get_key_value(&42).is_none());
    });
}

#[test]
fn remove_empty() {
    with_table::<usize, usize>(|table| {
        let mut table = table();
        assert!(table.remove(&42).is_none());
        assert!(table.is_empty());
    });
}

#[test]
fn insert_and_get() {
    with_table::<usize, usize>(|table| {
        let mut table = table();
        assert!(table.get(&0).is_none());
        table.insert(0, 15).unwrap();
        assert_eq!(table.get(&0), Some(&15));
        assert_eq!(table.get_key_value(&0), Some((&0, &15)));
    });
}

#[test]
fn insert_and_remove() {
    with_table::<usize, usize>(|table| {
        let mut table = table();
        table.insert(0, 250).unwrap();
        assert!(!table.is_empty());
        assert_eq!(table.remove(&0), Some(250));
        assert!(table.is_empty());
        assert!(table.get(&0).is_none());
    });
}

#[test]
fn remove_then_reinsert() {
    with_table::<usize, usize>(|table| {
        let mut table = table();
        table.insert(7, 1).unwrap();
        assert_eq!(table.remove(&7), Some(1));
        assert!(table.get(&7).is_none());

        assert_eq!(table.insert(7, 2).unwrap(), None);
        assert_eq!(table.get(&7), Some(&2));
        assert_eq!(table.len(), 1);
    });
}

#[test]
fn reinsert() {
    with_table::<usize, usize>(|table| {
        let mut table = table();
        table.insert(42, 0).unwrap();
        let capacity = table.capacity();

        let old = table.insert(42, 1).unwrap();
        assert_eq!(old, Some(0));
        assert_eq!(table.get(&42), Some(&1));
        assert_eq!(table.len(), 1);
        assert_eq!(table.capacity(), capacity);
    });
}

#[test]
fn reinsert_keeps_key() {
    #[derive(Debug, Clone, Copy)]
    struct Tagged(u32, &'static str);

    impl PartialEq for Tagged {
        fn eq(&self, other: &Self) -> bool {
            self.0 == other.0
        }
    }

    impl Eq for Tagged {}

    impl Hash for Tagged {
        fn hash<H: Hasher>(&self, state: &mut H) {
            self.0.hash(state);
        }
    }

    let mut table = ProbingTable::new();
    table.insert(Tagged(1, "first"), 'a').unwrap();
    table.insert(Tagged(1, "second"), 'b').unwrap();

    let (key, value) = table.get_key_value(&Tagged(1, "")).unwrap();
    assert_eq!(key.1, "first");
    assert_eq!(*value, 'b');
}

#[test]
fn get_mut() {
    with_table::<usize, usize>(|table| {
        let mut table = table();
        table.insert(1, 10).unwrap();

        *table.get_mut(&1).unwrap() += 5;
        assert_eq!(table.get(&1), Some(&15));
        assert!(table.get_mut(&2).is_none());
    });
}

#[test]
fn remove_entry() {
    with_table::<String, usize>(|table| {
        let mut table = table();
        table.insert("a".to_owned(), 1).unwrap();

        assert_eq!(table.remove_entry("a"), Some(("a".to_owned(), 1)));
        assert_eq!(table.remove_entry("a"), None);
    });
}

#[test]
fn contains_key() {
    with_table::<usize, usize>(|table| {
        let mut table = table();
        assert!(!table.contains_key(&0));
        table.insert(0, 0).unwrap();
        assert!(table.contains_key(&0));
    });
}

#[test]
fn contains_value() {
    with_table::<usize, usize>(|table| {
        let mut table = table();
        assert!(!table.contains_value(&1));
        table.insert(0, 1).unwrap();
        assert!(table.contains_value(&1));
        table.remove(&0);
        assert!(!table.contains_value(&1));
    });
}

#[test]
fn borrowed_keys() {
    let mut table = ProbingTable::new();
    table.insert("hello".to_owned(), 1).unwrap();

    assert_eq!(table.get("hello"), Some(&1));
    assert!(table.contains_key("hello"));
    assert_eq!(table.remove("hello"), Some(1));
}

#[test]
fn insert_all() {
    with_table::<usize, usize>(|table| {
        let mut table = table();
        let source: std::collections::HashMap<usize, usize> =
            [(0, 0), (1, 1), (2, 2)].into_iter().collect();

        assert_eq!(table.len(), 0);
        table.insert_all(source).unwrap();
        assert_eq!(table.len(), 3);

        for i in 0..3 {
            assert_eq!(table.get(&i), Some(&i));
        }
    });
}

#[test]
fn insert_all_overwrites() {
    let mut table = ProbingTable::new();
    table.insert(1, "old").unwrap();
    table.insert_all([(1, "new"), (2, "two")]).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.get(&1), Some(&"new"));
}

#[test]
fn clear() {
    with_table::<usize, usize>(|table| {
        let mut table = table();
        for i in 0..5 {
            table.insert(i, 1).unwrap();
        }

        assert!(!table.is_empty());
        assert_eq!(table.len(), 5);

        let capacity = table.capacity();
        table.clear();

        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.capacity(), capacity);
        for i in 0..5 {
            assert!(table.get(&i).is_none());
        }
    });
}

#[test]
fn clear_after_growth() {
    with_table::<usize, usize>(|table| {
        let mut table = table();
        for i in 0..100 {
            table.insert(i, i).unwrap();
        }

        let capacity = table.capacity();
        assert!(capacity > DEFAULT_CAPACITY);

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.capacity(), capacity);

        // the table is still usable
        table.insert(1, 1).unwrap();
        assert_eq!(table.get(&1), Some(&1));
    });
}

#[test]
fn values() {
    with_table::<usize, usize>(|table| {
        let mut table = table();
        table.insert(0, 0).unwrap();
        table.insert(1, 1).unwrap();
        table.insert(2, 2).unwrap();
        table.insert(9, 9).unwrap();

        let mut values = table.values().copied().collect::<Vec<_>>();
        values.sort_unstable();
        assert_eq!(values, [0, 1, 2, 9]);
        assert_eq!(table.values().len(), 4);
    });
}

#[test]
fn keys() {
    with_table::<usize, usize>(|table| {
        let mut table = table();
        for i in 0..10 {
            table.insert(i, i * 2).unwrap();
        }

        let mut keys = table.keys().copied().collect::<Vec<_>>();
        keys.sort_unstable();
        assert_eq!(keys, (0..10).collect::<Vec<_>>());
    });
}

#[test]
fn iter() {
    with_table::<usize, usize>(|table| {
        let mut table = table();
        for i in 0..64 {
            table.insert(i, i + 1).unwrap();
        }

        let mut entries = table.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>();
        entries.sort_unstable();
        assert_eq!(entries, (0..64).map(|i| (i, i + 1)).collect::<Vec<_>>());

        let iter = table.iter();
        assert_eq!(iter.len(), 64);

        let mut count = 0;
        for (key, value) in &table {
            assert_eq!(*value, key + 1);
            count += 1;
        }
        assert_eq!(count, 64);
    });
}

#[test]
fn grows_and_keeps_entries() {
    with_table::<usize, usize>(|table| {
        let mut table = table();
        for i in 0..1024 {
            assert_eq!(table.insert(i, i).unwrap(), None);
        }

        assert_eq!(table.len(), 1024);
        assert!(table.capacity() as f64 * table.load_factor() > 1024.0);
        for i in 0..1024 {
            assert_eq!(table.get(&i), Some(&i));
        }
    });
}

#[test]
fn eq() {
    let mut a = ProbingTable::new();
    let mut b = ProbingTable::with_capacity(2).unwrap();

    for i in 0..10 {
        a.insert(i, i).unwrap();
        b.insert(9 - i, 9 - i).unwrap();
    }
    assert_eq!(a, b);

    b.insert(0, 100).unwrap();
    assert_ne!(a, b);

    b.insert(0, 0).unwrap();
    b.insert(10, 10).unwrap();
    assert_ne!(a, b);
}

#[test]
fn clone() {
    let mut table = ProbingTable::new();
    for i in 0..32 {
        table.insert(i, i.to_string()).unwrap();
    }

    let mut cloned = table.clone();
    assert_eq!(table, cloned);
    assert_eq!(table.capacity(), cloned.capacity());

    cloned.remove(&0);
    assert_eq!(table.len(), 32);
    assert_eq!(cloned.len(), 31);
}

#[test]
fn debug() {
    let mut table = ProbingTable::new();
    table.insert(1, "a").unwrap();
    assert_eq!(format!("{:?}", table), r#"{1: "a"}"#);
    assert_eq!(format!("{:?}", table.values()), r#"["a"]"#);
    assert_eq!(format!("{:?}", table.keys()), "[1]");
}

#[test]
fn current_kv_dropped() {
    let dropped1 = Arc::new(0);
    let dropped2 = Arc::new(0);

    with_table::<Arc<usize>, Arc<usize>>(|table| {
        let mut table = table();
        table.insert(dropped1.clone(), dropped2.clone()).unwrap();
        assert_eq!(Arc::strong_count(&dropped1), 2);
        assert_eq!(Arc::strong_count(&dropped2), 2);

        drop(table);

        // dropping the table drops all keys and values
        assert_eq!(Arc::strong_count(&dropped1), 1);
        assert_eq!(Arc::strong_count(&dropped2), 1);
    });
}

#[test]
fn replaced_value_dropped() {
    let old = Arc::new(0);
    let mut table = ProbingTable::new();

    table.insert(1, old.clone()).unwrap();
    let replaced = table.insert(1, Arc::new(1)).unwrap().unwrap();
    assert!(Arc::ptr_eq(&replaced, &old));

    drop(replaced);
    assert_eq!(Arc::strong_count(&old), 1);
}

#[test]
fn clear_drops_entries() {
    let value = Arc::new(0);
    let mut table = ProbingTable::new();
    for i in 0..10 {
        table.insert(i, value.clone()).unwrap();
    }
    assert_eq!(Arc::strong_count(&value), 11);

    table.clear();
    assert_eq!(Arc::strong_count(&value), 1);
}
