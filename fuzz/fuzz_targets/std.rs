#![no_main]

use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use probing_table::{ProbingTable, RemovalMode};
use std::collections::HashMap as StdHashMap;

#[derive(Debug, Arbitrary)]
enum Operation<K, V> {
    Insert(K, V),
    Remove(K),
    Get(K),
    Contains(K),
    ContainsValue(V),
    Clear,
    Len,
    IsEmpty,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    capacity: u8,
    load_factor: u8,
    operations: Vec<Operation<u8, u32>>,
}

fn fuzz_table(input: FuzzInput) {
    let mut std_map = StdHashMap::new();

    // small keys and capacities keep clusters long
    let mut table = match ProbingTable::builder()
        .capacity(usize::from(input.capacity))
        .load_factor(f64::from(input.load_factor) / 256.0)
        .removal_mode(RemovalMode::BackwardShift)
        .build()
    {
        Ok(table) => table,
        Err(err) => {
            assert!(err.is_invalid_argument());
            return;
        }
    };

    for op in input.operations {
        match op {
            Operation::Insert(k, v) => {
                let std_result = std_map.insert(k, v);
                let table_result = table.insert(k, v).unwrap();
                assert_eq!(std_result, table_result);
            }
            Operation::Remove(k) => {
                let std_result = std_map.remove(&k);
                let table_result = table.remove(&k);
                assert_eq!(std_result, table_result);
            }
            Operation::Get(k) => {
                let std_result = std_map.get(&k);
                let table_result = table.get(&k);
                assert_eq!(std_result, table_result);
            }
            Operation::Contains(k) => {
                let std_result = std_map.contains_key(&k);
                let table_result = table.contains_key(&k);
                assert_eq!(std_result, table_result);
            }
            Operation::ContainsValue(v) => {
                let std_result = std_map.values().any(|x| *x == v);
                let table_result = table.contains_value(&v);
                assert_eq!(std_result, table_result);
            }
            Operation::Clear => {
                std_map.clear();
                table.clear();
            }
            Operation::Len => {
                assert_eq!(std_map.len(), table.len());
            }
            Operation::IsEmpty => {
                assert_eq!(std_map.is_empty(), table.is_empty());
            }
        }

        // growth always leaves a free slot
        assert!(table.len() < table.capacity());
    }

    // Final consistency checks
    for (k, v) in std_map.iter() {
        assert_eq!(Some(v), table.get(k));
    }
    assert_eq!(std_map.len(), table.len());
    assert_eq!(std_map.is_empty(), table.is_empty());
}

fuzz_target!(|data: FuzzInput| {
    fuzz_table(data);
});
