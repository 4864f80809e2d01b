#![allow(dead_code)]

use probing_table::{ProbingTable, RemovalMode};

use std::hash::{BuildHasherDefault, Hasher};
use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

// Installs a logger for the table's growth and shift messages, configurable with `RUST_LOG`.
pub fn init_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Warn)
            .filter_module("probing_table", LevelFilter::Debug)
            .is_test(true)
            .parse_default_env();

        // Another test binary may have installed one already.
        let _ = builder.try_init();
    });
}

// Run the test on every removal mode.
//
// Tests run through this helper must not depend on other keys of a cluster staying reachable
// after a removal, which only `RemovalMode::BackwardShift` guarantees.
pub fn with_table<K, V>(mut test: impl FnMut(&dyn Fn() -> ProbingTable<K, V>)) {
    test(
        &(|| {
            ProbingTable::builder()
                .removal_mode(RemovalMode::BackwardShift)
                .build()
                .unwrap()
        }),
    );

    test(
        &(|| {
            ProbingTable::builder()
                .removal_mode(RemovalMode::Vacate)
                .build()
                .unwrap()
        }),
    );
}

// A hasher that uses an integer key as its own hash, to place keys in known slots.
#[derive(Default)]
pub struct IdentityHasher(u64);

impl Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.0 = (self.0 << 8) | u64::from(byte);
        }
    }

    fn write_u32(&mut self, n: u32) {
        self.0 = u64::from(n);
    }

    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }

    fn write_usize(&mut self, n: usize) {
        self.0 = n as u64;
    }
}

pub type Identity = BuildHasherDefault<IdentityHasher>;

// Creates a table whose keys are stored at `key % capacity`, or the next free slot after it.
pub fn identity_table<V>(
    capacity: usize,
    removal_mode: RemovalMode,
) -> ProbingTable<u64, V, Identity> {
    ProbingTable::builder()
        .hasher(Identity::default())
        .capacity(capacity)
        .removal_mode(removal_mode)
        .build()
        .unwrap()
}
