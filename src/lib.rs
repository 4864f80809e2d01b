#![doc = include_str!("../README.md")]

mod error;
mod map;
mod nullable;
mod raw;

#[cfg(feature = "serde")]
mod serde_impls;

pub use error::Error;
pub use map::{
    Iter, Keys, ProbingTable, ProbingTableBuilder, RemovalMode, Values, DEFAULT_CAPACITY,
    DEFAULT_LOAD_FACTOR,
};
