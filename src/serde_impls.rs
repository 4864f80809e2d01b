use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use std::fmt::{self, Formatter};
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;
use std::mem;

use crate::raw::slots_for;
use crate::{ProbingTable, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR};

struct MapVisitor<K, V, S> {
    _marker: PhantomData<ProbingTable<K, V, S>>,
}

impl<K, V, S> Serialize for ProbingTable<K, V, S>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<Sr>(&self, serializer: Sr) -> Result<Sr::Ok, Sr::Error>
    where
        Sr: Serializer,
    {
        serializer.collect_map(self)
    }
}

impl<'de, K, V, S> Deserialize<'de> for ProbingTable<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
    S: Default + BuildHasher,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(MapVisitor::new())
    }
}

impl<K, V, S> MapVisitor<K, V, S> {
    pub(crate) fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<'de, K, V, S> Visitor<'de> for MapVisitor<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
    S: Default + BuildHasher,
{
    type Value = ProbingTable<K, V, S>;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "a map")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut values = match access.size_hint() {
            // size the table to hold every entry without growing
            Some(size) => {
                let capacity =
                    slots_for(cautious::<K, V>(size), DEFAULT_LOAD_FACTOR).max(DEFAULT_CAPACITY);
                ProbingTable::with_capacity_and_hasher(capacity, S::default())
                    .map_err(de::Error::custom)?
            }
            None => ProbingTable::default(),
        };

        while let Some((key, value)) = access.next_entry()? {
            values.insert(key, value).map_err(de::Error::custom)?;
        }

        Ok(values)
    }
}

// Caps an untrusted size hint so presizing never allocates more than about 1MiB of slots.
fn cautious<K, V>(hint: usize) -> usize {
    const MAX_PREALLOC_BYTES: usize = 1024 * 1024;

    let slot = mem::size_of::<Option<(u64, K, V)>>().max(1);
    hint.min(MAX_PREALLOC_BYTES / slot)
}
