use crate::raw;
use crate::Error;

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

/// The number of slots a table is created with by default.
pub const DEFAULT_CAPACITY: usize = 16;

/// The proportion of slots that must be filled before a table doubles its capacity, by default.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// An open-addressing hash table using linear probing.
///
/// Entries are stored directly in a single slot array. Colliding keys are placed in the next
/// free slot, wrapping around to the start of the array. Once the number of entries reaches
/// `capacity * load_factor`, the table doubles its capacity and moves every entry into the
/// new slots.
///
/// See the [crate-level documentation](crate) for details.
pub struct ProbingTable<K, V, S = RandomState> {
    raw: raw::HashTable<K, V>,
    build_hasher: S,
}

/// A builder for a [`ProbingTable`].
///
/// # Examples
///
/// ```rust
/// use probing_table::{ProbingTable, RemovalMode};
/// use std::collections::hash_map::RandomState;
///
/// let table: ProbingTable<i32, i32> = ProbingTable::builder()
///     // Set the initial capacity.
///     .capacity(64)
///     // Set the load factor.
///     .load_factor(0.5)
///     // Set the hasher.
///     .hasher(RandomState::new())
///     // Set the removal mode.
///     .removal_mode(RemovalMode::BackwardShift)
///     // Construct the table.
///     .build()
///     .unwrap();
///
/// assert_eq!(table.capacity(), 64);
/// ```
pub struct ProbingTableBuilder<K, V, S = RandomState> {
    hasher: S,
    capacity: usize,
    load_factor: f64,
    removal_mode: RemovalMode,
    _kv: PhantomData<(K, V)>,
}

impl<K, V> ProbingTableBuilder<K, V> {
    /// Set the hash builder used to hash keys.
    ///
    /// Warning: `hash_builder` is normally randomly generated, and is designed
    /// to allow tables to be resistant to attacks that cause many collisions
    /// and very poor performance. Setting it manually using this function can
    /// expose a DoS attack vector.
    pub fn hasher<S>(self, hasher: S) -> ProbingTableBuilder<K, V, S> {
        ProbingTableBuilder {
            hasher,
            capacity: self.capacity,
            load_factor: self.load_factor,
            removal_mode: self.removal_mode,
            _kv: PhantomData,
        }
    }
}

impl<K, V, S> ProbingTableBuilder<K, V, S> {
    /// Set the initial number of slots in the table.
    ///
    /// Unlike many hash tables, the capacity is the exact length of the slot array,
    /// not an estimate of the number of entries. It must be at least 1.
    pub fn capacity(self, capacity: usize) -> Self {
        ProbingTableBuilder { capacity, ..self }
    }

    /// Set the proportion of slots that must be filled before the table grows.
    ///
    /// The load factor must lie strictly between 0 and 1.
    pub fn load_factor(self, load_factor: f64) -> Self {
        ProbingTableBuilder {
            load_factor,
            ..self
        }
    }

    /// Set the removal mode of the table. See [`RemovalMode`] for details.
    pub fn removal_mode(self, removal_mode: RemovalMode) -> Self {
        ProbingTableBuilder {
            removal_mode,
            ..self
        }
    }

    /// Construct a [`ProbingTable`] from the builder, using the configured options.
    ///
    /// Returns an error if the capacity is 0 or the load factor is not strictly between
    /// 0 and 1.
    pub fn build(self) -> Result<ProbingTable<K, V, S>, Error> {
        validate(self.capacity, self.load_factor)?;

        Ok(ProbingTable {
            raw: raw::HashTable::new(self.capacity, self.load_factor, self.removal_mode),
            build_hasher: self.hasher,
        })
    }
}

impl<K, V, S> fmt::Debug for ProbingTableBuilder<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbingTableBuilder")
            .field("capacity", &self.capacity)
            .field("load_factor", &self.load_factor)
            .field("removal_mode", &self.removal_mode)
            .finish()
    }
}

/// How a [`ProbingTable`] fills the slot left behind by a removed entry.
///
/// The table never uses tombstones. Removing an entry from the middle of a cluster leaves an
/// empty slot, and lookups stop at the first empty slot of a probe sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovalMode {
    /// Move later entries of the cluster back into the empty slot.
    ///
    /// After the removed slot is emptied, each following entry in the cluster is moved
    /// back into the gap unless that would place it before its home slot. Every remaining
    /// key stays reachable. This is the default mode.
    #[default]
    BackwardShift,

    /// Leave the removed slot empty.
    ///
    /// Keys inserted further along the same cluster may become unreachable after a removal:
    /// lookups stop at the new empty slot, and a later insert of such a key creates a second
    /// entry for it. Removal itself scans every slot of the probe sequence, so such a key can
    /// still be removed. This mode exists for compatibility with tables that never compact
    /// their clusters, and should not be used otherwise.
    Vacate,
}

impl<K, V> ProbingTable<K, V> {
    /// Creates an empty `ProbingTable` with [`DEFAULT_CAPACITY`] slots and a load factor
    /// of [`DEFAULT_LOAD_FACTOR`].
    ///
    /// # Examples
    ///
    /// ```
    /// use probing_table::ProbingTable;
    /// let table: ProbingTable<&str, i32> = ProbingTable::new();
    /// assert_eq!(table.capacity(), 16);
    /// ```
    pub fn new() -> ProbingTable<K, V> {
        ProbingTable::with_hasher(RandomState::new())
    }

    /// Creates an empty `ProbingTable` with `capacity` slots.
    ///
    /// Returns [`Error::InvalidCapacity`] if `capacity` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use probing_table::ProbingTable;
    /// let table: ProbingTable<&str, i32> = ProbingTable::with_capacity(32).unwrap();
    /// assert_eq!(table.capacity(), 32);
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<ProbingTable<K, V>, Error> {
        ProbingTable::builder().capacity(capacity).build()
    }

    /// Creates an empty `ProbingTable` with the given load factor.
    ///
    /// Returns [`Error::InvalidLoadFactor`] unless `load_factor` lies strictly between
    /// 0 and 1.
    pub fn with_load_factor(load_factor: f64) -> Result<ProbingTable<K, V>, Error> {
        ProbingTable::builder().load_factor(load_factor).build()
    }

    /// Creates an empty `ProbingTable` with `capacity` slots and the given load factor.
    pub fn with_capacity_and_load_factor(
        capacity: usize,
        load_factor: f64,
    ) -> Result<ProbingTable<K, V>, Error> {
        ProbingTable::builder()
            .capacity(capacity)
            .load_factor(load_factor)
            .build()
    }

    /// Returns a builder for a `ProbingTable`.
    ///
    /// The builder can be used for more complex configuration, such as using a custom
    /// [`RemovalMode`].
    pub fn builder() -> ProbingTableBuilder<K, V> {
        ProbingTableBuilder {
            hasher: RandomState::new(),
            capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            removal_mode: RemovalMode::default(),
            _kv: PhantomData,
        }
    }
}

impl<K, V, S> Default for ProbingTable<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        ProbingTable::with_hasher(S::default())
    }
}

impl<K, V, S> ProbingTable<K, V, S> {
    /// Creates an empty `ProbingTable` with the default capacity and load factor, using
    /// `hash_builder` to hash keys.
    ///
    /// Warning: `hash_builder` is normally randomly generated, and is designed
    /// to allow tables to be resistant to attacks that cause many collisions
    /// and very poor performance. Setting it manually using this function can
    /// expose a DoS attack vector.
    pub fn with_hasher(hash_builder: S) -> ProbingTable<K, V, S> {
        ProbingTable {
            raw: raw::HashTable::new(
                DEFAULT_CAPACITY,
                DEFAULT_LOAD_FACTOR,
                RemovalMode::default(),
            ),
            build_hasher: hash_builder,
        }
    }

    /// Creates an empty `ProbingTable` with `capacity` slots, using `hash_builder` to hash
    /// keys.
    ///
    /// Returns [`Error::InvalidCapacity`] if `capacity` is 0.
    pub fn with_capacity_and_hasher(
        capacity: usize,
        hash_builder: S,
    ) -> Result<ProbingTable<K, V, S>, Error> {
        ProbingTable::builder()
            .hasher(hash_builder)
            .capacity(capacity)
            .build()
    }

    /// Returns the number of entries in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the table contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of slots in the table.
    ///
    /// The capacity doubles whenever an insertion brings the number of entries to
    /// `capacity * load_factor`.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the proportion of slots that must be filled before the table grows.
    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.raw.load_factor()
    }

    /// Returns the removal mode of the table.
    #[inline]
    pub fn removal_mode(&self) -> RemovalMode {
        self.raw.removal_mode()
    }

    /// Returns a reference to the table's [`BuildHasher`].
    #[inline]
    pub fn hasher(&self) -> &S {
        &self.build_hasher
    }

    /// Returns `true` if the table maps one or more keys to `value`.
    ///
    /// Unlike [`contains_key`](ProbingTable::contains_key), this scans every slot in the
    /// table, and takes time linear in its capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use probing_table::ProbingTable;
    ///
    /// let mut table = ProbingTable::new();
    /// table.insert(1, "a").unwrap();
    /// assert!(table.contains_value(&"a"));
    /// assert!(!table.contains_value(&"b"));
    /// ```
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.raw.contains_value(value)
    }

    /// Removes every entry from the table.
    ///
    /// The capacity of the table is unchanged.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// An iterator visiting all key-value pairs in arbitrary order.
    ///
    /// The table cannot be modified while the iterator is alive.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            raw: self.raw.iter(),
        }
    }

    /// An iterator visiting all keys in arbitrary order.
    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { iter: self.iter() }
    }

    /// An iterator visiting all values in arbitrary order.
    ///
    /// # Examples
    ///
    /// ```
    /// use probing_table::ProbingTable;
    ///
    /// let mut table = ProbingTable::new();
    /// table.insert("a", 1).unwrap();
    /// table.insert("b", 2).unwrap();
    ///
    /// let mut values = table.values().copied().collect::<Vec<_>>();
    /// values.sort();
    /// assert_eq!(values, [1, 2]);
    /// ```
    #[inline]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { iter: self.iter() }
    }
}

impl<K, V, S> ProbingTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns `true` if the table contains a value for the specified key.
    ///
    /// The key may be any borrowed form of the table's key type, but
    /// [`Hash`] and [`Eq`] on the borrowed form *must* match those for
    /// the key type.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.find(self.hash(key), |k| k.borrow() == key).is_some()
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use probing_table::ProbingTable;
    ///
    /// let mut table = ProbingTable::new();
    /// table.insert(1, "a").unwrap();
    /// assert_eq!(table.get(&1), Some(&"a"));
    /// assert_eq!(table.get(&2), None);
    /// ```
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    #[inline]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw
            .get(self.hash(key), |k| k.borrow() == key)
            .map(|entry| (&entry.key, &entry.value))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash(key);
        self.raw
            .get_mut(hash, |k| k.borrow() == key)
            .map(|entry| &mut entry.value)
    }

    /// Inserts a key-value pair into the table.
    ///
    /// If the table did not have this key present, `None` is returned. If the insertion
    /// brings the number of entries to `capacity * load_factor`, the table doubles its
    /// capacity.
    ///
    /// If the table did have this key present, the value is updated in place and the old
    /// value is returned. The key is not updated, and the table never grows.
    ///
    /// Returns [`Error::TableFull`] if every slot was probed without finding room. Growth
    /// always leaves a free slot, so this indicates a broken invariant.
    ///
    /// # Examples
    ///
    /// ```
    /// use probing_table::ProbingTable;
    ///
    /// let mut table = ProbingTable::new();
    /// assert_eq!(table.insert(37, "a").unwrap(), None);
    /// assert_eq!(table.is_empty(), false);
    ///
    /// table.insert(37, "b").unwrap();
    /// assert_eq!(table.insert(37, "c").unwrap(), Some("b"));
    /// assert_eq!(table.get(&37), Some(&"c"));
    /// ```
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, Error> {
        let hash = self.hash(&key);
        self.raw.insert(hash, key, value)
    }

    /// Removes a key from the table, returning the value at the key if the key was
    /// previously in the table.
    ///
    /// The table never shrinks.
    ///
    /// # Examples
    ///
    /// ```
    /// use probing_table::ProbingTable;
    ///
    /// let mut table = ProbingTable::new();
    /// table.insert(1, "a").unwrap();
    /// assert_eq!(table.remove(&1), Some("a"));
    /// assert_eq!(table.remove(&1), None);
    /// ```
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the table, returning the stored key and value if the key was
    /// previously in the table.
    #[inline]
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash(key);
        self.raw
            .remove(hash, |k| k.borrow() == key)
            .map(|entry| (entry.key, entry.value))
    }

    /// Inserts every key-value pair from `source` into the table.
    ///
    /// This is equivalent to calling [`insert`](ProbingTable::insert) once for each pair.
    /// The first error is returned immediately, and any pairs inserted before it remain in
    /// the table.
    ///
    /// # Examples
    ///
    /// ```
    /// use probing_table::ProbingTable;
    ///
    /// let mut table = ProbingTable::new();
    /// table.insert_all([(0, 0), (1, 1), (2, 2)]).unwrap();
    /// assert_eq!(table.len(), 3);
    /// ```
    pub fn insert_all<I>(&mut self, source: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in source {
            self.insert(key, value)?;
        }

        Ok(())
    }

    #[inline]
    fn hash<Q>(&self, key: &Q) -> u64
    where
        Q: Hash + ?Sized,
    {
        self.build_hasher.hash_one(key)
    }
}

// Checks the construction parameters of a table.
fn validate(capacity: usize, load_factor: f64) -> Result<(), Error> {
    if capacity < 1 {
        return Err(Error::InvalidCapacity(capacity));
    }

    // written to also reject NaN
    if !(load_factor > 0.0 && load_factor < 1.0) {
        return Err(Error::InvalidLoadFactor(load_factor));
    }

    Ok(())
}

impl<K, V, S> PartialEq for ProbingTable<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        self.iter()
            .all(|(key, value)| other.get(key).map_or(false, |v| *value == *v))
    }
}

impl<K, V, S> Eq for ProbingTable<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> fmt::Debug for ProbingTable<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> Clone for ProbingTable<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> ProbingTable<K, V, S> {
        ProbingTable {
            raw: self.raw.clone(),
            build_hasher: self.build_hasher.clone(),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a ProbingTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over a table's entries.
///
/// This struct is created by the [`iter`](ProbingTable::iter) method on [`ProbingTable`].
/// See its documentation for details.
pub struct Iter<'a, K, V> {
    raw: raw::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.raw.next().map(|entry| (&entry.key, &entry.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.raw.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            raw: self.raw.clone(),
        }
    }
}

impl<K, V> fmt::Debug for Iter<'_, K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over a table's keys.
///
/// This struct is created by the [`keys`](ProbingTable::keys) method on [`ProbingTable`].
/// See its documentation for details.
pub struct Keys<'a, K, V> {
    iter: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (key, _) = self.iter.next()?;
        Some(key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> fmt::Debug for Keys<'_, K, V>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter.clone().map(|(key, _)| key))
            .finish()
    }
}

/// An iterator over a table's values.
///
/// This struct is created by the [`values`](ProbingTable::values) method on
/// [`ProbingTable`]. See its documentation for details.
pub struct Values<'a, K, V> {
    iter: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (_, value) = self.iter.next()?;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> fmt::Debug for Values<'_, K, V>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter.clone().map(|(_, value)| value))
            .finish()
    }
}
