mod probe;

use std::{iter, mem, slice};

use self::probe::Probe;
use crate::map::RemovalMode;
use crate::Error;

pub use self::probe::slots_for;

// An open-addressing hash table with linear probing.
//
// The raw table operates on precomputed hashes, hashing is left to the caller.
#[derive(Clone)]
pub struct HashTable<K, V> {
    slots: Box<[Slot<K, V>]>,
    // The number of occupied slots.
    len: usize,
    load_factor: f64,
    removal_mode: RemovalMode,
}

// A slot in the table, either empty or holding a single entry.
type Slot<K, V> = Option<Entry<K, V>>;

// An entry in the hash table.
#[derive(Clone)]
pub struct Entry<K, V> {
    // The hash of the key, computed once on insertion and never recomputed.
    pub hash: u64,
    pub key: K,
    pub value: V,
}

impl<K, V> HashTable<K, V> {
    // Creates a table of `capacity` empty slots.
    //
    // The caller is responsible for validating `capacity` and `load_factor`.
    pub fn new(capacity: usize, load_factor: f64, removal_mode: RemovalMode) -> HashTable<K, V> {
        debug_assert!(capacity > 0);
        debug_assert!(load_factor > 0.0 && load_factor < 1.0);

        HashTable {
            slots: empty_slots(capacity),
            len: 0,
            load_factor,
            removal_mode,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    #[inline]
    pub fn removal_mode(&self) -> RemovalMode {
        self.removal_mode
    }

    // Returns the index of the entry with the given hash whose key satisfies `eq`.
    //
    // Keys are only compared when the cached hash matches.
    pub fn find(&self, hash: u64, mut eq: impl FnMut(&K) -> bool) -> Option<usize> {
        for i in Probe::start(hash, self.capacity()) {
            match &self.slots[i] {
                // reached the end of the cluster, the key cannot exist further along
                None => return None,
                Some(entry) if entry.hash == hash && eq(&entry.key) => return Some(i),
                // the slot contained a different key, keep searching
                Some(_) => {}
            }
        }

        // visited every slot without a match
        None
    }

    #[inline]
    pub fn get(&self, hash: u64, eq: impl FnMut(&K) -> bool) -> Option<&Entry<K, V>> {
        let i = self.find(hash, eq)?;
        self.slots[i].as_ref()
    }

    #[inline]
    pub fn get_mut(
        &mut self,
        hash: u64,
        eq: impl FnMut(&K) -> bool,
    ) -> Option<&mut Entry<K, V>> {
        let i = self.find(hash, eq)?;
        self.slots[i].as_mut()
    }

    // Inserts an entry, replacing the value of an existing entry with an equal key.
    //
    // Returns the previous value if the key was already present. Growth is only
    // triggered when a new entry is created.
    pub fn insert(&mut self, hash: u64, key: K, value: V) -> Result<Option<V>, Error>
    where
        K: Eq,
    {
        let capacity = self.capacity();

        for i in Probe::start(hash, capacity) {
            match &mut self.slots[i] {
                Some(entry) if entry.hash == hash && entry.key == key => {
                    return Ok(Some(mem::replace(&mut entry.value, value)));
                }
                // the slot contained a different key, keep searching
                Some(_) => continue,
                None => {}
            }

            self.slots[i] = Some(Entry { hash, key, value });
            self.len += 1;

            if self.needs_growth() {
                self.grow();
            }

            return Ok(None);
        }

        log::error!(
            "insert probed all {} slots without finding room ({} entries)",
            capacity,
            self.len
        );

        Err(Error::TableFull {
            capacity,
            len: self.len,
        })
    }

    // Removes and returns the entry with the given hash whose key satisfies `eq`.
    //
    // With `RemovalMode::Vacate` earlier removals may have left gaps inside a cluster, so the
    // whole probe cycle is scanned rather than stopping at the first empty slot.
    pub fn remove(&mut self, hash: u64, eq: impl FnMut(&K) -> bool) -> Option<Entry<K, V>> {
        let i = match self.removal_mode {
            RemovalMode::BackwardShift => self.find(hash, eq)?,
            RemovalMode::Vacate => self.scan(hash, eq)?,
        };

        let entry = self.slots[i].take()?;
        self.len -= 1;

        if self.removal_mode == RemovalMode::BackwardShift {
            self.shift_back(i);
        }

        Some(entry)
    }

    // Returns the index of the entry with the given hash whose key satisfies `eq`, skipping
    // over empty slots until every slot has been visited.
    fn scan(&self, hash: u64, mut eq: impl FnMut(&K) -> bool) -> Option<usize> {
        Probe::start(hash, self.capacity()).find(|&i| match &self.slots[i] {
            Some(entry) => entry.hash == hash && eq(&entry.key),
            None => false,
        })
    }

    // Closes the gap left by a removal by moving later members of its cluster back.
    //
    // The entry at `j` may only fill the gap if its home slot does not lie in `(gap, j]`,
    // otherwise it would be moved in front of its home slot and become unreachable.
    fn shift_back(&mut self, mut gap: usize) {
        let capacity = self.capacity();

        for j in Probe::after(gap, capacity) {
            let home = match &self.slots[j] {
                Some(entry) => probe::home(entry.hash, capacity),
                // end of the cluster
                None => break,
            };

            if !probe::within(home, gap, j) {
                log::trace!("shifting entry from slot {} back to slot {}", j, gap);
                self.slots[gap] = self.slots[j].take();
                gap = j;
            }
        }
    }

    #[inline]
    fn needs_growth(&self) -> bool {
        self.len as f64 >= self.capacity() as f64 * self.load_factor
    }

    // Doubles the capacity of the table and moves every entry into the new slots.
    fn grow(&mut self) {
        let capacity = self.capacity().checked_mul(2).expect("capacity overflow");

        log::debug!(
            "growing table from {} to {} slots ({} entries)",
            self.capacity(),
            capacity,
            self.len
        );

        let old = mem::replace(&mut self.slots, empty_slots(capacity));
        for entry in old.into_vec().into_iter().flatten() {
            self.place(entry);
        }
    }

    // Moves an entry into the first empty slot of its probe sequence.
    //
    // Keys are never compared here, every entry being moved is already unique.
    fn place(&mut self, entry: Entry<K, V>) {
        let capacity = self.capacity();
        let slots = &mut self.slots;

        match Probe::start(entry.hash, capacity).find(|&i| slots[i].is_none()) {
            Some(i) => slots[i] = Some(entry),
            // growth always leaves more slots than entries
            None => unreachable!("no free slot among {} after growth", capacity),
        }
    }

    // Returns `true` if any entry holds a value equal to `value`.
    //
    // This is a scan of every slot, regardless of hashing.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.iter().any(|entry| entry.value == *value)
    }

    // Empties every slot, keeping the current capacity.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.len = 0;
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.len,
        }
    }
}

fn empty_slots<K, V>(capacity: usize) -> Box<[Slot<K, V>]> {
    iter::repeat_with(|| None).take(capacity).collect()
}

// An iterator over the occupied slots of a table, in slot order.
pub struct Iter<'a, K, V> {
    slots: slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.slots.find_map(Option::as_ref)?;
        self.remaining -= 1;
        Some(entry)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}
