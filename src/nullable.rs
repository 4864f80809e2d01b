//! Operations over keys that may be absent.
//!
//! The regular table API takes keys by value or by reference, so it can never observe a
//! missing key. These variants accept `Option` keys for callers bridging from data where a
//! key may legitimately be absent, such as decoded records with optional fields, and reject
//! the absent case with an error rather than treating it as a key of its own.

use crate::{Error, ProbingTable};

use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};

impl<K, V, S> ProbingTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns a reference to the value corresponding to the key.
    ///
    /// Returns [`Error::NullKey`] if `key` is `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use probing_table::{Error, ProbingTable};
    ///
    /// let mut table = ProbingTable::new();
    /// table.insert(1, "a").unwrap();
    ///
    /// assert_eq!(table.get_nullable(Some(&1)), Ok(Some(&"a")));
    /// assert_eq!(table.get_nullable::<i32>(None), Err(Error::NullKey));
    /// ```
    pub fn get_nullable<Q>(&self, key: Option<&Q>) -> Result<Option<&V>, Error>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let key = key.ok_or(Error::NullKey)?;
        Ok(self.get(key))
    }

    /// Returns `true` if the table contains a value for the specified key.
    ///
    /// Returns [`Error::NullKey`] if `key` is `None`.
    pub fn contains_key_nullable<Q>(&self, key: Option<&Q>) -> Result<bool, Error>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let key = key.ok_or(Error::NullKey)?;
        Ok(self.contains_key(key))
    }

    /// Inserts a key-value pair into the table.
    ///
    /// Returns [`Error::NullKey`] if `key` is `None`, leaving the table untouched. See
    /// [`insert`](ProbingTable::insert) for details.
    pub fn insert_nullable(&mut self, key: Option<K>, value: V) -> Result<Option<V>, Error> {
        let key = key.ok_or(Error::NullKey)?;
        self.insert(key, value)
    }

    /// Removes a key from the table, returning the value at the key if the key was
    /// previously in the table.
    ///
    /// Returns [`Error::NullKey`] if `key` is `None`.
    pub fn remove_nullable<Q>(&mut self, key: Option<&Q>) -> Result<Option<V>, Error>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let key = key.ok_or(Error::NullKey)?;
        Ok(self.remove(key))
    }

    /// Inserts every key-value pair from `source` into the table.
    ///
    /// Returns [`Error::NullArgument`] if `source` is `None`, or when the first pair with a
    /// `None` key is reached. Pairs inserted before the error remain in the table.
    ///
    /// # Examples
    ///
    /// ```
    /// use probing_table::{Error, ProbingTable};
    ///
    /// let mut table = ProbingTable::new();
    ///
    /// let source = vec![(Some(1), 'a'), (None, 'b'), (Some(3), 'c')];
    /// assert_eq!(table.insert_all_nullable(Some(source)), Err(Error::NullArgument));
    /// assert_eq!(table.len(), 1);
    ///
    /// let source: Option<Vec<(Option<i32>, char)>> = None;
    /// assert_eq!(table.insert_all_nullable(source), Err(Error::NullArgument));
    /// ```
    pub fn insert_all_nullable<I>(&mut self, source: Option<I>) -> Result<(), Error>
    where
        I: IntoIterator<Item = (Option<K>, V)>,
    {
        let source = source.ok_or(Error::NullArgument)?;

        for (key, value) in source {
            let key = key.ok_or(Error::NullArgument)?;
            self.insert(key, value)?;
        }

        Ok(())
    }
}
