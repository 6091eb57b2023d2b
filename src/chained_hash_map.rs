//! ChainedHashMap: string-keyed table using separate chaining over `Chain`s.

use crate::chain::Chain;
use crate::destructor::{NoDestructor, ValueDestructor};
use crate::error::TableError;
use crate::hasher::{bucket_index, BuildDjb2};
use crate::policy::ResizePolicy;
use crate::table_iter::TableIter;
use core::fmt;
use core::hash::BuildHasher;
use core::mem;
use log::{debug, trace, warn};
use std::collections::TryReserveError;

#[derive(Debug)]
pub(crate) struct Entry<V> {
    pub(crate) key: String,
    pub(crate) value: V,
}

/// A bucket stays `None` until a key first hashes to it.
pub(crate) type Bucket<V> = Option<Chain<Entry<V>>>;

pub struct ChainedHashMap<V, D = NoDestructor, S = BuildDjb2>
where
    D: ValueDestructor<V>,
{
    buckets: Vec<Bucket<V>>,
    count: usize,
    destructor: D,
    hasher: S,
    policy: ResizePolicy,
}

impl<V> ChainedHashMap<V> {
    pub fn new() -> Self {
        Self::from_parts(ResizePolicy::DEFAULT, NoDestructor, BuildDjb2)
    }
}

impl<V> Default for ChainedHashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, D> ChainedHashMap<V, D>
where
    D: ValueDestructor<V>,
{
    /// Creates a table that hands overwritten and dropped values to `destructor`.
    pub fn with_destructor(destructor: D) -> Self {
        Self::from_parts(ResizePolicy::DEFAULT, destructor, BuildDjb2)
    }
}

impl<V, S> ChainedHashMap<V, NoDestructor, S>
where
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::from_parts(ResizePolicy::DEFAULT, NoDestructor, hasher)
    }
}

impl<V, D, S> ChainedHashMap<V, D, S>
where
    D: ValueDestructor<V>,
    S: BuildHasher,
{
    pub fn with_destructor_and_hasher(destructor: D, hasher: S) -> Self {
        Self::from_parts(ResizePolicy::DEFAULT, destructor, hasher)
    }

    /// Creates a table with custom resize thresholds.
    pub fn with_policy(policy: ResizePolicy, destructor: D, hasher: S) -> Result<Self, TableError> {
        policy.validate()?;
        let buckets = empty_buckets(policy.initial_capacity)?;
        Ok(Self {
            buckets,
            count: 0,
            destructor,
            hasher,
            policy,
        })
    }

    fn from_parts(policy: ResizePolicy, destructor: D, hasher: S) -> Self {
        Self {
            buckets: (0..policy.initial_capacity).map(|_| None).collect(),
            count: 0,
            destructor,
            hasher,
            policy,
        }
    }
}

impl<V, D, S> ChainedHashMap<V, D, S>
where
    D: ValueDestructor<V>,
{
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of bucket slots; never zero.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.capacity() as f64
    }

    pub fn policy(&self) -> &ResizePolicy {
        &self.policy
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    pub(crate) fn buckets(&self) -> &[Bucket<V>] {
        &self.buckets
    }
}

impl<V, D, S> ChainedHashMap<V, D, S>
where
    D: ValueDestructor<V>,
    S: BuildHasher,
{
    /// Inserts or overwrites `key`.
    ///
    /// On overwrite the previous value goes to the destructor and `len` is
    /// unchanged. On error the table is left as it was.
    pub fn insert(&mut self, key: &str, value: V) -> Result<(), TableError> {
        if self.policy.should_grow(self.count, self.capacity()) {
            self.resize(self.policy.grown(self.capacity()))?;
        }

        let idx = bucket_index(&self.hasher, key, self.capacity());
        let chain = self.buckets[idx].get_or_insert_with(|| {
            trace!("allocating bucket {idx}");
            Chain::new()
        });

        let mut cursor = chain.cursor_mut();
        if cursor.seek(|entry| entry.key == key) {
            if let Some(entry) = cursor.current_mut() {
                let old = mem::replace(&mut entry.value, value);
                self.destructor.destroy(old);
                return Ok(());
            }
        }

        let key = copy_key(key)?;
        cursor.insert(Entry { key, value });
        self.count += 1;
        Ok(())
    }

    /// Removes `key` and returns its value without running the destructor.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = bucket_index(&self.hasher, key, self.capacity());
        let chain = self.buckets[idx].as_mut()?;
        let mut cursor = chain.cursor_mut();
        if !cursor.seek(|entry| entry.key == key) {
            return None;
        }
        let entry = cursor.remove()?;
        self.count -= 1;

        if self.policy.should_shrink(self.count, self.capacity()) {
            let target = self.policy.shrunk(self.capacity());
            if let Err(err) = self.resize(target) {
                warn!(
                    "keeping {} buckets after failed shrink to {}: {}",
                    self.capacity(),
                    target,
                    err
                );
            }
        }

        Some(entry.value)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.find_entry(key).map(|entry| &entry.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let idx = bucket_index(&self.hasher, key, self.capacity());
        let mut cursor = self.buckets[idx].as_mut()?.cursor_mut();
        if !cursor.seek(|entry| entry.key == key) {
            return None;
        }
        cursor.into_current_mut().map(|entry| &mut entry.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find_entry(key).is_some()
    }

    pub fn iter(&self) -> TableIter<'_, V, D, S> {
        TableIter::new(self)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    fn find_entry(&self, key: &str) -> Option<&Entry<V>> {
        let idx = bucket_index(&self.hasher, key, self.capacity());
        let mut cursor = self.buckets[idx].as_ref()?.cursor();
        if cursor.seek(|entry| entry.key == key) {
            cursor.current()
        } else {
            None
        }
    }

    /// Moves every entry into a fresh array of `new_capacity` buckets.
    ///
    /// The only fallible step is reserving the new array, which happens
    /// before anything is moved; on failure the table keeps its old array.
    /// Entries move by value: keys are not copied and the destructor is not run.
    fn resize(&mut self, new_capacity: usize) -> Result<(), TableError> {
        let old_capacity = self.capacity();
        let mut buckets = empty_buckets(new_capacity)?;
        let old = mem::take(&mut self.buckets);

        for mut chain in old.into_iter().flatten() {
            while let Some(entry) = chain.pop_front() {
                let idx = bucket_index(&self.hasher, &entry.key, new_capacity);
                buckets[idx].get_or_insert_with(Chain::new).push_back(entry);
            }
        }
        self.buckets = buckets;

        debug!(
            "resized bucket array from {} to {} slots ({} entries)",
            old_capacity, new_capacity, self.count
        );
        #[cfg(debug_assertions)]
        self.assert_consistent();
        Ok(())
    }

    #[cfg(debug_assertions)]
    fn assert_consistent(&self) {
        let mut live = 0;
        for (idx, chain) in self.buckets.iter().enumerate() {
            let Some(chain) = chain else { continue };
            for entry in chain.iter() {
                debug_assert_eq!(
                    bucket_index(&self.hasher, &entry.key, self.capacity()),
                    idx,
                    "entry {:?} is in the wrong bucket",
                    entry.key
                );
                live += 1;
            }
        }
        debug_assert_eq!(live, self.count, "count out of sync with bucket contents");
    }
}

impl<V, D, S> Drop for ChainedHashMap<V, D, S>
where
    D: ValueDestructor<V>,
{
    fn drop(&mut self) {
        let destructor = &mut self.destructor;
        for chain in self.buckets.drain(..).flatten() {
            chain.destroy_with(|entry| destructor.destroy(entry.value));
        }
    }
}

impl<V, D, S> fmt::Debug for ChainedHashMap<V, D, S>
where
    V: fmt::Debug,
    D: ValueDestructor<V>,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, V, D, S> IntoIterator for &'a ChainedHashMap<V, D, S>
where
    D: ValueDestructor<V>,
    S: BuildHasher,
{
    type Item = (&'a str, &'a V);
    type IntoIter = TableIter<'a, V, D, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn empty_buckets<V>(capacity: usize) -> Result<Vec<Bucket<V>>, TryReserveError> {
    let mut buckets = Vec::new();
    buckets.try_reserve_exact(capacity)?;
    buckets.resize_with(capacity, || None);
    Ok(buckets)
}

fn copy_key(key: &str) -> Result<String, TryReserveError> {
    let mut owned = String::new();
    owned.try_reserve_exact(key.len())?;
    owned.push_str(key);
    Ok(owned)
}
