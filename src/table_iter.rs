//! External iterator over a `ChainedHashMap`.
//!
//! Walks buckets in index order and each bucket's chain front to back. It
//! keeps a chain cursor on the current bucket and counts visited entries;
//! it is at end once that count reaches the table's length at creation.
//! The iterator borrows the table, so the table cannot change underneath it.

use crate::chain::{Chain, Cursor};
use crate::chained_hash_map::{ChainedHashMap, Entry};
use crate::destructor::ValueDestructor;
use core::iter::FusedIterator;

pub struct TableIter<'a, V, D, S>
where
    D: ValueDestructor<V>,
{
    table: &'a ChainedHashMap<V, D, S>,
    bucket: usize,
    cursor: Option<Cursor<'a, Entry<V>>>,
    visited: usize,
    total: usize,
}

impl<'a, V, D, S> TableIter<'a, V, D, S>
where
    D: ValueDestructor<V>,
{
    /// Positions at the first entry of the first non-empty bucket, or at end
    /// when the table is empty.
    pub fn new(table: &'a ChainedHashMap<V, D, S>) -> Self {
        let total = table.len();
        let mut iter = Self {
            table,
            bucket: table.capacity(),
            cursor: None,
            visited: 0,
            total,
        };
        if total > 0 {
            iter.open_from(0);
        }
        iter
    }

    /// Moves to the next entry. Returns `false` once every entry was visited.
    pub fn advance(&mut self) -> bool {
        if self.at_end() {
            return false;
        }
        let Some(cursor) = self.cursor.as_mut() else {
            return false;
        };
        cursor.advance();
        let exhausted = cursor.at_end();
        self.visited += 1;
        if exhausted && !self.at_end() {
            self.open_from(self.bucket + 1);
        }
        true
    }

    pub fn current_key(&self) -> Option<&'a str> {
        self.current_entry().map(|entry| entry.key.as_str())
    }

    pub fn current_value(&self) -> Option<&'a V> {
        self.current_entry().map(|entry| &entry.value)
    }

    pub fn at_end(&self) -> bool {
        self.visited == self.total
    }

    fn current_entry(&self) -> Option<&'a Entry<V>> {
        if self.at_end() {
            return None;
        }
        self.cursor.as_ref()?.current()
    }

    /// Opens a cursor on the first non-empty bucket at or after `start`.
    fn open_from(&mut self, start: usize) {
        let buckets = self.table.buckets();
        let found = buckets
            .iter()
            .enumerate()
            .skip(start)
            .find_map(|(idx, bucket)| match bucket {
                Some(chain) if !chain.is_empty() => Some((idx, chain)),
                _ => None,
            });
        match found {
            Some((idx, chain)) => {
                self.bucket = idx;
                self.cursor = Some(Chain::cursor(chain));
            }
            None => {
                self.bucket = buckets.len();
                self.cursor = None;
            }
        }
    }
}

impl<'a, V, D, S> Iterator for TableIter<'a, V, D, S>
where
    D: ValueDestructor<V>,
{
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.current_entry()?;
        self.advance();
        Some((entry.key.as_str(), &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total - self.visited;
        (left, Some(left))
    }
}

impl<V, D, S> ExactSizeIterator for TableIter<'_, V, D, S> where D: ValueDestructor<V> {}

impl<V, D, S> FusedIterator for TableIter<'_, V, D, S> where D: ValueDestructor<V> {}
