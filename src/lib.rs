//! chained-hashmap: a single-threaded, string-keyed map using separate
//! chaining, with external cursors over both the chains and the table.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a resizable table whose every lookup, insert and removal is a
//!   short walk of one chain with a cursor, and whose growth and shrink are
//!   plain structural moves of entries between chains.
//! - Layers:
//!   - Chain<T>: singly-linked sequence stored in a `SlotMap` arena, with
//!     O(1) push at both ends, pop at the front, and `Cursor`/`CursorMut`
//!     for traversal and positional insert/remove.
//!   - ChainedHashMap<V, D, S>: array of lazily created chains of
//!     `(String, V)` entries indexed by `hash(key) mod capacity`; owns the
//!     key copies and hands values it gives up to a `ValueDestructor`.
//!   - TableIter: walks buckets in index order and each chain front to back.
//!
//! Constraints
//! - Single-threaded; no internal synchronization.
//! - Keys are always `str`; the table stores its own copy of each key.
//! - At most one entry per key; every entry sits in the bucket chosen by the
//!   current capacity, so every resize re-buckets all entries at once.
//! - The bucket array is never empty.
//!
//! Ownership of values
//! - The value type is generic. The destructor strategy receives the old
//!   value on an overwriting insert and every live value when the table is
//!   dropped. `remove` hands the value back to the caller instead.
//! - `NoDestructor` simply drops values, which is what a caller wants when
//!   `V` is a handle (`&T`, `Rc<T>`, an index) to storage it manages itself.
//!
//! Failure semantics
//! - Inserts that need memory reserve it fallibly for the bucket array and
//!   the key copy and report `TableError::AllocationFailure` without
//!   changing the table. Missing keys are `None`, never errors.
//! - A shrink that cannot allocate is logged and skipped.
//!
//! Hashing and resizing
//! - The default hasher is DJB2 (`BuildDjb2`), fed the raw key bytes.
//!   Any `BuildHasher` can be injected with `with_hasher`.
//! - `ResizePolicy` holds the thresholds: grow at load 2 by ×3, shrink at
//!   load 1/4 by ÷2 while the count exceeds the initial capacity (17).
//!
//! Notes and non-goals
//! - Iterators borrow the table; mutation during iteration does not compile.
//! - No persistence, no concurrent access, no generic key types.

pub mod chain;
pub mod chained_hash_map;
#[cfg(test)]
mod chained_hash_map_proptest;
pub mod destructor;
mod error;
pub mod hasher;
pub mod policy;
pub mod table_iter;

// Public surface
pub use chain::{Chain, Cursor, CursorMut};
pub use chained_hash_map::ChainedHashMap;
pub use destructor::{NoDestructor, ValueDestructor};
pub use error::TableError;
pub use hasher::{BuildDjb2, Djb2Hasher};
pub use policy::ResizePolicy;
pub use table_iter::TableIter;
