//! Chain: singly-linked sequence stored in a slot arena, with external cursors.
//!
//! Nodes live in a `SlotMap` and link forward through generational keys,
//! so removing a node in the middle never invalidates the keys of its
//! neighbours and freed slots are reused by later inserts. The chain keeps
//! `head`/`tail` keys for O(1) access at both ends; only forward links are
//! stored; cursors remember the predecessor themselves.

use core::fmt;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    struct NodeKey;
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    next: Option<NodeKey>,
}

pub struct Chain<T> {
    nodes: SlotMap<NodeKey, Node<T>>,
    head: Option<NodeKey>,
    tail: Option<NodeKey>,
}

impl<T> Chain<T> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    /// Number of elements; tracked by the arena, never recomputed.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn push_front(&mut self, value: T) {
        let key = self.nodes.insert(Node {
            value,
            next: self.head,
        });
        if self.tail.is_none() {
            self.tail = Some(key);
        }
        self.head = Some(key);
    }

    pub fn push_back(&mut self, value: T) {
        let key = self.nodes.insert(Node { value, next: None });
        match self.tail.and_then(|t| self.nodes.get_mut(t)) {
            Some(last) => last.next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
    }

    /// Removes the first element and returns it, or `None` if the chain is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        let key = self.head?;
        let node = self.nodes.remove(key)?;
        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        Some(node.value)
    }

    pub fn peek_front(&self) -> Option<&T> {
        self.head
            .and_then(|k| self.nodes.get(k))
            .map(|n| &n.value)
    }

    pub fn peek_front_mut(&mut self) -> Option<&mut T> {
        self.head
            .and_then(|k| self.nodes.get_mut(k))
            .map(|n| &mut n.value)
    }

    pub fn peek_back(&self) -> Option<&T> {
        self.tail
            .and_then(|k| self.nodes.get(k))
            .map(|n| &n.value)
    }

    pub fn peek_back_mut(&mut self) -> Option<&mut T> {
        self.tail
            .and_then(|k| self.nodes.get_mut(k))
            .map(|n| &mut n.value)
    }

    /// Consumes the chain, handing every element to `destroy` front to back.
    ///
    /// Dropping a chain releases its nodes without a callback; use this
    /// when elements need explicit teardown.
    pub fn destroy_with<F>(mut self, mut destroy: F)
    where
        F: FnMut(T),
    {
        while let Some(value) = self.pop_front() {
            destroy(value);
        }
    }

    /// Applies `visit` to each element front to back until it returns `false`.
    pub fn for_each_while<F>(&self, mut visit: F)
    where
        F: FnMut(&T) -> bool,
    {
        for value in self.iter() {
            if !visit(value) {
                break;
            }
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            next: self.head,
            remaining: self.len(),
        }
    }

    /// Read-only cursor positioned at the first element.
    pub fn cursor(&self) -> Cursor<'_, T> {
        Cursor {
            chain: self,
            current: self.head,
        }
    }

    /// Mutating cursor positioned at the first element.
    pub fn cursor_mut(&mut self) -> CursorMut<'_, T> {
        let current = self.head;
        CursorMut {
            chain: self,
            prev: None,
            current,
        }
    }
}

impl<T> Default for Chain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Chain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for Chain<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for Chain<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut chain = Chain::new();
        chain.extend(iter);
        chain
    }
}

/// Iterator over the elements of a `Chain`, front to back.
pub struct Iter<'a, T> {
    nodes: &'a SlotMap<NodeKey, Node<T>>,
    next: Option<NodeKey>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.next?)?;
        self.next = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Read-only external cursor. At end once it has walked past the last element.
pub struct Cursor<'a, T> {
    chain: &'a Chain<T>,
    current: Option<NodeKey>,
}

impl<'a, T> Cursor<'a, T> {
    /// Moves to the next element. Returns `false` (and stays put) when already at end.
    pub fn advance(&mut self) -> bool {
        match self.current {
            Some(k) => {
                self.current = self.chain.nodes.get(k).and_then(|n| n.next);
                true
            }
            None => false,
        }
    }

    pub fn current(&self) -> Option<&'a T> {
        self.current
            .and_then(|k| self.chain.nodes.get(k))
            .map(|n| &n.value)
    }

    pub fn at_end(&self) -> bool {
        self.current.is_none()
    }

    /// Advances until `pred` holds for the current element. Returns `false` at end.
    pub fn seek<P>(&mut self, mut pred: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        while let Some(value) = self.current() {
            if pred(value) {
                return true;
            }
            self.advance();
        }
        false
    }
}

/// Mutating external cursor supporting positional insert and removal.
pub struct CursorMut<'a, T> {
    chain: &'a mut Chain<T>,
    prev: Option<NodeKey>,
    current: Option<NodeKey>,
}

impl<'a, T> CursorMut<'a, T> {
    pub fn advance(&mut self) -> bool {
        match self.current {
            Some(k) => {
                self.prev = Some(k);
                self.current = self.chain.nodes.get(k).and_then(|n| n.next);
                true
            }
            None => false,
        }
    }

    pub fn current(&self) -> Option<&T> {
        self.current
            .and_then(|k| self.chain.nodes.get(k))
            .map(|n| &n.value)
    }

    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.current
            .and_then(|k| self.chain.nodes.get_mut(k))
            .map(|n| &mut n.value)
    }

    /// Consumes the cursor, returning a reference to the current element
    /// that lives as long as the chain borrow.
    pub fn into_current_mut(self) -> Option<&'a mut T> {
        let CursorMut { chain, current, .. } = self;
        chain.nodes.get_mut(current?).map(|n| &mut n.value)
    }

    pub fn at_end(&self) -> bool {
        self.current.is_none()
    }

    pub fn seek<P>(&mut self, mut pred: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        while let Some(value) = self.current() {
            if pred(value) {
                return true;
            }
            self.advance();
        }
        false
    }

    /// Inserts `value` before the current element; the cursor then points at it.
    /// At end this appends to the back of the chain.
    pub fn insert(&mut self, value: T) {
        let key = self.chain.nodes.insert(Node {
            value,
            next: self.current,
        });
        match self.prev.and_then(|p| self.chain.nodes.get_mut(p)) {
            Some(prev) => prev.next = Some(key),
            None => self.chain.head = Some(key),
        }
        if self.current.is_none() {
            self.chain.tail = Some(key);
        }
        self.current = Some(key);
    }

    /// Unlinks the current element and returns it; the cursor moves to its
    /// successor. Returns `None` at end.
    pub fn remove(&mut self) -> Option<T> {
        let node = self.chain.nodes.remove(self.current?)?;
        match self.prev.and_then(|p| self.chain.nodes.get_mut(p)) {
            Some(prev) => prev.next = node.next,
            None => self.chain.head = node.next,
        }
        if node.next.is_none() {
            self.chain.tail = self.prev;
        }
        self.current = node.next;
        Some(node.value)
    }
}
