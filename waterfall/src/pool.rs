use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::PoolEntry;
use crate::key::{ItemType, TypeMap};

#[derive(Clone, Debug)]
struct Parked<T> {
    seq: u64,
    entry: PoolEntry<T>,
}

/// Type-keyed, insertion-ordered collection of evicted-but-reusable slots.
///
/// Entries of one type are kept oldest-first. A pool never holds the same logical index twice.
#[derive(Clone, Debug)]
pub struct RecyclePool<T> {
    lists: TypeMap<T, VecDeque<Parked<T>>>,
    len: usize,
    next_seq: u64,
}

impl<T: ItemType> Default for RecyclePool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ItemType> RecyclePool<T> {
    pub fn new() -> Self {
        Self {
            lists: TypeMap::new(),
            len: 0,
            next_seq: 0,
        }
    }

    pub fn push(&mut self, entry: PoolEntry<T>) {
        debug_assert!(
            !self.contains(&entry.item_type, entry.index),
            "RecyclePool: index {} pushed twice",
            entry.index
        );
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.lists
            .entry(entry.item_type.clone())
            .or_default()
            .push_back(Parked { seq, entry });
        self.len += 1;
    }

    pub fn peek_oldest(&self, item_type: &T) -> Option<&PoolEntry<T>> {
        self.lists
            .get(item_type)
            .and_then(|list| list.front())
            .map(|p| &p.entry)
    }

    pub fn peek_newest(&self, item_type: &T) -> Option<&PoolEntry<T>> {
        self.lists
            .get(item_type)
            .and_then(|list| list.back())
            .map(|p| &p.entry)
    }

    pub fn contains(&self, item_type: &T, index: usize) -> bool {
        self.lists
            .get(item_type)
            .is_some_and(|list| list.iter().any(|p| p.entry.index == index))
    }

    /// Removes the entry holding `index` for `item_type`. Returns `None` if absent.
    pub fn remove(&mut self, item_type: &T, index: usize) -> Option<PoolEntry<T>> {
        let list = self.lists.get_mut(item_type)?;
        let pos = list.iter().position(|p| p.entry.index == index)?;
        let parked = list.remove(pos)?;
        if list.is_empty() {
            self.lists.remove(item_type);
        }
        self.len -= 1;
        Some(parked.entry)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.lists.clear();
        self.len = 0;
    }

    /// Iterates over every entry without allocating. Order across types is unspecified.
    pub fn for_each(&self, mut f: impl FnMut(&PoolEntry<T>)) {
        for list in self.lists.values() {
            for p in list {
                f(&p.entry);
            }
        }
    }

    /// Snapshot of every entry across all types, in insertion order.
    pub fn all_entries(&self) -> Vec<PoolEntry<T>> {
        let mut parked: Vec<&Parked<T>> = self.lists.values().flatten().collect();
        parked.sort_unstable_by_key(|p| p.seq);
        parked.into_iter().map(|p| p.entry.clone()).collect()
    }
}
