//! Core LRU engine: predecessor-indexed singly-linked list over an arena.
//!
//! Entries live in a `Vec` of slots addressed by integer index; `next`
//! links and index values are slot indices, never references. The key
//! index maps each live key to the slot *preceding* it, which is what
//! makes splicing an arbitrary entry out of a singly-linked chain O(1):
//! the predecessor is exactly what relinking needs.

use std::collections::HashMap;

use ahash::RandomState;

use crate::error::{Error, Result};

/// Smallest accepted capacity; requests below are clamped up.
pub const MIN_CAPACITY: usize = 10;
/// Largest accepted capacity; requests above are clamped down.
pub const MAX_CAPACITY: usize = 1000;
/// Capacity used by [`FastLru::default`].
pub const DEFAULT_CAPACITY: usize = 100;

/// Arena index of the sentinel header slot.
const HEADER: usize = 0;

/// One arena slot. Slot 0 is the permanent sentinel header: empty key,
/// no value, never indexed, never reported to callers. Live slots always
/// hold `Some` value.
struct Slot<V> {
    key: String,
    value: Option<V>,
    next: Option<usize>,
}

impl<V> Slot<V> {
    fn vacant() -> Self {
        Self {
            key: String::new(),
            value: None,
            next: None,
        }
    }
}

/// Fixed-capacity LRU cache with O(1) lookup, insertion, and eviction.
///
/// The chain runs from most-recently-used (the sentinel's successor) to
/// least-recently-used (`tail`). The key index maps each key to its
/// *predecessor* slot, with the sentinel standing in as predecessor of
/// the front entry, so "insert at front" and "unlink from the middle"
/// never special-case an empty list or a first element.
///
/// The engine assumes a single caller; share it across threads through
/// [`SharedCache`](crate::SharedCache) or an external lock.
pub struct FastLru<V> {
    /// Slot arena; slot 0 is the sentinel header.
    slots: Vec<Slot<V>>,
    /// Recycled slot indices from evicted entries.
    free: Vec<usize>,
    /// key -> index of the slot immediately preceding that key's slot.
    index: HashMap<String, usize, RandomState>,
    /// Back-most live slot, or the sentinel when empty.
    tail: usize,
    len: usize,
    capacity: usize,
}

impl<V> FastLru<V> {
    /// Create a cache with the requested capacity, clamped to
    /// `[MIN_CAPACITY, MAX_CAPACITY]`. Never fails.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(MIN_CAPACITY, MAX_CAPACITY);
        let mut slots = Vec::with_capacity(capacity + 1);
        slots.push(Slot::vacant());

        Self {
            slots,
            free: Vec::new(),
            index: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            tail: HEADER,
            len: 0,
            capacity,
        }
    }

    /// Look up a key, promoting its entry to most-recently-used.
    ///
    /// Returns [`Error::Empty`] when the cache holds no entries and
    /// [`Error::NotFound`] when the key is absent.
    pub fn get(&mut self, key: &str) -> Result<&V> {
        self.probe(key)?;
        let front = self.slots[HEADER].next.ok_or(Error::Unknown)?;
        self.slots[front].value.as_ref().ok_or(Error::Unknown)
    }

    /// Insert a key/value pair, or update the value of an existing key.
    ///
    /// An existing key is promoted to most-recently-used and its value
    /// overwritten unconditionally: payloads are opaque to the engine and
    /// carry no equality, so redundant writes are not detected here (see
    /// [`put_if_changed`](Self::put_if_changed) for comparable payloads).
    /// A new key is inserted at the front, evicting the least-recently-used
    /// entry first when the cache is full.
    ///
    /// Only fails with [`Error::Unknown`], which signals an internal
    /// invariant violation and never occurs in correct operation.
    pub fn put(&mut self, key: &str, value: V) -> Result<()> {
        match self.probe(key) {
            Ok(()) => {
                let front = self.slots[HEADER].next.ok_or(Error::Unknown)?;
                self.slots[front].value = Some(value);
                Ok(())
            }
            Err(Error::Empty) => {
                self.insert_first(key, value);
                Ok(())
            }
            Err(Error::NotFound) => self.insert_front(key, value),
            Err(Error::Unknown) => Err(Error::Unknown),
        }
    }

    /// Like [`put`](Self::put), but skips the overwrite when the stored
    /// value already compares equal to `value`. The entry is still
    /// promoted to most-recently-used.
    pub fn put_if_changed(&mut self, key: &str, value: V) -> Result<()>
    where
        V: PartialEq,
    {
        match self.probe(key) {
            Ok(()) => {
                let front = self.slots[HEADER].next.ok_or(Error::Unknown)?;
                let slot = &mut self.slots[front];
                if slot.value.as_ref() != Some(&value) {
                    slot.value = Some(value);
                }
                Ok(())
            }
            Err(Error::Empty) => {
                self.insert_first(key, value);
                Ok(())
            }
            Err(Error::NotFound) => self.insert_front(key, value),
            Err(Error::Unknown) => Err(Error::Unknown),
        }
    }

    /// All live values ordered most-recently-used first.
    ///
    /// O(n); does not change recency order. Empty cache yields an empty
    /// vector, not an error.
    pub fn values(&self) -> Vec<&V> {
        let mut out = Vec::with_capacity(self.len);
        let mut cursor = self.slots[HEADER].next;
        while let Some(idx) = cursor {
            let slot = &self.slots[idx];
            if let Some(value) = &slot.value {
                out.push(value);
            }
            cursor = slot.next;
        }
        out
    }

    /// Drop every entry and restore the empty-cache state. The clamped
    /// capacity is unchanged.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.slots.push(Slot::vacant());
        self.free.clear();
        self.index.clear();
        self.tail = HEADER;
        self.len = 0;
    }

    /// Whether the key is currently cached. Does not promote.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.slots[HEADER].next.is_none()
    }

    /// Effective (clamped) capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Find a key and promote its entry to the front. Distinguishes the
    /// empty cache from a missing key so `put` can pick its insert path.
    fn probe(&mut self, key: &str) -> Result<()> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        let pred = *self.index.get(key).ok_or(Error::NotFound)?;
        self.promote(pred)
    }

    /// Relocate the entry after `pred` to the front of the chain.
    ///
    /// Unlink-and-reinsert using only forward links and predecessor
    /// lookups: at most a fixed handful of slots and index entries are
    /// touched, regardless of cache size.
    fn promote(&mut self, pred: usize) -> Result<()> {
        // Predecessor is the sentinel: the target is already the front.
        if pred == HEADER {
            return Ok(());
        }
        let target = self.slots[pred].next.ok_or(Error::Unknown)?;

        match self.slots[target].next {
            // Target is the tail; its predecessor becomes the new tail.
            None => {
                self.slots[pred].next = None;
                self.tail = pred;
            }
            // Unlink from the middle; the successor's predecessor is now
            // `pred`.
            Some(succ) => {
                *self
                    .index
                    .get_mut(&self.slots[succ].key)
                    .ok_or(Error::Unknown)? = pred;
                self.slots[pred].next = Some(succ);
            }
        }

        // Splice in front of the old front entry.
        let old_front = self.slots[HEADER].next.ok_or(Error::Unknown)?;
        self.slots[target].next = Some(old_front);
        *self
            .index
            .get_mut(&self.slots[old_front].key)
            .ok_or(Error::Unknown)? = target;
        self.slots[HEADER].next = Some(target);
        *self
            .index
            .get_mut(&self.slots[target].key)
            .ok_or(Error::Unknown)? = HEADER;
        Ok(())
    }

    /// First insertion into an empty cache: the new slot is both front
    /// and tail.
    fn insert_first(&mut self, key: &str, value: V) {
        let idx = self.alloc(key, value);
        self.slots[HEADER].next = Some(idx);
        self.tail = idx;
        self.index.insert(key.to_owned(), HEADER);
        self.len += 1;
    }

    /// Insert a new key at the front of a non-empty cache, evicting the
    /// tail first when full.
    fn insert_front(&mut self, key: &str, value: V) -> Result<()> {
        if self.len == self.capacity {
            self.evict_tail()?;
        }
        // Capacity is at least MIN_CAPACITY, so eviction never empties
        // the chain and a front entry always remains.
        let old_front = self.slots[HEADER].next.ok_or(Error::Unknown)?;

        let idx = self.alloc(key, value);
        self.slots[idx].next = Some(old_front);
        *self
            .index
            .get_mut(&self.slots[old_front].key)
            .ok_or(Error::Unknown)? = idx;
        self.slots[HEADER].next = Some(idx);
        self.index.insert(key.to_owned(), HEADER);
        self.len += 1;
        Ok(())
    }

    /// Remove the least-recently-used entry. O(1): the tail's predecessor
    /// comes straight from the key index.
    fn evict_tail(&mut self) -> Result<()> {
        let tail = self.tail;
        let pred = self
            .index
            .remove(&self.slots[tail].key)
            .ok_or(Error::Unknown)?;
        self.slots[pred].next = None;
        self.tail = pred;
        self.slots[tail] = Slot::vacant();
        self.free.push(tail);
        self.len -= 1;
        Ok(())
    }

    /// Place a live slot into the arena, reusing a freed index when one
    /// is available.
    fn alloc(&mut self, key: &str, value: V) -> usize {
        let slot = Slot {
            key: key.to_owned(),
            value: Some(value),
            next: None,
        };
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = slot;
                idx
            }
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            }
        }
    }
}

impl<V> Default for FastLru<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
