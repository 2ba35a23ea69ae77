//! Indexed binary min-heap.
//!
//! A plain binary heap cannot find a live entry without a linear scan. This
//! one keeps a value -> slot map beside the heap array and rewrites it on
//! every swap, which makes `index_of` O(1) and `update`/`remove` O(log n).
//!
//! Priorities only need `PartialOrd`. An incomparable priority (a NaN weight)
//! never compares less than anything, so it sinks no further than where it
//! was inserted.

use std::fmt::Debug;
use std::hash::Hash;
use trellis_common::utils::error::{Error, Result};
use trellis_common::utils::hash::FxHashMap;

#[derive(Debug, Clone)]
struct HeapEntry<V, P> {
    priority: P,
    value: V,
}

/// A min-priority queue supporting decrease-key (and increase-key).
///
/// Values must be unique. The order among equal priorities is unspecified.
///
/// Storage grows by doubling plus one (`0 → 1 → 3 → 7 …`) and never shrinks
/// on its own; call [`trim_excess`](Self::trim_excess) to release memory.
///
/// # Example
///
/// ```
/// use trellis_core::IndexedPriorityQueue;
///
/// let mut queue = IndexedPriorityQueue::new();
/// queue.add(5, "a").unwrap();
/// queue.add(3, "b").unwrap();
/// queue.update(&"a", 1).unwrap();
///
/// assert_eq!(queue.remove_min().unwrap(), (1, "a"));
/// assert_eq!(queue.remove_min().unwrap(), (3, "b"));
/// assert!(queue.remove_min().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct IndexedPriorityQueue<V, P> {
    entries: Vec<HeapEntry<V, P>>,
    slots: FxHashMap<V, usize>,
}

impl<V, P> IndexedPriorityQueue<V, P>
where
    V: Clone + Eq + Hash + Debug,
    P: PartialOrd,
{
    /// Creates an empty queue without allocating.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty queue able to hold `capacity` entries before growing.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = FxHashMap::default();
        slots.reserve(capacity);
        Self {
            entries: Vec::with_capacity(capacity),
            slots,
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the queue holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries the backing array can hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Inserts `value` with the given priority.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateElement`] if `value` is already queued.
    pub fn add(&mut self, priority: P, value: V) -> Result<()> {
        if self.slots.contains_key(&value) {
            return Err(Error::duplicate(&value));
        }

        if self.entries.len() == self.entries.capacity() {
            let additional = self.entries.capacity() + 1;
            self.entries.reserve_exact(additional);
        }

        let slot = self.entries.len();
        self.slots.insert(value.clone(), slot);
        self.entries.push(HeapEntry { priority, value });
        self.sift_up(slot);
        Ok(())
    }

    /// Returns the minimum entry without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyQueue`] if the queue is empty.
    pub fn peek_min(&self) -> Result<(&P, &V)> {
        self.entries
            .first()
            .map(|entry| (&entry.priority, &entry.value))
            .ok_or(Error::EmptyQueue)
    }

    /// Removes and returns the minimum entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyQueue`] if the queue is empty.
    pub fn remove_min(&mut self) -> Result<(P, V)> {
        if self.entries.is_empty() {
            return Err(Error::EmptyQueue);
        }
        Ok(self.remove_at(0))
    }

    /// Replaces the priority of a queued value and restores heap order.
    ///
    /// Works in both directions: a smaller priority sifts up, a larger one
    /// sifts down.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingElement`] if `value` is not queued.
    pub fn update(&mut self, value: &V, priority: P) -> Result<()> {
        let slot = *self.slots.get(value).ok_or_else(|| Error::missing(value))?;
        self.entries[slot].priority = priority;
        self.restore(slot);
        Ok(())
    }

    /// Removes a queued value wherever it sits in the heap.
    pub fn remove(&mut self, value: &V) -> Option<(P, V)> {
        let slot = *self.slots.get(value)?;
        Some(self.remove_at(slot))
    }

    /// Returns the current heap slot of `value`.
    #[must_use]
    pub fn index_of(&self, value: &V) -> Option<usize> {
        self.slots.get(value).copied()
    }

    /// Returns true if `value` is queued.
    #[must_use]
    pub fn contains(&self, value: &V) -> bool {
        self.slots.contains_key(value)
    }

    /// Returns the priority `value` is queued with.
    #[must_use]
    pub fn priority_of(&self, value: &V) -> Option<&P> {
        self.slots.get(value).map(|&slot| &self.entries[slot].priority)
    }

    /// Removes every entry, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.slots.clear();
    }

    /// Shrinks the backing storage to fit the current entries.
    pub fn trim_excess(&mut self) {
        self.entries.shrink_to_fit();
        self.slots.shrink_to_fit();
    }

    /// Iterates entries in heap-array order (not sorted).
    pub fn iter(&self) -> impl Iterator<Item = (&P, &V)> {
        self.entries.iter().map(|entry| (&entry.priority, &entry.value))
    }

    /// Drains the queue into ascending priority order.
    #[must_use]
    pub fn into_sorted_vec(mut self) -> Vec<(P, V)> {
        let mut sorted = Vec::with_capacity(self.entries.len());
        while !self.entries.is_empty() {
            sorted.push(self.remove_at(0));
        }
        sorted
    }

    /// Checks the heap order and the slot index.
    ///
    /// Every non-root entry must not compare below its parent, and the slot
    /// map must point at exactly the entries stored.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let ordered = (1..self.entries.len()).all(|i| {
            let parent = (i - 1) / 2;
            !(self.entries[i].priority < self.entries[parent].priority)
        });
        let indexed = self.slots.len() == self.entries.len()
            && self
                .entries
                .iter()
                .enumerate()
                .all(|(i, entry)| self.slots.get(&entry.value) == Some(&i));
        ordered && indexed
    }

    fn remove_at(&mut self, slot: usize) -> (P, V) {
        let last = self.entries.len() - 1;
        self.swap_slots(slot, last);

        let removed = self
            .entries
            .pop()
            .unwrap_or_else(|| unreachable!("remove_at on an empty heap"));
        self.slots.remove(&removed.value);

        if slot < self.entries.len() {
            self.restore(slot);
        }
        (removed.priority, removed.value)
    }

    fn restore(&mut self, slot: usize) {
        let slot = self.sift_up(slot);
        self.sift_down(slot);
    }

    fn sift_up(&mut self, mut slot: usize) -> usize {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.entries[slot].priority < self.entries[parent].priority {
                self.swap_slots(slot, parent);
                slot = parent;
            } else {
                break;
            }
        }
        slot
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;

            if left < len && self.entries[left].priority < self.entries[smallest].priority {
                smallest = left;
            }
            if right < len && self.entries[right].priority < self.entries[smallest].priority {
                smallest = right;
            }
            if smallest == slot {
                break;
            }

            self.swap_slots(slot, smallest);
            slot = smallest;
        }
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.entries.swap(a, b);
        if let Some(slot) = self.slots.get_mut(&self.entries[a].value) {
            *slot = a;
        }
        if let Some(slot) = self.slots.get_mut(&self.entries[b].value) {
            *slot = b;
        }
    }
}

impl<V, P> Default for IndexedPriorityQueue<V, P>
where
    V: Clone + Eq + Hash + Debug,
    P: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_invariant() {
        let mut queue = IndexedPriorityQueue::new();
        for (priority, value) in [(5, 'a'), (3, 'b'), (8, 'c'), (1, 'd'), (3, 'e')] {
            queue.add(priority, value).unwrap();
            assert!(queue.is_consistent());
        }
        assert_eq!(queue.len(), 5);
        assert_eq!(queue.peek_min().unwrap(), (&1, &'d'));
    }

    #[test]
    fn test_remove_min_ascending() {
        let mut queue = IndexedPriorityQueue::new();
        for (i, priority) in [9, 4, 7, 1, 8, 2, 6].into_iter().enumerate() {
            queue.add(priority, i).unwrap();
        }

        let mut drained = Vec::new();
        while let Ok((priority, _)) = queue.remove_min() {
            assert!(queue.is_consistent());
            drained.push(priority);
        }
        assert_eq!(drained, vec![1, 2, 4, 6, 7, 8, 9]);
    }

    #[test]
    fn test_empty_queue_errors() {
        let mut queue: IndexedPriorityQueue<u32, u32> = IndexedPriorityQueue::new();
        assert_eq!(queue.peek_min().unwrap_err(), Error::EmptyQueue);
        assert_eq!(queue.remove_min().unwrap_err(), Error::EmptyQueue);
    }

    #[test]
    fn test_duplicate_value_rejected() {
        let mut queue = IndexedPriorityQueue::new();
        queue.add(1, "x").unwrap();
        assert!(matches!(queue.add(2, "x"), Err(Error::DuplicateElement(_))));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_index_of_tracks_slots() {
        let mut queue = IndexedPriorityQueue::new();
        for v in 0..10u32 {
            queue.add(10 - v, v).unwrap();
            assert!(queue.index_of(&v).is_some());
        }
        // Smallest priority sits at the root
        assert_eq!(queue.index_of(&9), Some(0));
        assert_eq!(queue.index_of(&42), None);

        queue.remove_min().unwrap();
        assert_eq!(queue.index_of(&9), None);
        assert!(queue.is_consistent());
    }

    #[test]
    fn test_update_decrease_and_increase() {
        let mut queue = IndexedPriorityQueue::new();
        queue.add(10.0, 'a').unwrap();
        queue.add(20.0, 'b').unwrap();
        queue.add(30.0, 'c').unwrap();

        queue.update(&'c', 5.0).unwrap();
        assert_eq!(queue.peek_min().unwrap(), (&5.0, &'c'));
        assert!(queue.is_consistent());

        queue.update(&'c', 25.0).unwrap();
        assert_eq!(queue.peek_min().unwrap(), (&10.0, &'a'));
        assert_eq!(queue.priority_of(&'c'), Some(&25.0));
        assert!(queue.is_consistent());

        assert!(matches!(queue.update(&'z', 1.0), Err(Error::MissingElement(_))));
    }

    #[test]
    fn test_remove_arbitrary_value() {
        let mut queue = IndexedPriorityQueue::new();
        for v in 0..8u32 {
            queue.add(v * 3 % 7, v).unwrap();
        }
        assert_eq!(queue.remove(&4), Some((5, 4)));
        assert!(!queue.contains(&4));
        assert_eq!(queue.remove(&4), None);
        assert!(queue.is_consistent());
        assert_eq!(queue.len(), 7);
    }

    #[test]
    fn test_capacity_growth() {
        let mut queue = IndexedPriorityQueue::with_capacity(0);
        assert_eq!(queue.capacity(), 0);
        queue.add(1, 1).unwrap();
        assert!(queue.capacity() >= 1);

        let mut queue = IndexedPriorityQueue::with_capacity(1);
        queue.add(1, 1).unwrap();
        queue.add(2, 2).unwrap();
        assert!(queue.capacity() >= 3);
    }

    #[test]
    fn test_clear_keeps_capacity_and_trim_releases() {
        let mut queue = IndexedPriorityQueue::new();
        for v in 0..20 {
            queue.add(v, v).unwrap();
        }
        let capacity = queue.capacity();
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.capacity(), capacity);

        queue.add(1, 1).unwrap();
        queue.trim_excess();
        assert!(queue.capacity() < capacity);
        assert_eq!(queue.peek_min().unwrap(), (&1, &1));
    }

    #[test]
    fn test_into_sorted_vec() {
        let mut queue = IndexedPriorityQueue::new();
        for (priority, value) in [(3, "c"), (1, "a"), (2, "b")] {
            queue.add(priority, value).unwrap();
        }
        assert_eq!(queue.iter().count(), 3);
        assert_eq!(queue.into_sorted_vec(), vec![(1, "a"), (2, "b"), (3, "c")]);
    }

    #[test]
    fn test_nan_priority_does_not_break_structure() {
        let mut queue = IndexedPriorityQueue::new();
        queue.add(f64::NAN, 0).unwrap();
        queue.add(1.0, 1).unwrap();
        queue.add(0.5, 2).unwrap();
        assert_eq!(queue.len(), 3);
        let drained: Vec<_> = queue.into_sorted_vec().into_iter().map(|(_, v)| v).collect();
        assert_eq!(drained.len(), 3);
    }
}
