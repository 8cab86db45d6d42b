//! Stable-identity sparse collection backing every entity store.
//!
//! # Responsibility
//! - Hand out integer ids that stay valid for an entry's whole lifetime.
//! - Reuse freed slots in O(1) so ids stay dense under churn.
//!
//! # Invariants
//! - No two live entries ever share an id.
//! - The backing vector never ends in a freed slot: removing the highest
//!   live entry trims every trailing hole and drops free-pool entries that
//!   pointed past the new length.

use serde::{Deserialize, Serialize};

/// Sparse vector with an explicit free pool.
///
/// `add` returns the raw slot index; callers wrap it in their own id
/// newtype. Holes left by `remove` are invisible to `len` and iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseStore<T> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
}

// Manual impl: an empty store needs no `T: Default`, which the derive
// would require.
impl<T> Default for SparseStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SparseStore<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Inserts a value, reusing a freed slot when one exists.
    pub fn add(&mut self, value: T) -> usize {
        match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(value);
                id
            }
            None => {
                self.slots.push(Some(value));
                self.slots.len() - 1
            }
        }
    }

    pub fn get(&self, id: usize) -> Option<&T> {
        self.slots.get(id).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut T> {
        self.slots.get_mut(id).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: usize) -> bool {
        self.get(id).is_some()
    }

    /// Empties a slot and returns its value, or `None` for a dead id.
    ///
    /// Freeing the highest live slot shrinks the backing vector past every
    /// trailing hole instead of growing the free pool.
    pub fn remove(&mut self, id: usize) -> Option<T> {
        let value = self.slots.get_mut(id)?.take()?;
        if id + 1 == self.slots.len() {
            self.slots.pop();
            while matches!(self.slots.last(), Some(None)) {
                self.slots.pop();
            }
            let len = self.slots.len();
            self.free.retain(|&freed| freed < len);
        } else {
            self.free.push(id);
        }
        Some(value)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live entries with their ids, in underlying slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_ref().map(|value| (id, value)))
    }

    /// Live values in underlying slot order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::SparseStore;

    #[test]
    fn default_is_empty_for_any_value_type() {
        // The value type deliberately has no `Default` of its own.
        struct Opaque;
        let store: SparseStore<Opaque> = SparseStore::default();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn add_reuses_freed_slots() {
        let mut store = SparseStore::new();
        let a = store.add("a");
        let b = store.add("b");
        store.add("c");
        store.remove(b).unwrap();
        assert_eq!(store.add("d"), b);
        assert_eq!(store.get(a), Some(&"a"));
        assert_eq!(store.get(b), Some(&"d"));
    }

    #[test]
    fn removing_tail_trims_trailing_holes() {
        // Mirrors the interleaved delete sequence the container was built for:
        // freeing the last live slot must also drain holes right below it.
        let mut store = SparseStore::new();
        let ids: Vec<usize> = (1..=6).map(|n| store.add(n)).collect();
        store.remove(ids[1]).unwrap();
        store.remove(ids[4]).unwrap();
        store.remove(ids[5]).unwrap();
        assert_eq!(store.len(), 3);
        // Slot 4 and 5 are gone entirely; slot 1 is a reusable hole.
        assert_eq!(store.add(9), ids[1]);
        assert_eq!(store.add(10), 4);
    }

    #[test]
    fn len_and_iteration_skip_holes() {
        let mut store = SparseStore::new();
        let a = store.add(10);
        let b = store.add(20);
        let c = store.add(30);
        store.remove(b).unwrap();
        assert_eq!(store.len(), 2);
        let live: Vec<(usize, &i32)> = store.iter().collect();
        assert_eq!(live, vec![(a, &10), (c, &30)]);
        assert!(store.remove(b).is_none());
    }
}
