//! An indexed binary heap.
//!
//! Items live in an arena of slots and the heap orders slot numbers,
//! so a [Handle] keeps pointing at the same item while the heap
//! moves it around. This is what makes decrease-key (and increase-key)
//! possible without searching the heap.

use std::mem;

/// Stable reference to an item in a [PriorityQueue].
///
/// A handle is valid until its item is popped. After that the slot
/// may be reused by a later push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

/// A strict ordering between two items.
pub trait Compare<T> {
    /// True when `a` must come out of the queue before `b`.
    fn precedes(&self, a: &T, b: &T) -> bool;
}

#[derive(Debug)]
struct Entry<T> {
    item: T,
    position: usize,
}

/// Priority queue where the first item out is the one which
/// precedes every other item under `O`.
#[derive(Debug)]
pub struct PriorityQueue<T, O> {
    slots: Vec<Option<Entry<T>>>,
    heap: Vec<usize>,
    free: Vec<usize>,
    order: O,
}

impl<T, O> PriorityQueue<T, O>
where
    O: Compare<T>,
{
    pub fn new(order: O) -> Self {
        Self {
            slots: Vec::new(),
            heap: Vec::new(),
            free: Vec::new(),
            order,
        }
    }

    pub fn order(&self) -> &O {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Remove every item. Outstanding handles become invalid.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.heap.clear();
        self.free.clear();
    }

    pub fn push(&mut self, item: T) -> Handle {
        let position = self.heap.len();
        let entry = Entry { item, position };

        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(entry);
                slot
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        };

        self.heap.push(slot);
        self.sift_up(position);
        Handle(slot)
    }

    pub fn peek(&self) -> Option<&T> {
        self.heap.first().map(|&slot| self.item(slot))
    }

    pub fn peek_handle(&self) -> Option<Handle> {
        self.heap.first().map(|&slot| Handle(slot))
    }

    /// The first item along with its handle.
    pub fn peek_entry(&self) -> Option<(Handle, &T)> {
        self.heap
            .first()
            .map(|&slot| (Handle(slot), self.item(slot)))
    }

    /// The item which would come out after the first one.
    pub fn peek_second(&self) -> Option<&T> {
        match self.heap.len() {
            0 | 1 => None,
            2 => Some(self.item(self.heap[1])),
            _ => {
                let best = if self.precedes_at(2, 1) { 2 } else { 1 };
                Some(self.item(self.heap[best]))
            }
        }
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            return None;
        }

        let last = self.heap.len() - 1;
        self.swap(0, last);
        let slot = self.heap.pop()?;
        let entry = self.slots[slot].take()?;
        self.free.push(slot);

        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(entry.item)
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.slots
            .get(handle.0)
            .and_then(|s| s.as_ref())
            .map(|e| &e.item)
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Swap in a new item for the one at `handle`, returning the old item.
    ///
    /// The new item may be better or worse than the old one, the heap
    /// is repaired in either direction.
    pub fn replace(&mut self, handle: Handle, item: T) -> Option<T> {
        let entry = self.slots.get_mut(handle.0)?.as_mut()?;
        let old = mem::replace(&mut entry.item, item);
        let position = entry.position;
        self.restore(position);
        Some(old)
    }

    /// Change the item at `handle` in place and repair the heap.
    ///
    /// Returns false when the handle no longer refers to an item.
    pub fn update<F>(&mut self, handle: Handle, f: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        let position = match self.slots.get_mut(handle.0).and_then(|s| s.as_mut()) {
            Some(entry) => {
                f(&mut entry.item);
                entry.position
            }
            None => return false,
        };
        self.restore(position);
        true
    }

    /// Items in heap order (not sorted).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.heap.iter().map(move |&slot| self.item(slot))
    }

    fn item(&self, slot: usize) -> &T {
        match &self.slots[slot] {
            Some(entry) => &entry.item,
            None => unreachable!("heap refers to empty slot {}", slot),
        }
    }

    fn precedes_at(&self, a: usize, b: usize) -> bool {
        self.order
            .precedes(self.item(self.heap[a]), self.item(self.heap[b]))
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        for &position in &[a, b] {
            if let Some(entry) = self.slots[self.heap[position]].as_mut() {
                entry.position = position;
            }
        }
    }

    fn restore(&mut self, position: usize) {
        if position > 0 && self.precedes_at(position, (position - 1) / 2) {
            self.sift_up(position);
        } else {
            self.sift_down(position);
        }
    }

    fn sift_up(&mut self, mut position: usize) {
        while position > 0 {
            let parent = (position - 1) / 2;
            if !self.precedes_at(position, parent) {
                break;
            }
            self.swap(position, parent);
            position = parent;
        }
    }

    fn sift_down(&mut self, mut position: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * position + 1;
            if left >= n {
                break;
            }

            let right = left + 1;
            let child = if right < n && self.precedes_at(right, left) {
                right
            } else {
                left
            };

            if !self.precedes_at(child, position) {
                break;
            }
            self.swap(child, position);
            position = child;
        }
    }
}
