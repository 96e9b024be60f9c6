//! A binary min-heap of node ids keyed by `f64` priorities.
//!
//! Dijkstra, A* and Prim all use it in lazy-deletion style: instead of
//! lowering the key of an entry already in the heap they push a fresh entry,
//! and discard stale entries as they surface via [`PriorityQueue::pop_fresh`].

use crate::NodeId;

/// An entry of a [`PriorityQueue`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriorityQueueItem {
    pub node: NodeId,
    pub priority: f64,
    /// Position of the item in the backing array, or `None` once popped.
    pub index: Option<usize>,
}

/// A binary min-heap.  Items with equal priority come out in an unspecified
/// but deterministic order.
#[derive(Clone, Debug, Default)]
pub struct PriorityQueue {
    heap: Vec<PriorityQueueItem>,
}

impl PriorityQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Gets the item with the smallest priority without removing it.
    pub fn peek(&self) -> Option<&PriorityQueueItem> {
        self.heap.first()
    }

    /// Gets the item currently stored at `index`.
    pub fn item(&self, index: usize) -> Option<&PriorityQueueItem> {
        self.heap.get(index)
    }

    /// Pushes a new entry, returning the index it settled at.  Entries for a
    /// node already in the queue are not merged.
    pub fn push(&mut self, node: NodeId, priority: f64) -> usize {
        let index = self.heap.len();
        self.heap.push(PriorityQueueItem {
            node,
            priority,
            index: Some(index),
        });
        self.sift_up(index)
    }

    /// Removes and returns the item with the smallest priority.
    pub fn pop(&mut self) -> Option<PriorityQueueItem> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let mut item = self.heap.pop()?;
        item.index = None;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(item)
    }

    /// Pops items until one is found for which `is_stale` returns false, and
    /// returns it.  Stale items are dropped.
    pub fn pop_fresh(
        &mut self,
        mut is_stale: impl FnMut(&PriorityQueueItem) -> bool,
    ) -> Option<PriorityQueueItem> {
        while let Some(item) = self.pop() {
            if !is_stale(&item) {
                return Some(item);
            }
        }
        None
    }

    fn less(&self, i: usize, j: usize) -> bool {
        self.heap[i].priority < self.heap[j].priority
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.heap[i].index = Some(i);
        self.heap[j].index = Some(j);
    }

    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.less(index, parent) {
                break;
            }
            self.swap(index, parent);
            index = parent;
        }
        index
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut smallest = left;
            if right < len && self.less(right, left) {
                smallest = right;
            }
            if !self.less(smallest, index) {
                break;
            }
            self.swap(index, smallest);
            index = smallest;
        }
    }

    /// Checks the heap property and the stored indices.
    #[cfg(test)]
    fn check_consistency(&self) -> Result<(), &'static str> {
        for (i, item) in self.heap.iter().enumerate() {
            if item.index != Some(i) {
                return Err("item index does not match its position");
            }
            if i > 0 && self.less(i, (i - 1) / 2) {
                return Err("heap property violated");
            }
        }
        Ok(())
    }
}
