use crate::errors::{Result, RouteError};

use std::{collections::BinaryHeap, cmp::Ordering};


/// Min-priority queue over `(element, priority)` pairs.
///
/// Backed by a binary heap. Equal priorities come out in insertion order:
/// every entry carries a sequence number that breaks ties.
#[derive(Debug)]
pub struct PriorityQueue<T, P> {
    heap: BinaryHeap<Entry<T, P>>,
    next_seq: u64,
}

impl<T, P: PartialOrd> PriorityQueue<T, P> {

    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Insert an element, duplicates of both elements and priorities are allowed
    pub fn enqueue(&mut self, element: T, priority: P) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { element, priority, seq });
    }

    /// Remove the element with the smallest priority
    /// Fails with `EmptyQueue` when there is nothing to remove
    pub fn dequeue(&mut self) -> Result<(T, P)> {
        self.heap
            .pop()
            .map(|Entry { element, priority, .. }| (element, priority))
            .ok_or(RouteError::EmptyQueue)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T, P: PartialOrd> Default for PriorityQueue<T, P> {
    fn default() -> Self {
        Self::new()
    }
}


/// Heap entry - BinaryHeap pops the biggest, so the ordering is reversed
/// on both priority and sequence number
#[derive(Debug)]
struct Entry<T, P> {
    element: T,
    priority: P,
    seq: u64,
}

impl<T, P: PartialOrd> Ord for Entry<T, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        // NaN priorities never reach the queue, graph weights are validated
        other.priority
            .partial_cmp(&self.priority)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}
impl<T, P: PartialOrd> PartialOrd for Entry<T, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T, P: PartialOrd> PartialEq for Entry<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl<T, P: PartialOrd> Eq for Entry<T, P> {}
