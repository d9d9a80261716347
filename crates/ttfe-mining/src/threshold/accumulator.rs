//! Bounded "keep the K largest" min-heap shared by the raising strategies.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// `f64` with a total order (`f64::total_cmp`).
#[derive(Debug, Clone, Copy)]
pub struct OrderedValue(pub f64);

impl PartialEq for OrderedValue {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for OrderedValue {}

impl PartialOrd for OrderedValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Keeps the K largest values pushed so far.
///
/// Callers push lower bounds of pairwise distinct patterns, so once K values
/// are held the smallest one lower-bounds the K-th best pattern.
#[derive(Debug, Clone)]
pub struct TopKAccumulator {
    capacity: usize,
    heap: BinaryHeap<Reverse<OrderedValue>>,
}

impl TopKAccumulator {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity.saturating_add(1)),
        }
    }

    /// Offer a value. Returns true if it was kept.
    pub fn push(&mut self, value: f64) -> bool {
        if self.capacity == 0 || value.is_nan() {
            return false;
        }
        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(OrderedValue(value)));
            return true;
        }
        match self.heap.peek() {
            Some(Reverse(min)) if value > min.0 => {
                self.heap.pop();
                self.heap.push(Reverse(OrderedValue(value)));
                true
            }
            _ => false,
        }
    }

    /// Smallest held value, only once the accumulator is full.
    pub fn floor(&self) -> Option<f64> {
        if self.is_full() {
            self.heap.peek().map(|Reverse(v)| v.0)
        } else {
            None
        }
    }

    /// Smallest held value regardless of fill level.
    pub fn min(&self) -> Option<f64> {
        self.heap.peek().map(|Reverse(v)| v.0)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.heap.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Held values, largest first.
    pub fn into_sorted_desc(self) -> Vec<f64> {
        let mut values: Vec<f64> = self.heap.into_iter().map(|Reverse(v)| v.0).collect();
        values.sort_by(|a, b| b.total_cmp(a));
        values
    }
}
