//! Bounded min-oriented top-K result queue.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::pattern::Pattern;

/// Heap entry ordered by value, then by items for a stable total order.
#[derive(Debug, Clone)]
struct Ranked(Pattern);

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .value
            .total_cmp(&other.0.value)
            .then_with(|| other.0.items.cmp(&self.0.items))
    }
}

/// Keeps the K best patterns. Callers guarantee distinct item lists.
#[derive(Debug, Clone)]
pub struct ResultQueue {
    capacity: usize,
    heap: BinaryHeap<Reverse<Ranked>>,
}

impl ResultQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity.saturating_add(1)),
        }
    }

    /// Insert, evicting the minimum when over capacity.
    /// Returns false if the pattern was not retained.
    pub fn offer(&mut self, pattern: Pattern) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.is_full() {
            match self.heap.peek() {
                Some(Reverse(min)) if pattern.value < min.0.value => return false,
                _ => {}
            }
        }
        self.heap.push(Reverse(Ranked(pattern)));
        if self.heap.len() > self.capacity {
            self.heap.pop();
        }
        true
    }

    /// Minimum value once K entries are held; no information before that.
    pub fn threshold(&self) -> Option<f64> {
        if self.is_full() {
            self.heap.peek().map(|Reverse(r)| r.0.value)
        } else {
            None
        }
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

    /// Final answer: contents sorted by value, largest first.
    pub fn into_sorted(self) -> Vec<Pattern> {
        let mut ranked: Vec<Ranked> = self.heap.into_iter().map(|Reverse(r)| r).collect();
        ranked.sort_by(|a, b| b.cmp(a));
        ranked.into_iter().map(|r| r.0).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttfe_core::ItemId;

    fn p(id: u32, value: f64) -> Pattern {
        Pattern::new([ItemId(id)], value)
    }

    #[test]
    fn test_bounded_and_sorted() {
        let mut queue = ResultQueue::new(2);
        assert!(queue.offer(p(1, 2.5)));
        assert_eq!(queue.threshold(), None);
        assert!(queue.offer(p(2, 4.0)));
        assert_eq!(queue.threshold(), Some(2.5));
        assert!(queue.offer(p(3, 4.0)));
        assert_eq!(queue.threshold(), Some(4.0));
        assert!(!queue.offer(p(4, 1.0)));
        assert_eq!(queue.len(), 2);
        let values: Vec<f64> = queue.into_sorted().iter().map(|p| p.value).collect();
        assert_eq!(values, vec![4.0, 4.0]);
    }

    #[test]
    fn test_zero_values_are_results() {
        let mut queue = ResultQueue::new(3);
        queue.offer(p(1, 0.0));
        queue.offer(p(2, 0.0));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.threshold(), None);
    }
}
