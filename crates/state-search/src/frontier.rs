//! Min-priority frontier with deterministic tie-breaking.
//!
//! Every push is stamped with a strictly increasing sequence number, so
//! entries of equal priority pop in insertion order regardless of how the
//! underlying heap arranges them.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierKey {
    priority: u64,
    seq: u64,
}

/// `BinaryHeap` is a max-heap; the key is wrapped in `Reverse` to pop the
/// lowest priority first.
#[derive(Debug)]
struct FrontierEntry<S> {
    key: Reverse<FrontierKey>,
    cost: u64,
    state: S,
}

impl<S> PartialEq for FrontierEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<S> Eq for FrontierEntry<S> {}

impl<S> PartialOrd for FrontierEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for FrontierEntry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Priority queue of states keyed by `(priority, insertion order)`.
///
/// Each entry also carries the path cost it was pushed with, which lets A*
/// recognise entries made stale by a later relaxation.
#[derive(Debug)]
pub struct PriorityFrontier<S> {
    heap: BinaryHeap<FrontierEntry<S>>,
    next_seq: u64,
}

impl<S> Default for PriorityFrontier<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> PriorityFrontier<S> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn push(&mut self, priority: u64, cost: u64, state: S) {
        let key = FrontierKey {
            priority,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.heap.push(FrontierEntry {
            key: Reverse(key),
            cost,
            state,
        });
    }

    /// Pop the lowest-priority state together with the cost it was pushed with.
    pub fn pop(&mut self) -> Option<(S, u64)> {
        self.heap.pop().map(|entry| (entry.state, entry.cost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowest_priority_first() {
        let mut frontier = PriorityFrontier::new();
        frontier.push(5, 0, "five");
        frontier.push(1, 0, "one");
        frontier.push(3, 0, "three");

        assert_eq!(frontier.pop().map(|(s, _)| s), Some("one"));
        assert_eq!(frontier.pop().map(|(s, _)| s), Some("three"));
        assert_eq!(frontier.pop().map(|(s, _)| s), Some("five"));
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn test_ties_pop_in_insertion_order() {
        let mut frontier = PriorityFrontier::new();
        for name in ["a", "b", "c", "d", "e", "f"] {
            frontier.push(7, 0, name);
        }
        frontier.push(2, 0, "first");

        let order: Vec<&str> = std::iter::from_fn(|| frontier.pop().map(|(s, _)| s)).collect();
        assert_eq!(order, vec!["first", "a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn test_cost_travels_with_entry() {
        let mut frontier = PriorityFrontier::new();
        frontier.push(4, 3, 'x');
        assert_eq!(frontier.pop(), Some(('x', 3)));
        assert_eq!(frontier.pop(), None);
    }
}
