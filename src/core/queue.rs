use keyed_priority_queue::KeyedPriorityQueue;
use std::{cmp::Ordering, collections::VecDeque};

use super::state::ProcIdx;

/// Ordering key for a ranked ready queue; the smallest key runs first.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub struct Rank<K>(pub K);

// KeyedPriorityQueue is a max-heap, so we need to flip-flop Rank's Ord
impl<K: Ord> PartialOrd for Rank<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for Rank<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.cmp(&self.0)
    }
}

#[derive(Debug, Default)]
pub struct FifoQueue {
    procs: VecDeque<ProcIdx>,
}

impl FifoQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, proc: ProcIdx) {
        debug_assert!(!self.contains(proc), "Process {proc} queued twice");
        self.procs.push_back(proc);
    }

    pub fn pop_front(&mut self) -> Option<ProcIdx> {
        self.procs.pop_front()
    }

    pub fn contains(&self, proc: ProcIdx) -> bool {
        self.procs.contains(&proc)
    }

    pub fn len(&self) -> usize {
        self.procs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ProcIdx> + '_ {
        self.procs.iter().copied()
    }
}

/// Ready set ordered by an arbitrary key. Keys should end with the
/// process index so that no two entries compare equal.
#[derive(Debug)]
pub struct RankedQueue<K: Ord> {
    procs: KeyedPriorityQueue<ProcIdx, Rank<K>>,
}

impl<K: Ord> RankedQueue<K> {
    pub fn new() -> Self {
        Self {
            procs: KeyedPriorityQueue::new(),
        }
    }

    pub fn push(&mut self, proc: ProcIdx, key: K) {
        let prev = self.procs.push(proc, Rank(key));
        debug_assert!(prev.is_none(), "Process {proc} queued twice");
    }

    pub fn pop(&mut self) -> Option<ProcIdx> {
        self.procs.pop().map(|entry| entry.0)
    }

    pub fn contains(&self, proc: ProcIdx) -> bool {
        self.procs.iter().any(|entry| *entry.0 == proc)
    }

    pub fn len(&self) -> usize {
        self.procs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procs.is_empty()
    }
}

impl<K: Ord> Default for RankedQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranked_queue_pops_smallest_key_first() {
        let mut queue = RankedQueue::new();
        queue.push(0, (5, 0));
        queue.push(1, (2, 1));
        queue.push(2, (2, 2));
        queue.push(3, (9, 3));

        assert_eq!(queue.len(), 4);
        assert!(queue.contains(3));
        let order: Vec<_> = std::iter::from_fn(|| queue.pop()).collect();
        assert_eq!(order, vec![1, 2, 0, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn fifo_queue_keeps_insertion_order() {
        let mut queue = FifoQueue::new();
        queue.push_back(4);
        queue.push_back(1);
        queue.push_back(3);

        assert_eq!(queue.iter().collect::<Vec<_>>(), vec![4, 1, 3]);
        assert_eq!(queue.pop_front(), Some(4));
        assert_eq!(queue.len(), 2);
        assert!(!queue.contains(4));
    }
}
