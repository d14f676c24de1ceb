//! Open set of the best-first search.

use super::state::PartialTourState;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct Entry {
    f: f64,
    seq: u64,
    state: PartialTourState,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    // Reversed: `BinaryHeap` is a max-heap, the frontier pops the smallest f.
    // Equal f falls back to insertion order.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue of partial tours keyed by `f = g + h`, smallest first.
///
/// Each state is exclusively owned by its entry and handed back by
/// [`pop_min`](Frontier::pop_min).
#[derive(Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, state: PartialTourState) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            f: state.f(),
            seq,
            state,
        });
    }

    /// Removes and returns the state with the smallest `f`.
    pub fn pop_min(&mut self) -> Option<PartialTourState> {
        self.heap.pop().map(|e| e.state)
    }

    /// Smallest `f` currently queued.
    pub fn peek_min_f(&self) -> Option<f64> {
        self.heap.peek().map(|e| e.f)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Drops every queued state and returns how many there were.
    pub fn clear(&mut self) -> usize {
        let dropped = self.heap.len();
        self.heap.clear();
        dropped
    }

    /// Queued states in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &PartialTourState> {
        self.heap.iter().map(|e| &e.state)
    }
}

impl std::fmt::Debug for Frontier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frontier")
            .field("len", &self.heap.len())
            .field("min_f", &self.peek_min_f())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(last: usize, g: f64, h: f64) -> PartialTourState {
        let root = PartialTourState::root(0, 8, 0.0);
        root.successor(last, root.visited().with(last), g, h)
    }

    #[test]
    fn test_pops_in_f_order() {
        let mut frontier = Frontier::new();
        frontier.push(state(1, 5.0, 5.0));
        frontier.push(state(2, 1.0, 2.0));
        frontier.push(state(3, 7.0, 0.0));
        frontier.push(state(4, 0.0, 20.0));

        let order: Vec<f64> = std::iter::from_fn(|| frontier.pop_min().map(|s| s.f())).collect();
        assert_eq!(order, vec![3.0, 7.0, 10.0, 20.0]);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_ties_fifo() {
        let mut frontier = Frontier::new();
        frontier.push(state(5, 2.0, 1.0));
        frontier.push(state(6, 1.0, 2.0));
        frontier.push(state(7, 3.0, 0.0));

        let order: Vec<usize> =
            std::iter::from_fn(|| frontier.pop_min().map(|s| s.last_city())).collect();
        assert_eq!(order, vec![5, 6, 7]);
    }

    #[test]
    fn test_interleaved_push_pop() {
        let mut frontier = Frontier::new();
        frontier.push(state(1, 4.0, 0.0));
        frontier.push(state(2, 2.0, 0.0));
        assert_eq!(frontier.pop_min().map(|s| s.f()), Some(2.0));
        frontier.push(state(3, 1.0, 0.0));
        assert_eq!(frontier.peek_min_f(), Some(1.0));
        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.pop_min().map(|s| s.f()), Some(1.0));
        assert_eq!(frontier.pop_min().map(|s| s.f()), Some(4.0));
        assert!(frontier.pop_min().is_none());
    }

    #[test]
    fn test_clear_and_iter() {
        let mut frontier = Frontier::new();
        for c in 1..5 {
            frontier.push(state(c, c as f64, 0.0));
        }
        let mut lasts: Vec<usize> = frontier.iter().map(|s| s.last_city()).collect();
        lasts.sort_unstable();
        assert_eq!(lasts, vec![1, 2, 3, 4]);
        assert_eq!(frontier.clear(), 4);
        assert!(frontier.is_empty());
        assert_eq!(frontier.peek_min_f(), None);
    }
}
