//! Methods for the octant queue.
use std::collections::VecDeque;

use crate::types::array::{OctantArray, OctantOrder};
use crate::types::octant::Octant;
use crate::types::queue::OctantQueue;

impl OctantQueue {
    /// Create an empty queue.
    pub fn new() -> OctantQueue {
        OctantQueue {
            queue: VecDeque::new(),
        }
    }

    /// Enqueue an octant.
    pub fn push(&mut self, oct: Octant) {
        self.queue.push_back(oct);
    }

    /// Dequeue the oldest octant, if any.
    pub fn pop(&mut self) -> Option<Octant> {
        self.queue.pop_front()
    }

    /// Number of queued octants.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drain into an element array in FIFO order; the caller sorts if needed.
    pub fn to_array(&mut self) -> OctantArray {
        OctantArray::from_vec(self.queue.drain(..).collect(), OctantOrder::Elements)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_fifo_drain() {
        let parent = Octant::new([0, 0, 0], 1);
        let mut queue = OctantQueue::new();
        for sibling in parent.siblings().into_iter().rev() {
            queue.push(sibling);
        }
        assert_eq!(queue.len(), 8);
        assert_eq!(queue.pop(), Some(parent.sibling(7)));

        let array = queue.to_array();
        assert!(queue.is_empty());
        assert_eq!(array.len(), 7);
        assert_eq!(array[0], parent.sibling(6));
    }
}
