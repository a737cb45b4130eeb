//! An unbounded FIFO of octants.
use std::collections::VecDeque;

use crate::types::octant::Octant;

/// Work queue used while rippling the 2:1 balance to its fixed point.
#[derive(Clone, Debug, Default)]
pub struct OctantQueue {
    /// The queued octants in arrival order.
    pub queue: VecDeque<Octant>,
}
