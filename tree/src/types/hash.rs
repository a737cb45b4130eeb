//! An insert-only set of octants.
use std::collections::HashSet;

use crate::types::octant::Octant;

/// Accumulator for bulk mutation, keyed by anchor and level; the scratch
/// fields of an octant do not participate. Refinement and balancing insert
/// here and reify a sorted array when they are done.
#[derive(Clone, Debug, Default)]
pub struct OctantHash {
    /// The octants added so far.
    pub set: HashSet<Octant>,
}
