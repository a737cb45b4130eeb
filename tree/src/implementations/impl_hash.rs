//! Methods for the octant hash set.
use std::collections::HashSet;

use itertools::Itertools;

use crate::types::array::{OctantArray, OctantOrder};
use crate::types::hash::OctantHash;
use crate::types::octant::Octant;

impl OctantHash {
    /// Create an empty set.
    pub fn new() -> OctantHash {
        OctantHash {
            set: HashSet::new(),
        }
    }

    /// Add an octant. Returns false if an octant with the same anchor and
    /// level was already present.
    pub fn add(&mut self, oct: Octant) -> bool {
        self.set.insert(oct)
    }

    /// True if an octant with the same anchor and level is present.
    pub fn contains(&self, oct: &Octant) -> bool {
        self.set.contains(oct)
    }

    /// Number of distinct octants added.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// True if nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Emit the contents as a sorted element array. The set is unchanged.
    pub fn to_array(&self) -> OctantArray {
        let mut array =
            OctantArray::from_vec(self.set.iter().copied().collect_vec(), OctantOrder::Elements);
        array.sort();
        array
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_duplicates_collapse() {
        let mut hash = OctantHash::new();
        let oct = Octant::new([0, 0, 0], 3);

        assert!(hash.add(oct));
        // Scratch fields do not participate in the key.
        let mut tagged = oct;
        tagged.tag = 42;
        assert!(!hash.add(tagged));
        assert_eq!(hash.len(), 1);
    }

    #[test]
    fn test_to_array_is_sorted() {
        let mut hash = OctantHash::new();
        let parent = Octant::new([0, 0, 0], 2);
        for sibling in parent.siblings() {
            hash.add(sibling);
        }
        hash.add(parent.parent());

        let array = hash.to_array();
        assert_eq!(array.len(), 9);
        for pair in array.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}
