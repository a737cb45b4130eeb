//! Methods for the sorted octant array.
use std::cmp::Ordering;
use std::ops::{Deref, DerefMut};

use crate::types::array::{OctantArray, OctantOrder};
use crate::types::octant::Octant;

impl OctantArray {
    /// Create an empty array with the given comparison discipline.
    pub fn new(ordering: OctantOrder) -> OctantArray {
        OctantArray {
            octs: Vec::new(),
            ordering,
        }
    }

    /// Adopt a vector of octants. Call [`sort`](OctantArray::sort) before
    /// searching.
    pub fn from_vec(octs: Vec<Octant>, ordering: OctantOrder) -> OctantArray {
        OctantArray { octs, ordering }
    }

    /// Stable-sort by the array's comparison order and collapse runs that
    /// compare equal, keeping the first representative. Idempotent.
    pub fn sort(&mut self) {
        match self.ordering {
            OctantOrder::Elements => {
                self.octs.sort_by(Octant::element_cmp);
                self.octs
                    .dedup_by(|a, b| a.element_cmp(b) == Ordering::Equal);
            }
            OctantOrder::Nodes => {
                self.octs.sort_by(Octant::node_cmp);
                self.octs.dedup_by(|a, b| a.node_cmp(b) == Ordering::Equal);
            }
        }
    }

    /// Union with another array; the result is sorted and duplicate-free.
    pub fn merge(&mut self, other: &OctantArray) {
        self.octs.extend_from_slice(&other.octs);
        self.sort();
    }

    /// Binary search under the array's comparison mode. In element mode the
    /// hit is the octant whose cube contains the query entirely; in node mode
    /// it is the octant at exactly the query's grid position.
    pub fn contains(&self, oct: &Octant) -> Option<&Octant> {
        match self.ordering {
            OctantOrder::Elements => self.find_enclosing(oct),
            OctantOrder::Nodes => self
                .octs
                .binary_search_by(|probe| probe.node_cmp(oct))
                .ok()
                .map(|index| &self.octs[index]),
        }
    }

    /// Mutable variant of [`contains`](OctantArray::contains).
    pub fn contains_mut(&mut self, oct: &Octant) -> Option<&mut Octant> {
        let index = match self.ordering {
            OctantOrder::Elements => self.find_enclosing_index(oct),
            OctantOrder::Nodes => self
                .octs
                .binary_search_by(|probe| probe.node_cmp(oct))
                .ok(),
        };
        index.map(move |i| &mut self.octs[i])
    }

    /// The octant whose cube entirely contains `oct`, if one exists.
    pub fn find_enclosing(&self, oct: &Octant) -> Option<&Octant> {
        self.find_enclosing_index(oct).map(|index| &self.octs[index])
    }

    /// Index of the octant whose cube entirely contains `oct`. Maintains a
    /// bracket `[low, high]` around the query in Morton order and tests the
    /// midpoint for containment; when the bracket collapses both ends are
    /// tested. Requires element ordering and a sorted array. Because the
    /// leaves of a tree tile the block, an in-bounds query always hits; a
    /// query outside the block returns `None`.
    pub fn find_enclosing_index(&self, oct: &Octant) -> Option<usize> {
        debug_assert_eq!(self.ordering, OctantOrder::Elements);
        if self.octs.is_empty() {
            return None;
        }

        let mut low: i64 = 0;
        let mut high: i64 = self.octs.len() as i64 - 1;
        let mut mid: i64 = low + (high - low) / 2;

        while mid != high {
            let probe = &self.octs[mid as usize];
            if probe.encloses(oct) {
                return Some(mid as usize);
            }
            if oct.element_cmp(probe) == Ordering::Less {
                high = mid - 1;
            } else {
                low = mid + 1;
            }
            mid = high - (high - low) / 2;
        }

        if high >= 0 && self.octs[high as usize].encloses(oct) {
            return Some(high as usize);
        }
        let low = low as usize;
        if low < self.octs.len() && self.octs[low].encloses(oct) {
            return Some(low);
        }
        None
    }
}

impl Deref for OctantArray {
    type Target = Vec<Octant>;

    fn deref(&self) -> &Self::Target {
        &self.octs
    }
}

impl DerefMut for OctantArray {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.octs
    }
}

impl FromIterator<Octant> for OctantArray {
    fn from_iter<I: IntoIterator<Item = Octant>>(iter: I) -> Self {
        OctantArray::from_vec(iter.into_iter().collect(), OctantOrder::Elements)
    }
}

impl IntoIterator for OctantArray {
    type Item = Octant;
    type IntoIter = std::vec::IntoIter<Octant>;

    fn into_iter(self) -> Self::IntoIter {
        self.octs.into_iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::HMAX;

    #[test]
    fn test_sort_collapses_duplicates() {
        let root = Octant::new([0, 0, 0], 1);
        let mut octs = root.siblings();
        octs.extend(root.siblings());
        octs.push(root.parent());

        let mut array = OctantArray::from_vec(octs, OctantOrder::Elements);
        array.sort();
        assert_eq!(array.len(), 9);

        for pair in array.windows(2) {
            assert_eq!(pair[0].element_cmp(&pair[1]), Ordering::Less);
        }

        // Idempotent.
        let before = array.octs.clone();
        array.sort();
        assert_eq!(before, array.octs);
    }

    #[test]
    fn test_node_mode_contains() {
        let mut node = Octant::new([0, 0, 0], 0);
        node.tag = 17;
        let other = Octant::new([HMAX / 2, 0, 0], 0);

        let mut array = OctantArray::from_vec(vec![other, node], OctantOrder::Nodes);
        array.sort();

        // Level is metadata in node mode.
        let query = Octant::new([0, 0, 0], 5);
        assert_eq!(array.contains(&query).unwrap().tag, 17);

        let absent = Octant::new([1, 2, 3], 0);
        assert!(array.contains(&absent).is_none());
    }

    #[test]
    fn test_find_enclosing() {
        let root = Octant::new([0, 0, 0], 0);
        let mut array = OctantArray::from_vec(root.children(), OctantOrder::Elements);
        array.sort();

        let h = 1 << (crate::constants::MAX_LEVEL - 5);
        for child in root.children() {
            let probe = Octant::new(
                [
                    child.anchor[0] + 3 * h,
                    child.anchor[1] + h,
                    child.anchor[2],
                ],
                5,
            );
            assert_eq!(array.find_enclosing(&probe), Some(&child));
        }
    }

    #[test]
    fn test_merge() {
        let root = Octant::new([0, 0, 0], 1);
        let siblings = root.siblings();

        let mut a = OctantArray::from_vec(siblings[0..4].to_vec(), OctantOrder::Elements);
        a.sort();
        let mut b = OctantArray::from_vec(siblings[2..8].to_vec(), OctantOrder::Elements);
        b.sort();

        a.merge(&b);
        assert_eq!(a.octs, siblings);
    }
}
