//! Pure operations on octants.
use itertools::izip;
use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

use crate::constants::{DIRECTIONS, HMAX, MAX_LEVEL};
use crate::types::octant::{CoordType, Octant};

use octmesh_traits::tree::OctantInterface;

/// Subroutine of the Morton comparison, equivalent to comparing the floor of
/// log_2 of the two operands. Adapted from \[3\].
fn most_significant_bit(x: u32, y: u32) -> bool {
    (x < y) & (x < (x ^ y))
}

impl Octant {
    /// Create an octant at the given anchor and level with cleared scratch
    /// fields.
    pub fn new(anchor: [CoordType; 3], level: CoordType) -> Octant {
        Octant {
            anchor,
            level,
            tag: 0,
            info: 0,
        }
    }

    /// Side length of the octant's cube.
    pub fn side(&self) -> CoordType {
        1 << (MAX_LEVEL - self.level)
    }

    /// Morton comparison: interleaved anchor bits from the most significant
    /// downward, with the z bit the most significant of each triple, and ties
    /// broken by ascending level. An octant therefore immediately precedes
    /// its own descendants, and disjoint octants sort by spatial position.
    pub fn element_cmp(&self, other: &Octant) -> Ordering {
        let xor = [
            (self.anchor[0] ^ other.anchor[0]) as u32,
            (self.anchor[1] ^ other.anchor[1]) as u32,
            (self.anchor[2] ^ other.anchor[2]) as u32,
        ];

        // Axis holding the most significant differing bit; z wins ties over
        // y, and y over x, matching the child-id bit layout.
        let mut argmax = 2;
        if most_significant_bit(xor[argmax], xor[1]) {
            argmax = 1;
        }
        if most_significant_bit(xor[argmax], xor[0]) {
            argmax = 0;
        }

        if xor[argmax] == 0 {
            self.level.cmp(&other.level)
        } else {
            self.anchor[argmax].cmp(&other.anchor[argmax])
        }
    }

    /// Grid-position comparison: lexicographic on the anchor alone. The level
    /// of a node is metadata and does not participate.
    pub fn node_cmp(&self, other: &Octant) -> Ordering {
        self.anchor.cmp(&other.anchor)
    }

    /// The 0..7 index of the octant within its parent, packed as
    /// `x_bit | y_bit << 1 | z_bit << 2`.
    pub fn child_id(&self) -> i32 {
        let h = self.side();
        let mut id = 0;
        if self.anchor[0] & h != 0 {
            id |= 1;
        }
        if self.anchor[1] & h != 0 {
            id |= 2;
        }
        if self.anchor[2] & h != 0 {
            id |= 4;
        }
        id
    }

    /// Return the parent octant. The level must be positive.
    pub fn parent(&self) -> Octant {
        debug_assert!(self.level > 0);
        let h = self.side();
        Octant::new(
            [
                self.anchor[0] & !h,
                self.anchor[1] & !h,
                self.anchor[2] & !h,
            ],
            self.level - 1,
        )
    }

    /// Return the sibling with the given child id at this octant's level. At
    /// level 0 the 0-sibling is the octant itself and every other id falls
    /// outside the block, where a bounds check drops it.
    pub fn sibling(&self, id: i32) -> Octant {
        let h = self.side();
        Octant::new(
            [
                (self.anchor[0] & !h) + (id & 1) * h,
                (self.anchor[1] & !h) + ((id >> 1) & 1) * h,
                (self.anchor[2] & !h) + ((id >> 2) & 1) * h,
            ],
            self.level,
        )
    }

    /// Return the eight children in child-id order. The level must be below
    /// `MAX_LEVEL`.
    pub fn children(&self) -> Vec<Octant> {
        debug_assert!(self.level < MAX_LEVEL);
        let h = self.side() >> 1;
        (0..8)
            .map(|id: i32| {
                Octant::new(
                    [
                        self.anchor[0] + (id & 1) * h,
                        self.anchor[1] + ((id >> 1) & 1) * h,
                        self.anchor[2] + ((id >> 2) & 1) * h,
                    ],
                    self.level + 1,
                )
            })
            .collect()
    }

    /// Return all children of this octant's parent in child-id order.
    pub fn siblings(&self) -> Vec<Octant> {
        (0..8).map(|id| self.sibling(id)).collect()
    }

    /// True if all coordinates lie inside the block and the level is legal.
    pub fn in_bounds(&self) -> bool {
        (0..=MAX_LEVEL).contains(&self.level) && self.anchor.iter().all(|a| (0..HMAX).contains(a))
    }

    /// True if the given point lies inside the octant's half-open cube.
    pub fn contains_point(&self, x: CoordType, y: CoordType, z: CoordType) -> bool {
        let h = self.side();
        izip!(self.anchor, [x, y, z]).all(|(a, p)| a <= p && p < a + h)
    }

    /// True if `other`'s cube lies entirely within this octant's cube.
    pub fn encloses(&self, other: &Octant) -> bool {
        let h = self.side();
        let ho = other.side();
        izip!(self.anchor, other.anchor).all(|(a, b)| a <= b && b + ho <= a + h)
    }

    /// The octant of the same level whose anchor is offset by `direction`
    /// cubes along each axis, or `None` if it leaves the block.
    pub fn neighbor(&self, direction: &[i64; 3]) -> Option<Octant> {
        let step = self.side() as i64;
        let max = HMAX as i64;

        let mut anchor = [0 as CoordType; 3];
        for (a, c, d) in izip!(&mut anchor, &self.anchor, direction) {
            let shifted = *c as i64 + step * d;
            if shifted < 0 || shifted >= max {
                return None;
            }
            *a = shifted as CoordType;
        }

        Some(Octant::new(anchor, self.level))
    }

    /// All in-bounds face, edge and corner neighbors of this octant.
    pub fn neighbors(&self) -> Vec<Octant> {
        DIRECTIONS
            .iter()
            .filter_map(|d| self.neighbor(d))
            .collect()
    }

    /// True if the closed cubes of the two octants share at least one point
    /// while neither contains the other.
    pub fn is_adjacent(&self, other: &Octant) -> bool {
        if self.encloses(other) || other.encloses(self) {
            return false;
        }
        let h = self.side();
        let ho = other.side();
        izip!(self.anchor, other.anchor).all(|(a, b)| a <= b + ho && b <= a + h)
    }
}

impl PartialEq for Octant {
    fn eq(&self, other: &Self) -> bool {
        self.anchor == other.anchor && self.level == other.level
    }
}
impl Eq for Octant {}

impl Ord for Octant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.element_cmp(other)
    }
}

impl PartialOrd for Octant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.element_cmp(other))
    }
}

impl Hash for Octant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.anchor.hash(state);
        self.level.hash(state);
    }
}

impl OctantInterface for Octant {
    type NodeIndices = Vec<Octant>;

    fn parent(&self) -> Self {
        self.parent()
    }

    fn children(&self) -> Self::NodeIndices {
        self.children()
    }

    fn siblings(&self) -> Self::NodeIndices {
        self.siblings()
    }

    fn neighbors(&self) -> Self::NodeIndices {
        self.neighbors()
    }

    fn is_adjacent(&self, other: &Self) -> bool {
        self.is_adjacent(other)
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn test_child_id() {
        let parent = Octant::new([0, 0, 0], 3);
        for (id, child) in parent.children().iter().enumerate() {
            assert_eq!(child.child_id(), id as i32);
            assert_eq!(child.parent(), parent);
        }
    }

    #[test]
    fn test_siblings() {
        // Two siblings agree on the whole family.
        let a = Octant::new([0, 0, 0], MAX_LEVEL);
        let b = Octant::new([1, 1, 1], MAX_LEVEL);

        let sa = a.siblings().into_iter().sorted().collect_vec();
        let sb = b.siblings().into_iter().sorted().collect_vec();
        assert_eq!(sa, sb);

        // The 0-sibling of a level-0 octant is the octant itself and the
        // remaining ids leave the block.
        let root = Octant::new([0, 0, 0], 0);
        assert_eq!(root.sibling(0), root);
        for id in 1..8 {
            assert!(!root.sibling(id).in_bounds());
        }
    }

    #[test]
    fn test_element_order() {
        // Children sort in child-id order and follow their parent directly.
        let parent = Octant::new([0, 0, 0], 1);
        let children = parent.children();
        let sorted = children.iter().cloned().sorted().collect_vec();
        assert_eq!(sorted, children);
        assert_eq!(parent.element_cmp(&children[0]), Ordering::Less);

        // Disjoint octants of different levels sort by position.
        let a = Octant::new([0, 0, 0], 2);
        let b = Octant::new([HMAX / 2, 0, 0], 1);
        assert_eq!(a.element_cmp(&b), Ordering::Less);
    }

    #[test]
    fn test_node_order_ignores_level() {
        let mut a = Octant::new([4, 5, 6], 0);
        let b = Octant::new([4, 5, 6], 7);
        assert_eq!(a.node_cmp(&b), Ordering::Equal);

        a.anchor[2] += 1;
        assert_eq!(a.node_cmp(&b), Ordering::Greater);
    }

    #[test]
    fn test_neighbors() {
        let h = 1 << (MAX_LEVEL - 2);

        // An interior octant has the full complement of 26 neighbors.
        let interior = Octant::new([h, h, h], 2);
        let neighbors = interior.neighbors();
        assert_eq!(neighbors.len(), 26);
        for n in neighbors.iter() {
            assert!(n.in_bounds());
            assert_eq!(n.level, 2);
            assert!(interior.is_adjacent(n));
        }

        // A corner octant keeps only the 7 directions pointing inward.
        let corner = Octant::new([0, 0, 0], 2);
        assert_eq!(corner.neighbors().len(), 7);
    }

    #[test]
    fn test_encloses() {
        let parent = Octant::new([0, 0, 0], 1);
        for child in parent.children() {
            assert!(parent.encloses(&child));
            assert!(!child.encloses(&parent));
        }

        let other = Octant::new([HMAX / 2, 0, 0], 1);
        assert!(!parent.encloses(&other));
        assert!(parent.encloses(&parent));
    }

    #[test]
    fn test_is_adjacent() {
        let a = Octant::new([0, 0, 0], 1);

        // Ancestors overlap, so they are not adjacent.
        let child = a.children()[0];
        assert!(!a.is_adjacent(&child));

        // Octants across a level difference share a corner.
        let h = 1 << (MAX_LEVEL - 2);
        let fine = Octant::new([HMAX / 2, HMAX / 2, HMAX / 2], 2);
        assert!(a.is_adjacent(&fine));

        // A gap of one cube breaks adjacency.
        let apart = Octant::new([HMAX / 2 + h, 0, 0], 2);
        let near = Octant::new([0, 0, 0], 2);
        assert!(!near.is_adjacent(&apart));
    }

    #[test]
    fn test_contains_point() {
        let oct = Octant::new([0, 0, 0], 1);
        let h = oct.side();
        assert!(oct.contains_point(0, 0, 0));
        assert!(oct.contains_point(h - 1, h - 1, h - 1));
        assert!(!oct.contains_point(h, 0, 0));
    }
}
