//! Data structures for octants.

/// Coordinate type
pub type CoordType = i32;

/// An axis-aligned cube of the block, described by the integer coordinates of
/// its lower corner (the 'anchor') and its refinement level. An octant at
/// level `l` has side length `2^(MAX_LEVEL - l)` and its anchor is a multiple
/// of that length on every axis.
///
/// The same value doubles as a mesh node, in which case the anchor is a grid
/// position, `level` records the finest adjacent element level, and `tag`
/// carries the node number: non-negative for an independent node, `-k - 1`
/// for the dependent node with row `k` in the installed dependent-node data.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct Octant {
    /// Lower corner of the cube.
    pub anchor: [CoordType; 3],
    /// Refinement level in `[0, MAX_LEVEL]`.
    pub level: CoordType,
    /// Caller-owned scratch; the mesh layer threads node numbers and
    /// dependent-node references through it.
    pub tag: i32,
    /// Second caller-owned scratch slot, e.g. for cached child ordinals.
    pub info: i32,
}
