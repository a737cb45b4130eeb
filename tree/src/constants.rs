//! Crate-wide constants.
use crate::types::octant::CoordType;

/// The deepest possible refinement level. Level 0 is the whole block, level
/// `MAX_LEVEL` a degenerate point.
pub const MAX_LEVEL: CoordType = 30;

/// Side length of the block: octant coordinates run over `[0, HMAX)`.
pub const HMAX: CoordType = 1 << MAX_LEVEL;

/// Lowest admissible element order (trilinear).
pub const MIN_ORDER: i32 = 2;

/// Highest admissible element order (triquadratic).
pub const MAX_ORDER: i32 = 3;

/// Offsets, in units of the octant side length, to the 26 face, edge and
/// corner neighbors of a cube.
pub const DIRECTIONS: [[i64; 3]; 26] = [
    [-1, -1, -1],
    [-1, -1, 0],
    [-1, -1, 1],
    [-1, 0, -1],
    [-1, 0, 0],
    [-1, 0, 1],
    [-1, 1, -1],
    [-1, 1, 0],
    [-1, 1, 1],
    [0, -1, -1],
    [0, -1, 0],
    [0, -1, 1],
    [0, 0, -1],
    [0, 0, 1],
    [0, 1, -1],
    [0, 1, 0],
    [0, 1, 1],
    [1, -1, -1],
    [1, -1, 0],
    [1, -1, 1],
    [1, 0, -1],
    [1, 0, 0],
    [1, 0, 1],
    [1, 1, -1],
    [1, 1, 0],
    [1, 1, 1],
];
