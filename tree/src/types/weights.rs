//! Ordered index-weight records.

/// A node number paired with an interpolation weight.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IndexWeight {
    /// Independent node number.
    pub index: i32,
    /// Weight the node contributes.
    pub weight: f64,
}
