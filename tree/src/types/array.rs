//! A sorted, duplicate-free container of octants.
use crate::types::octant::Octant;

/// Comparison discipline of an [`OctantArray`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OctantOrder {
    /// Morton order on the anchors with ties broken by ascending level; the
    /// structural order of element arrays.
    #[default]
    Elements,
    /// Grid-position order: octants at the same point compare equal
    /// regardless of their level, which node arrays treat as metadata.
    Nodes,
}

/// Container of octants kept under a fixed comparison discipline.
#[derive(Clone, Debug, Default)]
pub struct OctantArray {
    /// The octants, in comparison order once [`sort`](OctantArray::sort) has run.
    pub octs: Vec<Octant>,

    /// Comparison discipline used for sorting and lookups.
    pub ordering: OctantOrder,
}
