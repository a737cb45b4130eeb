//! Traits
use std::hash::Hash;

/// Tree is the trait interface a multi-block forest programs against. It makes
/// no assumption about how the leaf octants were produced; it simply provides
/// read access to the leaf and node arrays and the mesh counts the forest
/// needs when it glues trees together and assigns global numbering.
pub trait Tree {
    // A tree node.
    type NodeIndex: OctantInterface;

    // Slice of nodes.
    type NodeIndexSlice<'a>: IntoIterator<Item = &'a Self::NodeIndex>
    where
        Self: 'a;

    // Number of leaf elements in the current tiling.
    fn num_elements(&self) -> usize;

    // Number of independent mesh nodes.
    fn num_nodes(&self) -> usize;

    // Element order of the mesh: 2 (trilinear) or 3 (triquadratic).
    fn order(&self) -> i32;

    // Get a reference to the leaf elements in sorted order.
    fn get_elements(&self) -> Self::NodeIndexSlice<'_>;

    // Get a reference to the mesh nodes, if they have been created.
    fn get_nodes(&self) -> Option<Self::NodeIndexSlice<'_>>;
}

/// A minimal interface for octant-like tree nodes.
pub trait OctantInterface
where
    Self: Hash + Eq,
{
    // Copy of nodes
    type NodeIndices: IntoIterator<Item = Self>;

    fn parent(&self) -> Self;

    fn children(&self) -> Self::NodeIndices;

    fn siblings(&self) -> Self::NodeIndices;

    fn neighbors(&self) -> Self::NodeIndices;

    fn is_adjacent(&self, other: &Self) -> bool;
}
