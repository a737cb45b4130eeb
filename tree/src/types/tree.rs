//! The octree over one block.
use crate::types::array::OctantArray;

/// Per-leaf instruction consumed by [`Octree::refine`](crate::types::tree::Octree::refine).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Refinement {
    /// Replace the leaf's family by its parent, subject to the level floor.
    Coarsen,
    /// Keep the leaf as it is.
    Keep,
    /// Split the leaf into its eight children, subject to the level ceiling.
    Refine,
}

/// A single adaptively refined octree: the sorted leaf elements tiling the
/// block, the optional nodal mesh over them, and the mesh metadata the
/// multi-block layer installs.
#[derive(Clone, Debug)]
pub struct Octree {
    /// Leaf elements in Morton order.
    pub elements: OctantArray,

    /// Mesh nodes in grid-position order; `None` until
    /// [`create_nodes`](Octree::create_nodes) has run.
    pub nodes: Option<OctantArray>,

    /// Element order of the mesh: 2 (trilinear) or 3 (triquadratic).
    pub order: i32,

    /// Row offsets of the element connectivity emitted by
    /// [`create_mesh`](Octree::create_mesh).
    pub elem_ptr: Vec<usize>,

    /// Node tags per element, `order^3` entries per row in Morton element order.
    pub elem_conn: Vec<i32>,

    /// Row offsets of the installed dependent-node data.
    pub dep_ptr: Vec<usize>,

    /// Independent node numbers combined by each dependent node.
    pub dep_conn: Vec<i32>,

    /// Weights matching `dep_conn`.
    pub dep_weights: Vec<f64>,
}
