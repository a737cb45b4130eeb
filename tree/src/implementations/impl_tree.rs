//! The single-tree engine: construction, refinement, coarsening, balancing,
//! enclosing search, node creation and transfer-operator construction.
use itertools::Itertools;
use rand::Rng;
use std::collections::HashSet;

use octmesh_traits::tree::Tree;

use crate::constants::{DIRECTIONS, HMAX, MAX_LEVEL, MAX_ORDER, MIN_ORDER};
use crate::implementations::impl_weights::unique_sort;
use crate::types::{
    array::{OctantArray, OctantOrder},
    hash::OctantHash,
    octant::Octant,
    operator::TransferOperator,
    queue::OctantQueue,
    tree::{Octree, Refinement},
    weights::IndexWeight,
};

/// Remove every octant that strictly contains another octant of the set,
/// leaving the finest cover of each region, and return the sorted remainder.
fn linearize_octants(set: &HashSet<Octant>) -> OctantArray {
    let mut keep = set.clone();
    for oct in set.iter() {
        let mut current = *oct;
        while current.level > 0 {
            current = current.parent();
            keep.remove(&current);
        }
    }

    let mut array = OctantArray::from_vec(keep.into_iter().collect_vec(), OctantOrder::Elements);
    array.sort();
    array
}

/// Append the weights a node contributes at the given scale: a single entry
/// for an independent node, or its expanded dependent row with the scale
/// multiplied through.
fn push_node_weights(
    weights: &mut Vec<IndexWeight>,
    node: &Octant,
    scale: f64,
    dep_ptr: &[usize],
    dep_conn: &[i32],
    dep_weights: &[f64],
) {
    if node.tag >= 0 {
        weights.push(IndexWeight {
            index: node.tag,
            weight: scale,
        });
    } else {
        let row = (-node.tag - 1) as usize;
        for jp in dep_ptr[row]..dep_ptr[row + 1] {
            weights.push(IndexWeight {
                index: dep_conn[jp],
                weight: scale * dep_weights[jp],
            });
        }
    }
}

impl Octree {
    /// Construct a tree uniformly refined to the given level, with the
    /// `8^level` leaves in sorted order.
    pub fn uniform_tree(refine_level: i32) -> Octree {
        let level = refine_level.clamp(0, MAX_LEVEL);
        let h = 1 << (MAX_LEVEL - level);

        let octs = (0..HMAX)
            .step_by(h as usize)
            .flat_map(|z| (0..HMAX).step_by(h as usize).map(move |y| (z, y)))
            .flat_map(|(z, y)| {
                (0..HMAX)
                    .step_by(h as usize)
                    .map(move |x| Octant::new([x, y, z], level))
            })
            .collect_vec();

        Octree::from_elements(OctantArray::from_vec(octs, OctantOrder::Elements))
    }

    /// Construct a tree of `nocts` octants drawn at uniformly random levels
    /// and grid positions, for testing. Duplicates collapse in the sort, so
    /// the tree may end up smaller than requested; the caller seeds a tiling
    /// if one is required.
    pub fn random_tree(nocts: usize, min_level: i32, max_level: i32) -> Octree {
        let min_level = min_level.clamp(0, MAX_LEVEL);
        let max_level = max_level.clamp(min_level, MAX_LEVEL);
        let mut rng = rand::thread_rng();

        let octs = (0..nocts)
            .map(|_| {
                let level = rng.gen_range(min_level..=max_level);
                let h = 1 << (MAX_LEVEL - level);
                let cells = 1 << level;
                Octant::new(
                    [
                        h * rng.gen_range(0..cells),
                        h * rng.gen_range(0..cells),
                        h * rng.gen_range(0..cells),
                    ],
                    level,
                )
            })
            .collect_vec();

        Octree::from_elements(OctantArray::from_vec(octs, OctantOrder::Elements))
    }

    /// Adopt a caller-provided array as the leaf elements; it is sorted and
    /// deduplicated here. Seeding a set whose interiors tile the block is the
    /// caller's responsibility.
    pub fn from_elements(mut elements: OctantArray) -> Octree {
        elements.ordering = OctantOrder::Elements;
        elements.sort();

        Octree {
            elements,
            nodes: None,
            order: MIN_ORDER,
            elem_ptr: Vec::new(),
            elem_conn: Vec::new(),
            dep_ptr: Vec::new(),
            dep_conn: Vec::new(),
            dep_weights: Vec::new(),
        }
    }

    /// Number of leaf elements.
    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Number of independent mesh nodes (non-negative tags).
    pub fn num_nodes(&self) -> usize {
        self.nodes
            .as_ref()
            .map_or(0, |nodes| nodes.iter().filter(|n| n.tag >= 0).count())
    }

    /// Borrow the leaf elements in Morton order.
    pub fn leaves(&self) -> &[Octant] {
        &self.elements.octs
    }

    /// Borrow the mesh nodes in grid-position order, if created.
    pub fn nodes(&self) -> Option<&[Octant]> {
        self.nodes.as_ref().map(|nodes| nodes.octs.as_slice())
    }

    /// Mutable access to the mesh nodes, for the mesh layer to write tags.
    pub fn nodes_mut(&mut self) -> Option<&mut [Octant]> {
        self.nodes.as_mut().map(|nodes| nodes.octs.as_mut_slice())
    }

    /// Install the dependent-node rows produced by the mesh layer. Row `k`
    /// holds the independent node numbers and weights whose combination
    /// defines the node tagged `-k - 1` in the node array.
    pub fn set_dependent_nodes(
        &mut self,
        dep_ptr: Vec<usize>,
        dep_conn: Vec<i32>,
        dep_weights: Vec<f64>,
    ) {
        self.dep_ptr = dep_ptr;
        self.dep_conn = dep_conn;
        self.dep_weights = dep_weights;
    }

    fn invalidate_mesh(&mut self) {
        self.nodes = None;
        self.elem_ptr.clear();
        self.elem_conn.clear();
    }

    /// Refine the tree by one instruction per leaf, with levels clamped to
    /// `[min_level, max_level]`. A leaf asked to coarsen contributes its
    /// parent, a kept leaf its 0-sibling, a refined leaf its first child;
    /// afterwards every contributed octant is completed to its full family so
    /// the leaves tile the block again, and the finest octant covering each
    /// region wins. Missing trailing instructions count as `Keep`. Any
    /// existing mesh is invalidated.
    pub fn refine(&mut self, refinement: &[Refinement], min_level: i32, max_level: i32) {
        let max_level = max_level.clamp(0, MAX_LEVEL);
        let min_level = min_level.clamp(0, max_level);

        self.invalidate_mesh();

        let mut hash = OctantHash::new();
        for (index, oct) in self.elements.iter().enumerate() {
            match refinement.get(index).copied().unwrap_or(Refinement::Keep) {
                Refinement::Keep => {
                    hash.add(oct.sibling(0));
                }
                Refinement::Coarsen => {
                    if oct.level > min_level {
                        hash.add(oct.parent());
                    } else {
                        hash.add(Octant::new(oct.anchor, oct.level));
                    }
                }
                Refinement::Refine => {
                    if oct.level < max_level {
                        hash.add(Octant::new(oct.anchor, oct.level + 1));
                    } else {
                        hash.add(Octant::new(oct.anchor, oct.level));
                    }
                }
            }
        }

        // Complete every family so the leaves tile the block again.
        let seeds = hash.to_array();
        for oct in seeds.iter() {
            for id in 0..8 {
                let sibling = oct.sibling(id);
                if sibling.in_bounds() {
                    hash.add(sibling);
                }
            }
        }

        // A kept 0-sibling can sit above freshly refined children.
        self.elements = linearize_octants(&hash.set);
    }

    /// Collapse every complete family of eight siblings into its parent and
    /// return the result as a new tree; the receiver is unchanged. Families
    /// that are not fully present survive as they are.
    pub fn coarsen(&self) -> Octree {
        let array = &self.elements.octs;
        let offset = (1usize << 3) - 1;

        let mut queue = OctantQueue::new();
        let mut index = 0;
        while index < array.len() {
            let mut same_parent = false;
            if array[index].level > 0
                && array[index].child_id() == 0
                && index + offset < array.len()
                && array[index + offset].child_id() == offset as i32
                && array[index + offset].sibling(0) == array[index]
            {
                queue.push(array[index].parent());
                index += offset;
                same_parent = true;
            }
            if !same_parent {
                queue.push(array[index]);
            }
            index += 1;
        }

        Octree::from_elements(queue.to_array())
    }

    /// Enforce the 2:1 invariant: after this call, leaves sharing any face,
    /// edge or corner differ by at most one level. Every octant rippling
    /// through the queue forces its neighborhood to exist at most one level
    /// coarser by inserting the missing parent families; the set only ever
    /// gains octants, so the iteration reaches a fixed point. The finest
    /// octant covering each region becomes the leaf, and any existing mesh is
    /// invalidated.
    pub fn balance(&mut self) {
        self.invalidate_mesh();

        let mut hash = OctantHash::new();
        let mut queue = OctantQueue::new();
        for oct in self.elements.iter() {
            let seed = Octant::new(oct.anchor, oct.level);
            hash.add(seed);
            queue.push(seed);
        }

        while let Some(oct) = queue.pop() {
            if oct.level == 0 {
                continue;
            }
            for direction in DIRECTIONS.iter() {
                if let Some(neighbor) = oct.neighbor(direction) {
                    let parent = neighbor.parent();
                    if !hash.contains(&neighbor) && !hash.contains(&parent) {
                        if hash.add(parent) {
                            queue.push(parent);
                        }
                        for id in 0..8 {
                            let sibling = parent.sibling(id);
                            if sibling.in_bounds() && hash.add(sibling) {
                                queue.push(sibling);
                            }
                        }
                    }
                }
            }
        }

        self.elements = linearize_octants(&hash.set);
    }

    /// The leaf whose cube entirely contains `oct`, or `None` if no leaf
    /// does (an out-of-block query, or a query coarser than the local
    /// refinement).
    pub fn find_enclosing(&self, oct: &Octant) -> Option<&Octant> {
        self.elements.find_enclosing(oct)
    }

    /// Half-open index range `[low, high)` of the leaves overlapping `oct`,
    /// found by enclosing the degenerate octants at `oct`'s lower corner and
    /// at its upper corner less one grid unit. Assumes the leaves tile the
    /// block, which makes the overlapping leaves contiguous in Morton order.
    pub fn find_enclosing_range(&self, oct: &Octant) -> (usize, usize) {
        let mut low = 0;
        let mut high = self.num_elements();
        let h = oct.side();

        let mut point = Octant::new(oct.anchor, MAX_LEVEL);
        if let Some(index) = self.elements.find_enclosing_index(&point) {
            low = index;
        }

        for a in point.anchor.iter_mut() {
            *a += h - 1;
        }
        if let Some(index) = self.elements.find_enclosing_index(&point) {
            high = index + 1;
        }

        (low, high)
    }

    /// Emit the mesh nodes of every leaf on its `order x order x order`
    /// sub-grid and store them sorted by grid position, so positions shared
    /// between elements appear exactly once. Nodes start at level 0 with the
    /// provisional-independent tag 1; [`create_mesh`](Octree::create_mesh)
    /// finalizes the levels. The order is clamped to `[2, 3]`.
    pub fn create_nodes(&mut self, order: i32) {
        self.order = order.clamp(MIN_ORDER, MAX_ORDER);
        self.elem_ptr.clear();
        self.elem_conn.clear();

        let stride = self.order;
        let mut all_nodes =
            Vec::with_capacity((stride * stride * stride) as usize * self.elements.len());
        for element in self.elements.iter() {
            let h = element.side() / (stride - 1);
            for kk in 0..stride {
                for jj in 0..stride {
                    for ii in 0..stride {
                        let mut node = Octant::new(
                            [
                                element.anchor[0] + ii * h,
                                element.anchor[1] + jj * h,
                                element.anchor[2] + kk * h,
                            ],
                            0,
                        );
                        node.tag = 1;
                        all_nodes.push(node);
                    }
                }
            }
        }

        let mut nodes = OctantArray::from_vec(all_nodes, OctantOrder::Nodes);
        nodes.sort();
        self.nodes = Some(nodes);
    }

    /// Assign consecutive 0-based numbers to the independent nodes, leaving
    /// dependent tags untouched, and return the independent count. Meshes on
    /// a lone tree have no dependent nodes yet, so a fresh node array simply
    /// numbers every node.
    pub fn number_nodes(&mut self) -> usize {
        let mut next = 0;
        if let Some(nodes) = self.nodes.as_mut() {
            for node in nodes.octs.iter_mut() {
                if node.tag >= 0 {
                    node.tag = next;
                    next += 1;
                }
            }
        }
        next as usize
    }

    /// Emit the compressed-row element connectivity: each element's `order^3`
    /// node tags in lexical sub-grid order, elements in Morton order. Looking
    /// a node up also raises its level to the finest adjacent element level,
    /// the length scale the transfer operators work from. Nodes are created
    /// first if absent or of a different order.
    pub fn create_mesh(&mut self, order: i32) {
        let order = order.clamp(MIN_ORDER, MAX_ORDER);
        if self.nodes.is_none() || self.order != order {
            self.create_nodes(order);
        }

        let stride = self.order;
        let mut elem_ptr = Vec::with_capacity(self.elements.len() + 1);
        let mut elem_conn =
            Vec::with_capacity((stride * stride * stride) as usize * self.elements.len());
        elem_ptr.push(0);

        let nodes = match self.nodes.as_mut() {
            Some(nodes) => nodes,
            None => return,
        };

        for element in self.elements.octs.iter() {
            let h = element.side() / (stride - 1);
            for kk in 0..stride {
                for jj in 0..stride {
                    for ii in 0..stride {
                        let point = Octant::new(
                            [
                                element.anchor[0] + ii * h,
                                element.anchor[1] + jj * h,
                                element.anchor[2] + kk * h,
                            ],
                            0,
                        );
                        let node = nodes
                            .contains_mut(&point)
                            .expect("element node missing from the node array");
                        if element.level > node.level {
                            node.level = element.level;
                        }
                        elem_conn.push(node.tag);
                    }
                }
            }
            elem_ptr.push(elem_conn.len());
        }

        self.elem_ptr = elem_ptr;
        self.elem_conn = elem_conn;
    }

    /// Build the interpolation operator from a coarser tree onto this tree,
    /// one compressed row per independent fine node in node order. A fine
    /// node coinciding with a coarse node inherits its weights; otherwise its
    /// position on the node grid of its own element selects the coarse nodes
    /// that interpolate it (edge midpoints, face centers or the body center).
    /// Dependent coarse nodes expand through the installed rows. Node levels
    /// and numbers must be finalized on both trees with
    /// [`create_mesh`](Octree::create_mesh) and
    /// [`number_nodes`](Octree::number_nodes); if either tree has no node
    /// array the operator is empty.
    pub fn create_interpolation(&self, coarse: &Octree) -> TransferOperator {
        let (Some(fine_nodes), Some(coarse_nodes)) = (self.nodes.as_ref(), coarse.nodes.as_ref())
        else {
            return TransferOperator::new();
        };

        let mut op = TransferOperator::new();
        let mut weights: Vec<IndexWeight> = Vec::new();

        for fine in fine_nodes.iter() {
            if fine.tag < 0 {
                continue;
            }
            weights.clear();

            if let Some(node) = coarse_nodes.contains(fine) {
                push_node_weights(
                    &mut weights,
                    node,
                    1.0,
                    &coarse.dep_ptr,
                    &coarse.dep_conn,
                    &coarse.dep_weights,
                );
            } else {
                // The node sits inside a coarse element. Its child id on the
                // node grid of its own element picks the coarse nodes that
                // interpolate it; order 3 works at half the grid spacing.
                let level = if self.order == MAX_ORDER {
                    fine.level + 1
                } else {
                    fine.level
                };
                let probe = Octant::new(fine.anchor, level);
                let h = probe.side();
                let id = probe.child_id();
                let corner = probe.sibling(0);

                match id {
                    // Midpoint of an edge along x, y or z: both edge ends at
                    // half weight.
                    1 | 2 | 4 => {
                        let axis = match id {
                            1 => 0,
                            2 => 1,
                            _ => 2,
                        };
                        let mut other = corner;
                        other.anchor[axis] += 2 * h;
                        for point in [corner, other] {
                            let node = coarse_nodes
                                .contains(&point)
                                .expect("coarse edge node missing");
                            push_node_weights(
                                &mut weights,
                                node,
                                0.5,
                                &coarse.dep_ptr,
                                &coarse.dep_conn,
                                &coarse.dep_weights,
                            );
                        }
                    }
                    // Center of an xy, xz or yz face: its four corners at
                    // quarter weight.
                    3 | 5 | 6 => {
                        let (ie, je) = match id {
                            3 => ([1, 0, 0], [0, 1, 0]),
                            5 => ([1, 0, 0], [0, 0, 1]),
                            _ => ([0, 1, 0], [0, 0, 1]),
                        };
                        for jj in 0..2 {
                            for ii in 0..2 {
                                let point = Octant::new(
                                    [
                                        corner.anchor[0] + 2 * h * (ii * ie[0] + jj * je[0]),
                                        corner.anchor[1] + 2 * h * (ii * ie[1] + jj * je[1]),
                                        corner.anchor[2] + 2 * h * (ii * ie[2] + jj * je[2]),
                                    ],
                                    0,
                                );
                                let node = coarse_nodes
                                    .contains(&point)
                                    .expect("coarse face node missing");
                                push_node_weights(
                                    &mut weights,
                                    node,
                                    0.25,
                                    &coarse.dep_ptr,
                                    &coarse.dep_conn,
                                    &coarse.dep_weights,
                                );
                            }
                        }
                    }
                    // Body center: all eight corners of the coarse element at
                    // one-eighth weight.
                    7 => {
                        for kk in 0..2 {
                            for jj in 0..2 {
                                for ii in 0..2 {
                                    let point = Octant::new(
                                        [
                                            corner.anchor[0] + 2 * h * ii,
                                            corner.anchor[1] + 2 * h * jj,
                                            corner.anchor[2] + 2 * h * kk,
                                        ],
                                        0,
                                    );
                                    let node = coarse_nodes
                                        .contains(&point)
                                        .expect("coarse corner node missing");
                                    push_node_weights(
                                        &mut weights,
                                        node,
                                        0.125,
                                        &coarse.dep_ptr,
                                        &coarse.dep_conn,
                                        &coarse.dep_weights,
                                    );
                                }
                            }
                        }
                    }
                    // Child 0 lies on the coarse grid and was caught by the
                    // exact-match branch.
                    _ => {}
                }
            }

            unique_sort(&mut weights);
            for w in weights.iter() {
                op.conn.push(w.index);
                op.weights.push(w.weight);
            }
            op.ptr.push(op.conn.len());
        }

        op
    }

    /// Build the restriction operator gathering this tree's independent
    /// nodes from a finer tree: a 27-point stencil over the fine node grid,
    /// weighted by the tensor product of `(0.5, 1.0, 0.5)` and normalized to
    /// a unit row sum. Stencil points with no fine node contribute nothing;
    /// dependent fine nodes expand through the installed rows. Node levels
    /// and numbers must be finalized on both trees; if either tree has no
    /// node array the operator is empty.
    pub fn create_restriction(&self, fine: &Octree) -> TransferOperator {
        let (Some(coarse_nodes), Some(fine_nodes)) = (self.nodes.as_ref(), fine.nodes.as_ref())
        else {
            return TransferOperator::new();
        };

        const WVALS: [f64; 3] = [0.5, 1.0, 0.5];

        let mut op = TransferOperator::new();
        let mut weights: Vec<IndexWeight> = Vec::new();

        for coarse in coarse_nodes.iter() {
            if coarse.tag < 0 {
                continue;
            }
            weights.clear();
            let mut total = 0.0;

            // The stencil spacing is the fine node grid at this position.
            if let Some(base) = fine_nodes.contains(coarse) {
                let h = (1 << (MAX_LEVEL - base.level)) / (fine.order - 1);

                for kk in 0..3 {
                    for jj in 0..3 {
                        for ii in 0..3 {
                            let point = Octant::new(
                                [
                                    coarse.anchor[0] + h * (ii - 1),
                                    coarse.anchor[1] + h * (jj - 1),
                                    coarse.anchor[2] + h * (kk - 1),
                                ],
                                0,
                            );
                            if let Some(node) = fine_nodes.contains(&point) {
                                let wk = WVALS[ii as usize] * WVALS[jj as usize] * WVALS[kk as usize];
                                total += wk;
                                push_node_weights(
                                    &mut weights,
                                    node,
                                    wk,
                                    &fine.dep_ptr,
                                    &fine.dep_conn,
                                    &fine.dep_weights,
                                );
                            }
                        }
                    }
                }
            }

            unique_sort(&mut weights);
            for w in weights.iter() {
                op.conn.push(w.index);
                op.weights.push(w.weight / total);
            }
            op.ptr.push(op.conn.len());
        }

        op
    }
}

impl Tree for Octree {
    type NodeIndex = Octant;
    type NodeIndexSlice<'a> = &'a [Octant] where Self: 'a;

    fn num_elements(&self) -> usize {
        self.num_elements()
    }

    fn num_nodes(&self) -> usize {
        self.num_nodes()
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn get_elements(&self) -> &[Octant] {
        self.leaves()
    }

    fn get_nodes(&self) -> Option<&[Octant]> {
        self.nodes()
    }
}
