//! Build a graded mesh on one block and report its statistics.
use octmesh_tree::constants::MAX_LEVEL;
use octmesh_tree::types::tree::{Octree, Refinement};

fn main() {
    // Start uniform and cascade refinement into one corner, then restore the
    // 2:1 grading.
    let mut tree = Octree::uniform_tree(2);
    for _ in 0..3 {
        let mut instructions = vec![Refinement::Keep; tree.num_elements()];
        instructions[0] = Refinement::Refine;
        tree.refine(&instructions, 0, MAX_LEVEL);
    }
    tree.balance();

    // Number the nodes and emit the element connectivity.
    tree.create_nodes(2);
    let independent = tree.number_nodes();
    tree.create_mesh(2);

    println!("elements:          {}", tree.num_elements());
    println!("independent nodes: {}", independent);

    // Transfer operators against the opportunistically coarsened mesh.
    let mut coarse = tree.coarsen();
    coarse.create_nodes(2);
    coarse.number_nodes();
    coarse.create_mesh(2);

    let interpolation = tree.create_interpolation(&coarse);
    let restriction = coarse.create_restriction(&tree);

    println!("coarse elements:    {}", coarse.num_elements());
    println!("interpolation rows: {}", interpolation.num_rows());
    println!("restriction rows:   {}", restriction.num_rows());
}
