//! End-to-end tests over the refine / balance / mesh / operator pipeline.
use std::collections::HashMap;

use octmesh_traits::tree::Tree;
use octmesh_tree::constants::HMAX;
use octmesh_tree::implementations::helpers::random_refined_tree;
use octmesh_tree::types::tree::Octree;

fn meshed(mut tree: Octree, order: i32) -> Octree {
    tree.create_nodes(order);
    tree.number_nodes();
    tree.create_mesh(order);
    tree
}

#[test]
fn test_adaptive_pipeline() {
    let mut tree = random_refined_tree(42, 3);

    // Structural invariants of the leaf array.
    for pair in tree.leaves().windows(2) {
        assert!(pair[0] < pair[1]);
    }
    let volume: u128 = tree
        .leaves()
        .iter()
        .map(|leaf| {
            let h = leaf.side() as u128;
            h * h * h
        })
        .sum();
    let h = HMAX as u128;
    assert_eq!(volume, h * h * h);

    // 2:1 balance over faces, edges and corners.
    for a in tree.leaves() {
        for b in tree.leaves() {
            if a.is_adjacent(b) {
                assert!((a.level - b.level).abs() <= 1);
            }
        }
    }

    // The enclosing search recovers every leaf, and the index range of a
    // leaf's parent covers exactly the leaves overlapping it.
    let leaves = tree.leaves().to_vec();
    for (index, leaf) in leaves.iter().enumerate() {
        assert_eq!(tree.find_enclosing(leaf), Some(leaf));

        if leaf.level > 0 {
            let parent = leaf.parent();
            let (low, high) = tree.find_enclosing_range(&parent);
            assert!((low..high).contains(&index));
            for other in &leaves[low..high] {
                assert!(parent.encloses(other) || other.encloses(&parent));
            }
        }
    }

    // A conforming mesh over the balanced tree.
    tree.create_nodes(2);
    let independent = tree.number_nodes();
    tree.create_mesh(2);
    assert_eq!(independent, tree.num_nodes());
    assert_eq!(tree.elem_ptr.len(), tree.num_elements() + 1);
    for row in tree.elem_ptr.windows(2) {
        let conn = &tree.elem_conn[row[0]..row[1]];
        assert_eq!(conn.len(), 8);
        for tag in conn {
            assert!((0..independent as i32).contains(tag));
        }
    }
}

#[test]
fn test_restriction_of_interpolation() {
    let fine = meshed(Octree::uniform_tree(2), 2);
    let coarse = meshed(Octree::uniform_tree(1), 2);

    let interpolation = fine.create_interpolation(&coarse);
    let restriction = coarse.create_restriction(&fine);
    assert_eq!(interpolation.num_rows(), fine.num_nodes());
    assert_eq!(restriction.num_rows(), coarse.num_nodes());

    for row in 0..interpolation.num_rows() {
        let sum: f64 = interpolation.row(row).1.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }
    for row in 0..restriction.num_rows() {
        let sum: f64 = restriction.row(row).1.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    // The composition R * P keeps unit row sums and concentrates the weight
    // on the diagonal away from the block boundary.
    for (row, coarse_node) in coarse.nodes().unwrap().iter().enumerate() {
        let mut composed: HashMap<i32, f64> = HashMap::new();
        let (fine_conn, fine_weights) = restriction.row(row);
        for (fine_node, wr) in fine_conn.iter().zip(fine_weights) {
            let (conn, weights) = interpolation.row(*fine_node as usize);
            for (c, w) in conn.iter().zip(weights) {
                *composed.entry(*c).or_insert(0.0) += wr * w;
            }
        }

        let sum: f64 = composed.values().sum();
        assert!((sum - 1.0).abs() < 1e-12);

        let interior = coarse_node.anchor.iter().all(|&a| a != 0 && a != HMAX);
        if interior {
            let diagonal = composed[&(row as i32)];
            for (c, w) in composed.iter() {
                assert!(*c == row as i32 || *w < diagonal);
            }
        }
    }
}

#[test]
fn test_order_three_operators() {
    let fine = meshed(Octree::uniform_tree(1), 3);
    let coarse = meshed(Octree::uniform_tree(0), 3);
    assert_eq!(fine.num_nodes(), 125);
    assert_eq!(coarse.num_nodes(), 27);

    let interpolation = fine.create_interpolation(&coarse);
    assert_eq!(interpolation.num_rows(), 125);
    for row in 0..interpolation.num_rows() {
        let (conn, weights) = interpolation.row(row);
        assert!(!conn.is_empty());
        let sum: f64 = weights.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    let restriction = coarse.create_restriction(&fine);
    assert_eq!(restriction.num_rows(), 27);
    for row in 0..restriction.num_rows() {
        let sum: f64 = restriction.row(row).1.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }
}

#[test]
fn test_tree_trait_surface() {
    let tree = meshed(Octree::uniform_tree(1), 2);

    assert_eq!(Tree::num_elements(&tree), 8);
    assert_eq!(Tree::num_nodes(&tree), 27);
    assert_eq!(Tree::order(&tree), 2);
    assert_eq!(Tree::get_elements(&tree).len(), 8);
    assert_eq!(Tree::get_nodes(&tree).unwrap().len(), 27);
}
