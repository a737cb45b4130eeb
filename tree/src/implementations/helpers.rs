//! Deterministic tree fixtures for tests and examples.
use itertools::Itertools;
use rand::prelude::*;
use rand::SeedableRng;

use crate::constants::{HMAX, MAX_LEVEL};
use crate::types::octant::Octant;
use crate::types::tree::{Octree, Refinement};

/// A graded tree: uniform at `depth`, with the first leaf split `extra` more
/// times. Every refinement targets the block corner, so the result stays 2:1
/// balanced by construction.
pub fn corner_refined_tree(depth: i32, extra: usize) -> Octree {
    let mut tree = Octree::uniform_tree(depth);
    for _ in 0..extra {
        let mut instructions = vec![Refinement::Keep; tree.num_elements()];
        instructions[0] = Refinement::Refine;
        tree.refine(&instructions, 0, MAX_LEVEL);
    }
    tree
}

/// A deliberately unbalanced tree: uniform at `depth`, then repeatedly split
/// the leaf touching the block center from below. After two extra rounds the
/// deepest leaves share the center corner with untouched coarse leaves.
pub fn center_refined_tree(depth: i32, extra: usize) -> Octree {
    let target = Octant::new([HMAX / 2 - 1, HMAX / 2 - 1, HMAX / 2 - 1], MAX_LEVEL);

    let mut tree = Octree::uniform_tree(depth);
    for _ in 0..extra {
        let index = tree
            .leaves()
            .iter()
            .position(|leaf| leaf.encloses(&target))
            .unwrap();
        let mut instructions = vec![Refinement::Keep; tree.num_elements()];
        instructions[index] = Refinement::Refine;
        tree.refine(&instructions, 0, MAX_LEVEL);
    }
    tree
}

/// A reproducible adaptive tree: starting uniform at depth 1, refine a
/// random third of the leaves and rebalance, `rounds` times.
pub fn random_refined_tree(seed: u64, rounds: usize) -> Octree {
    let mut range = StdRng::seed_from_u64(seed);
    let between = rand::distributions::Uniform::from(0.0_f64..1.0_f64);

    let mut tree = Octree::uniform_tree(1);
    for _ in 0..rounds {
        let instructions = (0..tree.num_elements())
            .map(|_| {
                if between.sample(&mut range) < 0.3 {
                    Refinement::Refine
                } else {
                    Refinement::Keep
                }
            })
            .collect_vec();
        tree.refine(&instructions, 0, MAX_LEVEL);
        tree.balance();
    }
    tree
}
