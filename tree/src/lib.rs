//! # Adaptive octree meshes for finite-element analysis
//!
//! Builds and maintains the adaptively refined octree inside one hexahedral
//! block of a block-structured domain. The block's parameter space is the
//! integer cube `[0, 2^30)^3`; leaf octants tile it, can be refined,
//! coarsened and 2:1 balanced, and carry a conforming nodal mesh of element
//! order 2 (trilinear) or 3 (triquadratic) together with the interpolation
//! and restriction operators between meshes of different granularity.
//!
//! Gluing blocks together, global node numbering and dependent-node
//! detection across block boundaries are the responsibility of a multi-block
//! layer programming against the traits in `octmesh-traits`.
//!
//! ## References
//! \[1\] Sundar, Hari, Rahul S. Sampath, and George Biros. "Bottom-up construction and 2: 1
//! balance refinement of linear octrees in parallel." SIAM Journal on Scientific Computing 30.5
//! (2008): 2675-2708.
//!
//! \[2\] Burstedde, Carsten, Lucas C. Wilcox, and Omar Ghattas. "p4est: Scalable algorithms
//! for parallel adaptive mesh refinement on forests of octrees." SIAM Journal on Scientific
//! Computing 33.3 (2011): 1103-1133.
//!
//! \[3\] Chan, T. "Closest-point problems simplified on the RAM", ACM-SIAM Symposium on Discrete
//! Algorithms (2002)
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

pub mod constants;
pub mod implementations;
pub mod types;
