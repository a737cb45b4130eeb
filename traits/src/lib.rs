//! Trait interface for adaptively refined octree meshes.
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod tree;
