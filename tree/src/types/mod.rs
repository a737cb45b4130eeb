//! # Type declaration
pub mod array;
pub mod hash;
pub mod octant;
pub mod operator;
pub mod queue;
pub mod tree;
pub mod weights;
