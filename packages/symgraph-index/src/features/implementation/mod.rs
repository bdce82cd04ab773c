//! Implementation-relation building

pub mod bitset;
pub mod solver;

pub use bitset::BitSet;
pub use solver::{solve, ImplementationEdge, ImplementationRelation};
