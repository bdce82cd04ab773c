//! Hover memoization

pub mod cache;
pub mod keys;

pub use cache::KeyedIdCache;
pub use keys::{package_key, symbol_key};
