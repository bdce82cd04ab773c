//! Run orchestration

pub mod indexer;
pub mod runner;

pub use indexer::Indexer;
pub use runner::{build_pool, CountingProgress};
