//! Shared utilities

pub mod probe;
pub mod workers;

pub use probe::{PositionProbe, PositionSet};
pub use workers::{default_workers, stage_workers};
