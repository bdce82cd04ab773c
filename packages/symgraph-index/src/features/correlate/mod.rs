//! Correlation engine and run state machine

pub mod engine;
pub mod state;

pub use engine::{CorrelationEngine, IndexStats};
pub use state::IndexState;
