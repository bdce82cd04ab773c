//! Cross-index symbol identifiers

pub mod generator;
pub mod paths;

pub use generator::{resolve_dependency, MonikerGenerator};
pub use paths::{qualified_path, strip_receiver};
