//! Feature modules, one directory per concern

pub mod correlate;
pub mod emit;
pub mod hover;
pub mod implementation;
pub mod moniker;
pub mod preload;
pub mod registry;
