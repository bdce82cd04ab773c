//! AST-proximity cache
//!
//! Build once, freeze, share read-only.

pub mod preloader;
pub mod ring;

pub use preloader::{FileProximity, PreloadRequest, ProximityCache};
pub use ring::DocRing;
