//! Graph emission

pub mod emitter;

pub use emitter::Emitter;
