//! Progress reporting port
//!
//! Optional; every method defaults to a no-op so an absent reporter is
//! always safe. The pipeline calls `started`/`finished` once per stage and
//! `advanced` once per completed unit of work.

pub trait ProgressReporter: Send + Sync {
    fn started(&self, _name: &str) {}

    fn advanced(&self, _count: u64) {}

    fn finished(&self, _name: &str) {}
}

/// The absent reporter
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressReporter for NullProgress {}
