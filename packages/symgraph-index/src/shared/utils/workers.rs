//! Worker pool sizing
//!
//! The correlation stages are CPU-bound map lookups and formatting, so the
//! default pool is sized below the core count to leave room for the sink.

/// Cap a configured worker count by the number of schedulable units
///
/// Never more workers than units, floor 1.
pub fn stage_workers(workers: usize, unit_count: usize) -> usize {
    workers.clamp(1, unit_count.max(1))
}

/// Default pool size from detected hardware parallelism: 75% of cores,
/// floor 1
pub fn default_workers() -> usize {
    (num_cpus::get() * 3 / 4).max(1)
}
