//! Per-worker random sources.
//!
//! Rolls never share a generator: each worker owns one and passes it as
//! `&mut R`. Use [`rand::rng()`] for a thread-local generator, or
//! [`worker_rng`] for reproducible per-worker streams.

use rand_pcg::Pcg32;

/// Independent PCG stream for `worker`, reproducible from `seed`.
///
/// Distinct `worker` values select distinct streams, so workers seeded from
/// the same base never replay each other's rolls.
pub fn worker_rng(seed: u64, worker: u64) -> Pcg32 {
    Pcg32::new(seed, worker)
}
