//! Resolve many requests on scoped worker threads.

use std::panic;
use std::thread;

use kp_ephem::Ephemeris;
use tracing::debug;

use crate::error::ResolveError;
use crate::horary::HoraryResolver;
use crate::horary_types::{HoraryResolution, SearchRequest};

/// Resolve `requests` on up to `workers` threads.
///
/// Requests are split into contiguous chunks, one per worker, and the
/// results are returned in request order. Each request is independent:
/// one failure does not stop the others. `workers == 0` is treated as 1.
pub fn resolve_batch<E>(
    resolver: &HoraryResolver<'_, E>,
    requests: &[SearchRequest],
    workers: usize,
) -> Vec<Result<HoraryResolution, ResolveError>>
where
    E: Ephemeris + Sync + ?Sized,
{
    if requests.is_empty() {
        return Vec::new();
    }
    let workers = workers.clamp(1, requests.len());
    if workers == 1 {
        return requests.iter().map(|r| resolver.resolve(r)).collect();
    }

    let chunk_len = requests.len().div_ceil(workers);
    debug!(requests = requests.len(), workers, chunk_len, "resolving batch");

    thread::scope(|scope| {
        let handles: Vec<_> = requests
            .chunks(chunk_len)
            .map(|chunk| {
                scope.spawn(move || chunk.iter().map(|r| resolver.resolve(r)).collect::<Vec<_>>())
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap_or_else(|payload| panic::resume_unwind(payload)))
            .collect()
    })
}
