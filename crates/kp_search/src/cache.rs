//! Caller-owned memoization of resolved requests.

use std::collections::HashMap;

use chrono::NaiveDate;
use kp_ephem::Ephemeris;
use kp_vedic_base::AyanamshaSystem;
use tracing::trace;

use crate::error::ResolveError;
use crate::horary::HoraryResolver;
use crate::horary_types::{HoraryResolution, SearchRequest};

/// Identity of a request; floats are compared by bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    horary_number: u32,
    date: NaiveDate,
    location: [u64; 3],
    utc_offset_seconds: i32,
    ayanamsha: AyanamshaSystem,
    window: Option<[u64; 2]>,
}

impl From<&SearchRequest> for CacheKey {
    fn from(r: &SearchRequest) -> Self {
        Self {
            horary_number: r.horary_number,
            date: r.date,
            location: r.location.key_bits(),
            utc_offset_seconds: r.utc_offset.local_minus_utc(),
            ayanamsha: r.ayanamsha,
            window: r
                .window
                .map(|w| [w.start_jd_ut.to_bits(), w.end_jd_ut.to_bits()]),
        }
    }
}

/// Results of earlier [`HoraryResolver::resolve`] calls.
///
/// Valid only for one resolver: entries do not record which table,
/// ephemeris or settings produced them. Failures are not cached.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: HashMap<CacheKey, HoraryResolution>,
    hits: u64,
    misses: u64,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_resolve<E: Ephemeris + ?Sized>(
        &mut self,
        resolver: &HoraryResolver<'_, E>,
        request: &SearchRequest,
    ) -> Result<&HoraryResolution, ResolveError> {
        let key = CacheKey::from(request);
        if self.entries.contains_key(&key) {
            self.hits += 1;
            trace!(horary = request.horary_number, "resolution cache hit");
        } else {
            self.misses += 1;
            let resolution = resolver.resolve(request)?;
            self.entries.insert(key, resolution);
        }
        Ok(&self.entries[&key])
    }

    pub fn get(&self, request: &SearchRequest) -> Option<&HoraryResolution> {
        self.entries.get(&CacheKey::from(request))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
