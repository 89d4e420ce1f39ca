//! Ascendant-time search and KP horary resolution.
//!
//! This crate provides:
//! - The ascendant as a function of time ([`AscendantFunction`])
//! - A bracket-and-bisect search for the moment the ascendant enters an
//!   arc ([`find_time`])
//! - Horary resolution: horary number → moment → chart ([`HoraryResolver`],
//!   [`resolve_horary`])
//! - A memo cache and a scoped-thread batch runner

pub mod ascendant;
pub mod ascendant_search;
pub mod ascendant_search_types;
pub mod batch;
pub mod cache;
pub mod chart;
pub mod error;
pub mod horary;
pub mod horary_types;

pub use ascendant::{AscendantFunction, EphemerisAscendant};
pub use ascendant_search::{MAX_COARSE_SAMPLES, find_time};
pub use ascendant_search_types::{AscendantSearchConfig, DegreeInterval, SearchResult, SearchWindow};
pub use batch::resolve_batch;
pub use cache::{CacheKey, ResolutionCache};
pub use chart::{HoraryChart, HouseEntry, PlanetEntry, build_chart};
pub use error::{ResolveError, ResolveStage, SearchError};
pub use horary::{HoraryResolver, resolve_horary};
pub use horary_types::{HoraryConfig, HoraryOutcome, HoraryResolution, SearchRequest};
