//
// Mappers of loosely typed server responses into typed shapes:
//

/// Lenient JSON accessors
pub mod json;

/// Ping job shape
pub mod ping;

/// Metric groups shape
pub mod metrics;

/// Priority-ordered shape normalizer
pub mod normalizer;

/// Per-check detail extractors
pub mod details;
