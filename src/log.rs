//! Injected logging sink for the comparator's non-fatal notices.
//!
//! The differ and rule decoder never own a logger directly; every caller
//! that needs visibility into "unrecognized matcher, falling back to
//! equality" or a swallowed normalizer exception passes one in. This keeps
//! the core free of module-global state.

use serde_json::Map;
use serde_json::Value;

/// Sink for diagnostic notices raised while decoding rules or normalizing
/// trees. Implementations are expected to be cheap to call; the comparator
/// never gates correctness on logging succeeding.
pub trait MatcherLog {
    /// An unrecognized rule descriptor fell back to `Equality`.
    fn unrecognized_matcher(&self, descriptor: &Map<String, Value>) {
        let _ = descriptor;
    }

    /// A normalizer field transform raised and was left unchanged.
    fn normalizer_swallowed(&self, field: &str, reason: &str) {
        let _ = field;
        let _ = reason;
    }
}

/// Forwards notices to the `tracing` crate. This is the default used
/// throughout the driver when no logger is supplied.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl MatcherLog for TracingLog {
    fn unrecognized_matcher(&self, descriptor: &Map<String, Value>) {
        tracing::debug!(?descriptor, "unrecognized matcher descriptor, defaulting to equality");
    }

    fn normalizer_swallowed(&self, field: &str, reason: &str) {
        tracing::warn!(field, reason, "normalizer transform failed, leaving field unchanged");
    }
}

/// Discards every notice. Useful for library consumers who don't want
/// `tracing` wired up, and for tests that assert on comparator output only.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLog;

impl MatcherLog for NullLog {}
