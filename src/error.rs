use thiserror::Error;

/// Failures raised while compiling a JSONPath selector or decoding a rule
/// descriptor. These are construction-time failures, never part of a diff.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("invalid path segment in selector `{selector}`: bracket content `{segment}` is neither quoted nor an integer")]
    InvalidPathSegment { selector: String, segment: String },

    #[error("invalid range in matcher: min ({min}) is greater than max ({max})")]
    InvalidRange { min: u64, max: u64 },

    /// `regex::Error` doesn't implement `Eq` (and its `Clone`/`PartialEq`
    /// status isn't guaranteed across the pinned `regex` version range
    /// either), so the failure is rendered to a string at construction time
    /// instead of stored as the raw error.
    #[error("invalid regex pattern `{pattern}`: {message}")]
    InvalidRegex { pattern: String, message: String },
}

/// Top-level error type for collaborators layered on top of the comparator
/// core (pact document loading, provider verification).
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("malformed matching rule: {0}")]
    Compile(#[from] CompileError),

    #[error("provider verification failed for interaction `{description}`: {mismatches} mismatch(es)")]
    VerificationFailed {
        description: String,
        mismatches: usize,
    },

    #[error("transport error while replaying interaction `{description}`: {source}")]
    Transport {
        description: String,
        #[source]
        source: anyhow::Error,
    },
}
