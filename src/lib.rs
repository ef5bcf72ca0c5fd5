//! Verification core for consumer-driven contract testing.
//!
//! Given an *actual* HTTP request or response and the *expected* one
//! declared by a contract, plus a set of matching rules keyed by
//! JSONPath-style selectors, this crate decides whether the actual
//! document satisfies the contract and, if not, produces a human-readable
//! structural diff.
//!
//! The comparator itself never performs I/O, never persists pact files,
//! and does not implement a general JSONPath evaluator — only the subset
//! needed to match the concrete paths its own walker builds. Everything
//! else (the mock-server client, the interaction builder, the provider
//! verifier's transport) is a collaborator the caller supplies.
//!
//! ```
//! # use pact_contract_core::compare_requests;
//! # use serde_json::json;
//! let actual = json!({"method": "get", "path": "/x", "query": "", "headers": {}, "body": {"id": 1}});
//! let expected = json!({"method": "GET", "path": "/x", "query": "", "headers": {}, "body": {"id": 1}});
//! let lines: Vec<String> = compare_requests(actual, expected).collect();
//! assert!(lines.is_empty());
//! ```

pub mod differ;
pub mod driver;
pub mod error;
pub mod interaction;
pub mod log;
pub mod matcher;
pub mod normalizer;
pub mod pact_document;
pub mod path;
pub mod provider_verifier;
pub mod reconstructor;
pub mod rule_table;
pub mod renderer;

pub use differ::{compare, DiffTree};
pub use driver::{
    compare_requests, compare_requests_detailed, compare_responses, compare_responses_detailed,
    ComparisonOutcome,
};
pub use error::{CompileError, CoreError};
pub use matcher::{Mismatch, ValueMatcher};
pub use path::PathMatcher;
pub use renderer::CompareOptions;
pub use rule_table::RuleTable;
