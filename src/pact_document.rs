//! The pact document shape consumed by a surrounding driver — loading and
//! publishing pact files is a collaborator concern, not part of the core,
//! but the shape is needed by the interaction builder and by test
//! fixtures.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Participant {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    #[serde(rename = "providerStates", skip_serializing_if = "Vec::is_empty", default)]
    pub provider_states: Vec<ProviderState>,
    pub description: String,
    pub request: Value,
    pub response: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderState {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    #[serde(rename = "pact-specification")]
    pub pact_specification: PactSpecification,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PactSpecification {
    pub version: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Metadata {
            pact_specification: PactSpecification {
                version: "1.0.0".to_string(),
            },
        }
    }
}

/// `{provider, consumer, interactions, metadata}` — the full pact
/// document a mock-service publishes and a provider verifier consumes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PactDocument {
    pub provider: Participant,
    pub consumer: Participant,
    pub interactions: Vec<Interaction>,
    pub metadata: Metadata,
}

impl PactDocument {
    pub fn new(provider: impl Into<String>, consumer: impl Into<String>) -> Self {
        PactDocument {
            provider: Participant { name: provider.into() },
            consumer: Participant { name: consumer.into() },
            interactions: Vec::new(),
            metadata: Metadata::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trips_through_json() {
        let doc = PactDocument {
            provider: Participant { name: "billing".into() },
            consumer: Participant { name: "web".into() },
            interactions: vec![Interaction {
                provider_states: vec![ProviderState { name: "an account exists".into() }],
                description: "get the account".into(),
                request: json!({"method": "GET", "path": "/account"}),
                response: json!({"status": 200, "body": {"id": 1}}),
            }],
            metadata: Metadata::default(),
        };
        let text = serde_json::to_string(&doc).unwrap();
        let back: PactDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(doc, back);
        assert_eq!(doc.metadata.pact_specification.version, "1.0.0");
    }
}
