//! Replays a pact document's interactions against a live provider and
//! reports any that fail the response comparison.
//!
//! The core never owns the transport: callers supply a [`PactHttpClient`]
//! implementation and, optionally, scoped provider-state setup.

use crate::driver::compare_responses;
use crate::error::CoreError;
use crate::pact_document::{Interaction, PactDocument};
use serde_json::Value;

/// The transport collaborator: sends the interaction's expected request
/// and returns the actual response the provider produced.
pub trait PactHttpClient {
    fn send(&self, request: &Value) -> anyhow::Result<Value>;
}

/// Scoped provider-state setup: acquired before an interaction replays,
/// released (or rolled back) after. The default no-op implementation
/// suits providers with no stateful fixtures.
pub trait ProviderStateManager {
    fn set_up(&self, _state: &str) {}
    fn tear_down(&self, _state: &str) {}
}

/// A [`ProviderStateManager`] that does nothing, for providers with no
/// state to arrange.
pub struct NullStateManager;

impl ProviderStateManager for NullStateManager {}

/// Replays every interaction in `pact` against `client`, scoping
/// `states` around each one, and collects every interaction whose
/// response comparison produced a non-empty diff.
pub fn verify_pact(
    pact: &PactDocument,
    client: &dyn PactHttpClient,
    states: &dyn ProviderStateManager,
) -> Result<(), Vec<CoreError>> {
    let mut failures = Vec::new();

    for interaction in &pact.interactions {
        for state in &interaction.provider_states {
            states.set_up(&state.name);
        }

        let outcome = replay_one(interaction, client);
        for state in &interaction.provider_states {
            states.tear_down(&state.name);
        }

        if let Err(error) = outcome {
            failures.push(error);
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures)
    }
}

fn replay_one(interaction: &Interaction, client: &dyn PactHttpClient) -> Result<(), CoreError> {
    let actual_response = client
        .send(&interaction.request)
        .map_err(|source| CoreError::Transport {
            description: interaction.description.clone(),
            source,
        })?;

    let mismatches: Vec<String> =
        compare_responses(actual_response, interaction.response.clone()).collect();

    if mismatches.is_empty() {
        Ok(())
    } else {
        Err(CoreError::VerificationFailed {
            description: interaction.description.clone(),
            mismatches: mismatches.len(),
        })
    }
}
