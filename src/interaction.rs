//! Fluent builder for one interaction record: `given` / `upon_receiving`
//! / `with_request` / `will_respond_with`.

use crate::pact_document::{Interaction, ProviderState};
use serde_json::{json, Value};

/// Builds one `{providerStates?, description, request, response}`
/// interaction record by chaining the four collaborator methods named in
/// the contract-testing DSL. The core never calls this type; it exists so
/// callers building pact documents have a typed way to do it.
#[derive(Debug, Default, Clone)]
pub struct InteractionBuilder {
    provider_states: Vec<ProviderState>,
    description: Option<String>,
    request: Option<Value>,
    response: Option<Value>,
}

impl InteractionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a provider state this interaction requires to be set up
    /// before replay.
    pub fn given(mut self, state: impl Into<String>) -> Self {
        self.provider_states.push(ProviderState { name: state.into() });
        self
    }

    pub fn upon_receiving(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_request(
        mut self,
        method: impl Into<String>,
        path: impl Into<String>,
        query: Option<&str>,
        headers: Option<Value>,
        body: Option<Value>,
    ) -> Self {
        self.request = Some(json!({
            "method": method.into(),
            "path": path.into(),
            "query": query.unwrap_or(""),
            "headers": headers.unwrap_or_else(|| json!({})),
            "body": body.unwrap_or(Value::Null),
        }));
        self
    }

    pub fn will_respond_with(mut self, status: u16, headers: Option<Value>, body: Option<Value>) -> Self {
        self.response = Some(json!({
            "status": status,
            "headers": headers.unwrap_or_else(|| json!({})),
            "body": body.unwrap_or(Value::Null),
        }));
        self
    }

    /// Finalizes the builder into an [`Interaction`] record.
    ///
    /// # Panics
    ///
    /// Panics if `upon_receiving`, `with_request`, or `will_respond_with`
    /// was never called — this mirrors the collaborator contract, which
    /// requires all three before an interaction can be added to a pact.
    pub fn build(self) -> Interaction {
        Interaction {
            provider_states: self.provider_states,
            description: self.description.expect("upon_receiving was never called"),
            request: self.request.expect("with_request was never called"),
            response: self.response.expect("will_respond_with was never called"),
        }
    }
}
