use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// A named, invocable capability with a declared argument schema.
///
/// Errors from `invoke` propagate to the caller — isolation is the
/// [`Environment`](crate::agent::environment::Environment)'s job, not the
/// capability's.
#[async_trait]
pub trait Capability: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema for the arguments object.
    fn parameters(&self) -> Value;

    /// Whether invoking this capability ends the run.
    fn terminal(&self) -> bool {
        false
    }

    /// Tags used for filtered registry construction.
    fn tags(&self) -> Vec<String> {
        Vec::new()
    }

    async fn invoke(&self, args: Value) -> anyhow::Result<Value>;
}

/// An immutable action held by a registry: a cheap handle over a shared
/// capability, constructed once at registration time.
#[derive(Clone)]
pub struct Action {
    capability: Arc<dyn Capability>,
}

impl Action {
    pub fn new(capability: Arc<dyn Capability>) -> Self {
        Self { capability }
    }

    pub fn name(&self) -> &str {
        self.capability.name()
    }

    pub fn description(&self) -> &str {
        self.capability.description()
    }

    pub fn parameters(&self) -> Value {
        self.capability.parameters()
    }

    pub fn terminal(&self) -> bool {
        self.capability.terminal()
    }

    /// Invoke the underlying capability with the given arguments. Failures
    /// propagate untouched.
    pub async fn execute(&self, args: Value) -> anyhow::Result<Value> {
        self.capability.invoke(args).await
    }
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name())
            .field("terminal", &self.terminal())
            .finish()
    }
}
