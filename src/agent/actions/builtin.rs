use super::base::Capability;
use super::catalog::CapabilityCatalog;
use super::params::{ParamKind, ParamsBuilder};
use anyhow::Context;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;

/// Ends the run with a final message. The one capability every catalog
/// needs: without it the loop has no guaranteed termination path.
pub struct Terminate;

#[async_trait]
impl Capability for Terminate {
    fn name(&self) -> &str {
        "terminate"
    }

    fn description(&self) -> &str {
        "Terminate the agent with a message"
    }

    fn parameters(&self) -> Value {
        ParamsBuilder::new()
            .required("message", ParamKind::Text)
            .build()
    }

    fn terminal(&self) -> bool {
        true
    }

    fn tags(&self) -> Vec<String> {
        vec!["system".to_string()]
    }

    async fn invoke(&self, args: Value) -> anyhow::Result<Value> {
        let message = args["message"]
            .as_str()
            .context("terminate: 'message' must be a string")?;
        Ok(json!(format!("Agent terminated: {}", message)))
    }
}

/// Adds two numbers.
pub struct Add;

#[async_trait]
impl Capability for Add {
    fn name(&self) -> &str {
        "add"
    }

    fn description(&self) -> &str {
        "Calculate the sum of two numbers"
    }

    fn parameters(&self) -> Value {
        ParamsBuilder::new()
            .required("a", ParamKind::Float)
            .required("b", ParamKind::Float)
            .build()
    }

    fn tags(&self) -> Vec<String> {
        vec!["math".to_string()]
    }

    async fn invoke(&self, args: Value) -> anyhow::Result<Value> {
        let a = args["a"].as_f64().context("add: 'a' must be a number")?;
        let b = args["b"].as_f64().context("add: 'b' must be a number")?;
        Ok(json!(a + b))
    }
}

/// Returns canned information about a topic.
pub struct GetInfo;

#[async_trait]
impl Capability for GetInfo {
    fn name(&self) -> &str {
        "get_info"
    }

    fn description(&self) -> &str {
        "Get information about a topic"
    }

    fn parameters(&self) -> Value {
        ParamsBuilder::new()
            .required("topic", ParamKind::Text)
            .build()
    }

    fn tags(&self) -> Vec<String> {
        vec!["info".to_string()]
    }

    async fn invoke(&self, args: Value) -> anyhow::Result<Value> {
        let topic = args["topic"]
            .as_str()
            .context("get_info: 'topic' must be a string")?;
        Ok(json!(format!(
            "Information about {}: This is a sample information response.",
            topic
        )))
    }
}

/// Assemble the built-in capability catalog.
pub fn builtin_catalog() -> CapabilityCatalog {
    let mut catalog = CapabilityCatalog::new();
    catalog.register(Arc::new(Terminate));
    catalog.register(Arc::new(Add));
    catalog.register(Arc::new(GetInfo));
    catalog
}
