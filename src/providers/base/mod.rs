use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One role-tagged message in a prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".into(),
            content: content.into(),
        }
    }
}

/// Tool declaration surfaced to the model alongside the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema for the arguments object.
    pub parameters: Value,
}

/// A complete request to the model-call boundary. Rebuilt fresh every
/// iteration and never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prompt {
    pub messages: Vec<Message>,
    pub tools: Vec<ToolDefinition>,
    pub metadata: HashMap<String, Value>,
}

/// The boundary that turns a [`Prompt`] into raw decision text.
///
/// When tool declarations are present, the returned text may encode a
/// serialized `{tool, args}` object instead of prose — decoding that shape
/// is the language codec's job, not the boundary's. Transport failures
/// propagate to the caller.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(&self, prompt: &Prompt) -> anyhow::Result<String>;
}
