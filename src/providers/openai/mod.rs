use crate::providers::base::{ModelClient, Prompt};
use crate::providers::provider_http_client;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

const API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI-compatible chat-completions client.
///
/// Encodes the prompt's messages and tool declarations; when the model
/// answers with tool calls, the first call is returned serialized as
/// `{"tool": ..., "args": ...}` so the language codec can decode it. No
/// retries — a transport failure propagates and aborts the run.
pub struct OpenAIClient {
    api_key: String,
    model: String,
    max_tokens: u32,
    base_url: String,
    client: Client,
}

impl OpenAIClient {
    pub fn new(api_key: String, model: String, max_tokens: u32) -> Self {
        Self::with_base_url(api_key, model, max_tokens, API_URL.to_string())
    }

    pub fn with_base_url(
        api_key: String,
        model: String,
        max_tokens: u32,
        base_url: String,
    ) -> Self {
        Self {
            api_key,
            model,
            max_tokens,
            base_url,
            client: provider_http_client(),
        }
    }

    fn parse_response(json: &Value) -> Result<String> {
        let message = json["choices"]
            .as_array()
            .and_then(|choices| choices.first())
            .map(|choice| &choice["message"])
            .context("no choices in model response")?;

        if let Some(tool_call) = message["tool_calls"].as_array().and_then(|calls| calls.first()) {
            let function = &tool_call["function"];
            let name = function["name"].as_str().unwrap_or("").to_string();
            let args: Value = function["arguments"]
                .as_str()
                .and_then(|raw| serde_json::from_str(raw).ok())
                .unwrap_or_else(|| json!({}));
            return serde_json::to_string(&json!({"tool": name, "args": args}))
                .context("failed to serialize tool call");
        }

        message["content"]
            .as_str()
            .map(ToString::to_string)
            .context("model response has neither content nor tool calls")
    }
}

#[async_trait]
impl ModelClient for OpenAIClient {
    async fn complete(&self, prompt: &Prompt) -> Result<String> {
        let messages: Vec<Value> = prompt
            .messages
            .iter()
            .map(|msg| json!({"role": msg.role, "content": msg.content}))
            .collect();

        let mut payload = json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": self.max_tokens,
        });

        if !prompt.tools.is_empty() {
            payload["tools"] = json!(
                prompt
                    .tools
                    .iter()
                    .map(|tool| json!({
                        "type": "function",
                        "function": {
                            "name": tool.name,
                            "description": tool.description,
                            "parameters": tool.parameters,
                        }
                    }))
                    .collect::<Vec<_>>()
            );
        }

        let resp = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .context("failed to send request to model API")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("model API returned {}: {}", status, body);
        }

        let body: Value = resp
            .json()
            .await
            .context("failed to decode model API response")?;
        Self::parse_response(&body)
    }
}
