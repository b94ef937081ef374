// Shared test helpers — not all items used by every test binary.
#![allow(unused)]

use async_trait::async_trait;
use oxiagent::providers::base::{ModelClient, Prompt};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Scripted model client: plays back canned raw responses in order and
/// records every prompt it was given. Errors when the script runs dry,
/// which doubles as a transport-failure stand-in.
pub struct MockModelClient {
    responses: Mutex<VecDeque<String>>,
    pub calls: Arc<Mutex<Vec<Prompt>>>,
}

impl MockModelClient {
    pub fn with_responses(responses: &[&str]) -> Self {
        Self {
            responses: Mutex::new(responses.iter().map(ToString::to_string).collect()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl ModelClient for MockModelClient {
    async fn complete(&self, prompt: &Prompt) -> anyhow::Result<String> {
        self.calls.lock().unwrap().push(prompt.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("mock model transport failure"))
    }
}
