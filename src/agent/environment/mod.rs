use crate::agent::actions::Action;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Outcome of one action execution, as stored into memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub executed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ExecutionResult {
    pub fn success(result: Value) -> Self {
        Self {
            executed: true,
            result: Some(result),
            error: None,
            trace: None,
            timestamp: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }

    pub fn failure(error: &anyhow::Error) -> Self {
        let trace = error
            .chain()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\ncaused by: ");
        Self {
            executed: false,
            result: None,
            error: Some(error.to_string()),
            trace: Some(trace),
            timestamp: None,
        }
    }
}

/// Isolation boundary between unreliable capability code and the
/// orchestration loop.
///
/// `execute_action` never fails outward: capability errors and panics are
/// converted into a structured failure result so the run can continue.
#[derive(Debug, Clone, Copy, Default)]
pub struct Environment;

impl Environment {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute_action(&self, action: &Action, args: Value) -> ExecutionResult {
        let name = action.name().to_string();
        debug!("executing action '{}' with args: {}", name, args);

        // The capability runs in a spawned task so that panics are caught
        // (via `JoinError::is_panic`) instead of tearing down the loop.
        let task_action = action.clone();
        let handle = tokio::task::spawn(async move { task_action.execute(args).await });

        match handle.await {
            Ok(Ok(result)) => ExecutionResult::success(result),
            Ok(Err(error)) => {
                warn!("action '{}' failed: {}", name, error);
                ExecutionResult::failure(&error)
            }
            Err(join_error) => {
                let message = if join_error.is_panic() {
                    // into_panic() consumes the JoinError so we must extract in one step.
                    let payload = join_error.into_panic();
                    let panic_message = payload
                        .downcast_ref::<String>()
                        .map(String::as_str)
                        .or_else(|| payload.downcast_ref::<&str>().copied())
                        .unwrap_or("unknown cause");
                    format!("action '{}' panicked: {}", name, panic_message)
                } else {
                    format!("action '{}' was cancelled", name)
                };
                warn!("{}", message);
                ExecutionResult::failure(&anyhow::anyhow!(message))
            }
        }
    }
}
