use crate::agent::actions::Action;
use crate::agent::goals::Goal;
use crate::agent::memory::{Memory, MemoryKind};
use crate::providers::base::{Message, Prompt, ToolDefinition};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use tracing::debug;

/// Maximum tool description length surfaced to the model (host limit).
const MAX_DESCRIPTION_CHARS: usize = 1024;

/// Tool name used for fallback invocations when the model answers in prose.
const DEFAULT_TERMINAL_TOOL: &str = "terminate";

/// A decoded `{tool, args}` request extracted from model output.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub tool: String,
    pub args: Value,
}

/// Result of decoding raw model text: either a well-formed invocation, or
/// freeform output coerced into a terminate call carrying the raw text.
/// Decoding never fails — unparseable output degrades to graceful
/// termination instead of a loop error.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    Call(ToolCall),
    Fallback(ToolCall),
}

impl Invocation {
    pub fn tool_call(&self) -> &ToolCall {
        match self {
            Invocation::Call(call) | Invocation::Fallback(call) => call,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Invocation::Fallback(_))
    }
}

/// Prompt codec: encodes (goals, memory, actions) into a [`Prompt`] and
/// decodes raw model text into an [`Invocation`].
///
/// Alternative strategies are independent implementations of this trait —
/// they share no state.
pub trait AgentLanguage: Send + Sync {
    fn construct_prompt(&self, actions: &[Action], goals: &[Goal], memory: &Memory) -> Prompt;

    fn parse_response(&self, raw: &str) -> Invocation;
}

/// A structured decode requires both fields; anything else falls back.
#[derive(Debug, Deserialize)]
struct RawInvocation {
    tool: String,
    args: Value,
}

/// Function-calling strategy: goals become one system message, memory
/// entries become role-tagged messages, actions become tool declarations.
pub struct FunctionCallingLanguage {
    terminal_tool: String,
}

impl FunctionCallingLanguage {
    pub fn new() -> Self {
        Self {
            terminal_tool: DEFAULT_TERMINAL_TOOL.to_string(),
        }
    }

    /// Use a different tool name for fallback terminate invocations.
    pub fn with_terminal_tool(terminal_tool: impl Into<String>) -> Self {
        Self {
            terminal_tool: terminal_tool.into(),
        }
    }

    fn format_goals(goals: &[Goal]) -> Message {
        let sep = format!("\n{}\n", "-".repeat(50));
        let instructions = goals
            .iter()
            .map(|goal| format!("{}:{}{}{}", goal.name, sep, goal.description, sep))
            .collect::<Vec<_>>()
            .join("\n\n");
        Message::system(instructions)
    }

    fn format_memory(memory: &Memory) -> Vec<Message> {
        memory
            .entries(None)
            .iter()
            .map(|entry| {
                // Entries without literal text (structured environment
                // results) are serialized whole.
                let content = entry.text().map_or_else(
                    || serde_json::to_string_pretty(entry).unwrap_or_default(),
                    ToString::to_string,
                );
                match entry.kind {
                    MemoryKind::Assistant => Message::assistant(content),
                    _ => Message::user(content),
                }
            })
            .collect()
    }

    fn format_actions(actions: &[Action]) -> Vec<ToolDefinition> {
        actions
            .iter()
            .map(|action| ToolDefinition {
                name: action.name().to_string(),
                description: action.description().chars().take(MAX_DESCRIPTION_CHARS).collect(),
                parameters: action.parameters(),
            })
            .collect()
    }
}

impl Default for FunctionCallingLanguage {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentLanguage for FunctionCallingLanguage {
    fn construct_prompt(&self, actions: &[Action], goals: &[Goal], memory: &Memory) -> Prompt {
        let mut messages = vec![Self::format_goals(goals)];
        messages.extend(Self::format_memory(memory));

        Prompt {
            messages,
            tools: Self::format_actions(actions),
            metadata: HashMap::new(),
        }
    }

    fn parse_response(&self, raw: &str) -> Invocation {
        match serde_json::from_str::<RawInvocation>(raw) {
            Ok(RawInvocation { tool, args }) => Invocation::Call(ToolCall { tool, args }),
            Err(_) => {
                debug!("unstructured model output, coercing to '{}'", self.terminal_tool);
                Invocation::Fallback(ToolCall {
                    tool: self.terminal_tool.clone(),
                    args: json!({"message": raw}),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests;
