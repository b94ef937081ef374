use super::*;
use crate::agent::actions::{Action, Capability, ParamKind, ParamsBuilder};
use crate::agent::memory::MemoryEntry;
use async_trait::async_trait;
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;

struct Described {
    description: String,
}

#[async_trait]
impl Capability for Described {
    fn name(&self) -> &str {
        "described"
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters(&self) -> Value {
        ParamsBuilder::new().required("x", ParamKind::Integer).build()
    }

    async fn invoke(&self, _args: Value) -> anyhow::Result<Value> {
        Ok(Value::Null)
    }
}

fn action_with_description(description: &str) -> Action {
    Action::new(Arc::new(Described {
        description: description.to_string(),
    }))
}

#[test]
fn goals_become_one_system_message() {
    let goals = vec![
        Goal::new(1, "Persona", "You are a helpful assistant."),
        Goal::new(2, "Style", "Be brief."),
    ];
    let language = FunctionCallingLanguage::new();
    let prompt = language.construct_prompt(&[], &goals, &Memory::new());

    assert_eq!(prompt.messages.len(), 1);
    let system = &prompt.messages[0];
    assert_eq!(system.role, "system");

    let sep = format!("\n{}\n", "-".repeat(50));
    let expected = format!(
        "Persona:{sep}You are a helpful assistant.{sep}\n\nStyle:{sep}Be brief.{sep}"
    );
    assert_eq!(system.content, expected);
}

#[test]
fn memory_entries_map_to_roles() {
    let mut memory = Memory::new();
    memory.add(MemoryEntry::user("the task"));
    memory.add(MemoryEntry::assistant("a decision"));
    memory.add(MemoryEntry::environment(json!({"executed": true, "result": 8.0})));
    memory.add(MemoryEntry::system("note"));

    let language = FunctionCallingLanguage::new();
    let prompt = language.construct_prompt(&[], &[], &memory);

    // system goals message + one message per entry
    assert_eq!(prompt.messages.len(), 5);
    assert_eq!(prompt.messages[1].role, "user");
    assert_eq!(prompt.messages[1].content, "the task");
    assert_eq!(prompt.messages[2].role, "assistant");
    assert_eq!(prompt.messages[2].content, "a decision");
    // Structured content is serialized whole, entry tag included.
    assert_eq!(prompt.messages[3].role, "user");
    assert!(prompt.messages[3].content.contains("\"executed\": true"));
    assert!(prompt.messages[3].content.contains("\"type\": \"environment\""));
    // Non-assistant kinds all map to the user-facing role.
    assert_eq!(prompt.messages[4].role, "user");
}

#[test]
fn actions_become_tool_declarations() {
    let action = action_with_description("Does a thing");
    let language = FunctionCallingLanguage::new();
    let prompt = language.construct_prompt(&[action], &[], &Memory::new());

    assert_eq!(prompt.tools.len(), 1);
    let tool = &prompt.tools[0];
    assert_eq!(tool.name, "described");
    assert_eq!(tool.description, "Does a thing");
    assert_eq!(tool.parameters["properties"]["x"]["type"], "integer");
}

#[test]
fn long_descriptions_are_truncated() {
    let action = action_with_description(&"x".repeat(5000));
    let language = FunctionCallingLanguage::new();
    let prompt = language.construct_prompt(&[action], &[], &Memory::new());

    assert_eq!(prompt.tools[0].description.chars().count(), 1024);
}

#[test]
fn structured_response_decodes_to_call() {
    let language = FunctionCallingLanguage::new();
    let invocation = language.parse_response(r#"{"tool": "add", "args": {"a": 5, "b": 3}}"#);

    assert!(!invocation.is_fallback());
    let call = invocation.tool_call();
    assert_eq!(call.tool, "add");
    assert_eq!(call.args, json!({"a": 5, "b": 3}));
}

#[test]
fn extra_fields_are_tolerated() {
    let language = FunctionCallingLanguage::new();
    let invocation =
        language.parse_response(r#"{"tool": "add", "args": {}, "confidence": 0.9}"#);
    assert!(!invocation.is_fallback());
}

#[test]
fn prose_falls_back_to_terminate() {
    let language = FunctionCallingLanguage::new();
    let invocation = language.parse_response("I think the answer is 8.");

    assert!(invocation.is_fallback());
    let call = invocation.tool_call();
    assert_eq!(call.tool, "terminate");
    assert_eq!(call.args, json!({"message": "I think the answer is 8."}));
}

#[test]
fn missing_args_field_falls_back() {
    let language = FunctionCallingLanguage::new();
    let invocation = language.parse_response(r#"{"tool": "add"}"#);
    assert!(invocation.is_fallback());
}

#[test]
fn bare_json_scalar_falls_back() {
    let language = FunctionCallingLanguage::new();
    assert!(language.parse_response("42").is_fallback());
    assert!(language.parse_response("\"just a string\"").is_fallback());
}

#[test]
fn fallback_uses_configured_terminal_tool() {
    let language = FunctionCallingLanguage::with_terminal_tool("stop");
    let invocation = language.parse_response("done here");
    assert_eq!(invocation.tool_call().tool, "stop");
}

proptest! {
    /// Any input that does not decode as a structured invocation comes back
    /// as a terminate call carrying the input verbatim.
    #[test]
    fn fallback_preserves_raw_text(raw in ".*") {
        prop_assume!(serde_json::from_str::<RawInvocation>(&raw).is_err());

        let language = FunctionCallingLanguage::new();
        let invocation = language.parse_response(&raw);

        prop_assert!(invocation.is_fallback());
        let call = invocation.tool_call();
        prop_assert_eq!(call.tool.as_str(), "terminate");
        prop_assert_eq!(call.args["message"].as_str(), Some(raw.as_str()));
    }
}
