use super::*;
use crate::agent::actions::{ActionRegistry, RegistryFilter, builtin::builtin_catalog};
use crate::agent::language::FunctionCallingLanguage;
use crate::providers::base::Prompt;
use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Plays back scripted responses and records every prompt it receives.
struct ScriptedModel {
    responses: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<Prompt>>,
}

impl ScriptedModel {
    fn new(responses: &[&str]) -> Self {
        Self {
            responses: Mutex::new(responses.iter().map(ToString::to_string).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ModelClient for ScriptedModel {
    async fn complete(&self, prompt: &Prompt) -> anyhow::Result<String> {
        self.calls.lock().unwrap().push(prompt.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("scripted model ran out of responses"))
    }
}

fn test_agent(model: Arc<ScriptedModel>) -> Agent {
    let catalog = builtin_catalog();
    let mut registry = ActionRegistry::from_catalog(&catalog, &RegistryFilter::default());
    registry.register_terminal(&catalog).unwrap();

    Agent::new(
        vec![Goal::new(1, "Assistant", "Help with the task.")],
        Arc::new(FunctionCallingLanguage::new()),
        registry,
        model,
    )
}

#[tokio::test]
async fn freeform_output_terminates_via_fallback() {
    let model = Arc::new(ScriptedModel::new(&["The answer is 8."]));
    let agent = test_agent(model.clone());

    let outcome = agent.run("add 5 and 3", None, None).await.unwrap();

    assert_eq!(outcome.halt, HaltReason::TerminalAction);
    assert_eq!(outcome.iterations, 1);
    // seed + assistant + environment
    assert_eq!(outcome.memory.len(), 3);
    let env_entry = &outcome.memory.entries(None)[2];
    assert_eq!(env_entry.content["executed"], json!(true));
    assert_eq!(
        env_entry.content["result"],
        json!("Agent terminated: The answer is 8.")
    );
}

#[tokio::test]
async fn prompt_carries_goals_memory_and_tools() {
    let model = Arc::new(ScriptedModel::new(&[
        r#"{"tool": "add", "args": {"a": 1, "b": 2}}"#,
        r#"{"tool": "terminate", "args": {"message": "done"}}"#,
    ]));
    let agent = test_agent(model.clone());

    agent.run("a task", None, None).await.unwrap();

    let calls = model.calls.lock().unwrap();
    assert_eq!(calls.len(), 2);

    let first = &calls[0];
    assert_eq!(first.messages[0].role, "system");
    assert!(first.messages[0].content.contains("Help with the task."));
    assert_eq!(first.messages[1].content, "a task");
    let tool_names: Vec<&str> = first.tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tool_names, ["add", "get_info", "terminate"]);

    // The second prompt replays the first iteration's decision and result.
    let second = &calls[1];
    assert_eq!(second.messages.len(), 4);
    assert_eq!(second.messages[2].role, "assistant");
    assert!(second.messages[3].content.contains("\"executed\": true"));
}

#[tokio::test]
async fn existing_memory_is_extended_not_replaced() {
    let model = Arc::new(ScriptedModel::new(&[
        r#"{"tool": "terminate", "args": {"message": "bye"}}"#,
    ]));
    let agent = test_agent(model);

    let mut memory = Memory::new();
    memory.add(MemoryEntry::user("earlier question"));
    memory.add(MemoryEntry::assistant("earlier answer"));

    let outcome = agent.run("new task", Some(memory), None).await.unwrap();

    assert_eq!(outcome.memory.len(), 5);
    assert_eq!(outcome.memory.entries(None)[0].text(), Some("earlier question"));
    assert_eq!(outcome.memory.entries(None)[2].text(), Some("new task"));
}

#[tokio::test]
async fn per_run_cap_overrides_agent_default() {
    let model = Arc::new(ScriptedModel::new(&[
        r#"{"tool": "add", "args": {"a": 1, "b": 1}}"#,
        r#"{"tool": "add", "args": {"a": 2, "b": 2}}"#,
    ]));
    let agent = test_agent(model).with_max_iterations(10);

    let outcome = agent.run("keep adding", None, Some(2)).await.unwrap();

    assert_eq!(outcome.halt, HaltReason::IterationLimit);
    assert_eq!(outcome.iterations, 2);
    assert_eq!(outcome.memory.len(), 5);
}

#[tokio::test]
async fn transport_failure_propagates() {
    // No scripted responses: the first model call fails.
    let model = Arc::new(ScriptedModel::new(&[]));
    let agent = test_agent(model);

    let err = agent.run("task", None, None).await.unwrap_err();
    assert!(err.to_string().contains("ran out of responses"));
}
