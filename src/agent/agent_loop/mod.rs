use crate::agent::actions::ActionRegistry;
use crate::agent::environment::Environment;
use crate::agent::goals::Goal;
use crate::agent::language::AgentLanguage;
use crate::agent::memory::{Memory, MemoryEntry};
use crate::providers::base::ModelClient;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default iteration cap for a run.
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

/// Why a run halted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// A terminal action was executed.
    TerminalAction,
    /// The decoded invocation named a tool absent from the registry.
    UnknownTool,
    /// The iteration cap was reached without a terminal invocation.
    IterationLimit,
}

/// Final state of a completed run.
#[derive(Debug)]
pub struct RunOutcome {
    pub memory: Memory,
    pub halt: HaltReason,
    pub iterations: usize,
}

/// Drives the goal-directed iteration loop: build a prompt from goals,
/// memory, and registered actions; obtain a decision from the model;
/// decode it; execute the action through the environment; record the
/// outcome; decide whether to continue.
///
/// One run is strictly sequential — every model call and every execution
/// is awaited to completion before the next step.
pub struct Agent {
    goals: Vec<Goal>,
    language: Arc<dyn AgentLanguage>,
    registry: ActionRegistry,
    environment: Environment,
    model: Arc<dyn ModelClient>,
    max_iterations: usize,
}

impl Agent {
    pub fn new(
        goals: Vec<Goal>,
        language: Arc<dyn AgentLanguage>,
        registry: ActionRegistry,
        model: Arc<dyn ModelClient>,
    ) -> Self {
        Self {
            goals,
            language,
            registry,
            environment: Environment::new(),
            model,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Run the loop until a terminal action, an unknown tool, or the
    /// iteration cap halts it.
    ///
    /// Transport failures from the model boundary propagate; everything
    /// else degrades into the returned memory. The seeded task plus two
    /// entries per completed iteration (the raw decision and the
    /// serialized execution result) make up the final log.
    pub async fn run(
        &self,
        task: &str,
        memory: Option<Memory>,
        max_iterations: Option<usize>,
    ) -> Result<RunOutcome> {
        let mut memory = memory.unwrap_or_default();
        memory.add(MemoryEntry::user(task));

        let cap = max_iterations.unwrap_or(self.max_iterations);
        let mut halt = HaltReason::IterationLimit;
        let mut iterations = 0;

        for iteration in 1..=cap {
            iterations = iteration;
            debug!("iteration {}/{}", iteration, cap);

            let prompt =
                self.language
                    .construct_prompt(&self.registry.get_actions(), &self.goals, &memory);

            let raw = self.model.complete(&prompt).await?;
            debug!("model decision: {}", raw);

            let invocation = self.language.parse_response(&raw);
            if invocation.is_fallback() {
                debug!("decision was freeform text, coerced to a terminate invocation");
            }
            let call = invocation.tool_call();

            let Some(action) = self.registry.get_action(&call.tool) else {
                warn!("no action registered for tool '{}', halting", call.tool);
                halt = HaltReason::UnknownTool;
                break;
            };

            let result = self.environment.execute_action(&action, call.args.clone()).await;

            memory.add(MemoryEntry::assistant(raw));
            memory.add(MemoryEntry::environment(serde_json::to_value(&result)?));

            if action.terminal() {
                info!("terminal action '{}' executed, halting", action.name());
                halt = HaltReason::TerminalAction;
                break;
            }
        }

        info!("run halted after {} iterations ({:?})", iterations, halt);
        Ok(RunOutcome {
            memory,
            halt,
            iterations,
        })
    }
}

#[cfg(test)]
mod tests;
