pub mod actions;
pub mod agent_loop;
pub mod environment;
pub mod goals;
pub mod language;
pub mod memory;

pub use actions::{Action, ActionRegistry, Capability, CapabilityCatalog, RegistryFilter};
pub use agent_loop::{Agent, HaltReason, RunOutcome};
pub use environment::{Environment, ExecutionResult};
pub use goals::Goal;
pub use language::{AgentLanguage, FunctionCallingLanguage, Invocation, ToolCall};
pub use memory::{Memory, MemoryEntry, MemoryKind};
