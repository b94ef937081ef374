use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role of a memory entry in the run history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryKind {
    User,
    Assistant,
    Environment,
    System,
}

impl std::fmt::Display for MemoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MemoryKind::User => "user",
            MemoryKind::Assistant => "assistant",
            MemoryKind::Environment => "environment",
            MemoryKind::System => "system",
        };
        write!(f, "{}", label)
    }
}

/// One typed record in the run's ordered history log. Immutable once added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    #[serde(rename = "type")]
    pub kind: MemoryKind,
    pub content: Value,
}

impl MemoryEntry {
    pub fn new(kind: MemoryKind, content: Value) -> Self {
        Self { kind, content }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MemoryKind::User, Value::String(text.into()))
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(MemoryKind::Assistant, Value::String(text.into()))
    }

    pub fn environment(content: Value) -> Self {
        Self::new(MemoryKind::Environment, content)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(MemoryKind::System, Value::String(text.into()))
    }

    /// Literal text content, if this entry holds a plain string.
    pub fn text(&self) -> Option<&str> {
        self.content.as_str()
    }
}

/// Append-only ordered record of everything said or done during a run.
///
/// Insertion order is meaningful and preserved; entries are never mutated
/// or removed once added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    entries: Vec<MemoryEntry>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: MemoryEntry) {
        self.entries.push(entry);
    }

    /// The first `limit` entries (or all of them) in insertion order.
    pub fn entries(&self, limit: Option<usize>) -> &[MemoryEntry] {
        match limit {
            Some(n) => &self.entries[..n.min(self.entries.len())],
            None => &self.entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A new `Memory` containing all and only non-system entries, in the
    /// original order. `self` is unchanged.
    pub fn without_system_entries(&self) -> Memory {
        Memory {
            entries: self
                .entries
                .iter()
                .filter(|entry| entry.kind != MemoryKind::System)
                .cloned()
                .collect(),
        }
    }
}
