use serde::{Deserialize, Serialize};

/// A named, prioritized instruction guiding the model's behavior for a run.
///
/// Goals are created once at setup and never mutated. Priority ordering is
/// advisory — the loop presents goals in the order given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub priority: i32,
    pub name: String,
    pub description: String,
}

impl Goal {
    pub fn new(priority: i32, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            priority,
            name: name.into(),
            description: description.into(),
        }
    }
}
