use serde_json::{Map, Value, json};

/// Declared value kind for a capability parameter.
///
/// Kinds map onto JSON Schema primitives through a fixed table; anything
/// outside the table is presented to the model as a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Text,
    Integer,
    Float,
    Bool,
    Sequence,
    Mapping,
    Unknown,
}

impl ParamKind {
    pub fn json_type(self) -> &'static str {
        match self {
            ParamKind::Text | ParamKind::Unknown => "string",
            ParamKind::Integer => "integer",
            ParamKind::Float => "number",
            ParamKind::Bool => "boolean",
            ParamKind::Sequence => "array",
            ParamKind::Mapping => "object",
        }
    }
}

/// Builder for the JSON-schema-shaped parameters object declared at
/// capability registration time.
///
/// A parameter is required iff it has no default on the capability side:
/// declare those with [`required`](Self::required), the rest with
/// [`optional`](Self::optional).
#[derive(Debug, Default)]
pub struct ParamsBuilder {
    properties: Map<String, Value>,
    required: Vec<String>,
}

impl ParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, name: &str, kind: ParamKind) -> Self {
        self.properties
            .insert(name.to_string(), json!({"type": kind.json_type()}));
        self.required.push(name.to_string());
        self
    }

    pub fn optional(mut self, name: &str, kind: ParamKind) -> Self {
        self.properties
            .insert(name.to_string(), json!({"type": kind.json_type()}));
        self
    }

    pub fn build(self) -> Value {
        json!({
            "type": "object",
            "properties": Value::Object(self.properties),
            "required": self.required,
        })
    }
}
