use thiserror::Error;

/// Typed error hierarchy for oxiagent.
///
/// Use at module boundaries (registry setup, config validation, provider
/// calls). Internal/leaf functions can continue using `anyhow::Result` — the
/// `Internal` variant allows seamless conversion via the `?` operator.
#[derive(Debug, Error)]
pub enum OxiagentError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Setup error: {0}")]
    Setup(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience alias for results using OxiagentError.
pub type OxiagentResult<T> = std::result::Result<T, OxiagentError>;

impl OxiagentError {
    /// Whether this error must be fixed before a run can start, as opposed
    /// to a failure that surfaced mid-run.
    pub fn is_setup(&self) -> bool {
        matches!(self, OxiagentError::Config(_) | OxiagentError::Setup(_))
    }
}
