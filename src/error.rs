use thiserror::Error;

/// Main error type for the advisor
#[derive(Error, Debug)]
pub enum LagError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The generation service cannot be reached at all. Aborts a whole plan.
    #[error("{0}")]
    Unavailable(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("A recovery plan is already being generated")]
    Busy,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, LagError>;

impl LagError {
    /// Whether this error ends plan generation instead of being healed with a fallback block
    pub fn aborts_plan(&self) -> bool {
        matches!(self, LagError::Unavailable(_))
    }

    /// Get the error code for structured output
    pub fn error_code(&self) -> &'static str {
        match self {
            LagError::Config(_) => "CONFIG_ERROR",
            LagError::InvalidInput(_) => "INVALID_INPUT",
            LagError::Unavailable(_) => "CAPABILITY_UNAVAILABLE",
            LagError::Generation(_) => "GENERATION_ERROR",
            LagError::Timeout(_) => "TIMEOUT_ERROR",
            LagError::Serialization(_) => "SERIALIZATION_ERROR",
            LagError::Busy => "GENERATION_IN_PROGRESS",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "aborts_plan": self.aborts_plan()
            }
        })
    }
}
