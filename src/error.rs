use thiserror::Error;

/// Errors that can occur while running a prompt flow
#[derive(Error, Debug)]
pub enum FlowError {
    /// Caller-supplied input does not satisfy the flow's input contract.
    /// Surfaced before any model call is made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Transport failure talking to the model provider
    #[error("Model request failed: {0}")]
    ModelRequest(#[from] reqwest::Error),

    /// Provider returned a response the transport layer could not use
    /// (missing content field, non-success status body, etc.)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Model response could not be decoded into the declared output shape
    #[error("Response did not match the expected schema: {0}")]
    SchemaMismatch(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),
}

impl From<serde_json::Error> for FlowError {
    fn from(err: serde_json::Error) -> Self {
        FlowError::SchemaMismatch(err.to_string())
    }
}
