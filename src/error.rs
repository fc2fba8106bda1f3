use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("event not found: {0}")]
    #[diagnostic(code(caldialog::not_found))]
    NotFound(String),

    #[error("validation error: {0}")]
    #[diagnostic(code(caldialog::validation))]
    Validation(String),

    #[error("invalid session state: {0}")]
    #[diagnostic(code(caldialog::invalid_state))]
    InvalidState(String),

    #[error("persistence error: {0}")]
    #[diagnostic(code(caldialog::persistence))]
    Persistence(String),

    #[error("environment error: {0}")]
    #[diagnostic(code(caldialog::environment))]
    Environment(String),

    #[error("configuration error: {0}")]
    #[diagnostic(code(caldialog::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(caldialog::io))]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    #[diagnostic(code(caldialog::serialization))]
    Serialization(String),

    #[error("other error: {0}")]
    #[diagnostic(code(caldialog::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type CalResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create not-found errors
pub fn not_found_error(message: &str) -> Error {
    Error::NotFound(message.to_string())
}

/// Helper to create validation errors
pub fn validation_error(message: &str) -> Error {
    Error::Validation(message.to_string())
}

/// Helper to create invalid-state errors
pub fn invalid_state_error(message: &str) -> Error {
    Error::InvalidState(message.to_string())
}

/// Helper to create persistence errors
pub fn persistence_error(message: &str) -> Error {
    Error::Persistence(message.to_string())
}
