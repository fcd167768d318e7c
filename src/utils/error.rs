use thiserror::Error;

#[derive(Error, Debug)]
pub enum DebateError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Mailbox '{address}' is closed")]
    MailboxClosed { address: String },

    #[error("Debate was not dispatched after {attempts} attempts")]
    AttemptsExhausted { attempts: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DebateError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFound { .. } | Self::ApiError(_) | Self::AttemptsExhausted { .. } => {
                ErrorSeverity::Medium
            }
            Self::SerializationError(_) => ErrorSeverity::High,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::MailboxClosed { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "Check the candidate/job identifiers against the data source",
            Self::ApiError(_) => "Check that the data source endpoint is reachable and the API key is valid",
            Self::IoError(_) => "Check file paths and permissions",
            Self::SerializationError(_) => "Check that the fixture or response payload has the expected shape",
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Fix the configuration file or command-line flags",
            Self::MailboxClosed { .. } => "A debate task stopped unexpectedly; rerun with --verbose",
            Self::AttemptsExhausted { .. } => "Raise max_attempts or fix the data source",
        }
    }
}

pub type Result<T> = std::result::Result<T, DebateError>;
