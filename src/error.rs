use thiserror::Error;

/// Exit code reported when the runner itself failed before the child produced one
pub const RUNNER_FAILURE_CODE: i32 = -1;

/// Main error type for runecho
#[derive(Debug, Error)]
pub enum RunechoError {
    // Process-related errors
    #[error("Failed to spawn process '{program}': {source}")]
    SpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No {0} pipe available for process")]
    PipeError(&'static str),

    #[error("Failed to wait for process '{program}': {source}")]
    WaitError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Process '{program}' exited with code {code}")]
    Exited {
        program: String,
        code: i32,
        captured: Vec<String>,
    },

    // Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid configuration file: {0}")]
    InvalidConfig(String),

    #[error("Configuration validation failed: {0}")]
    ConfigValidationError(String),

    // Parse errors for user-facing enums
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    #[error("Invalid colour: {0}")]
    InvalidColour(String),

    // IO errors (automatically converted from std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RunechoError {
    /// Exit code associated with this error.
    ///
    /// A child that exited on its own reports its real code; every runner-side
    /// failure reports [`RUNNER_FAILURE_CODE`].
    pub fn exit_code(&self) -> i32 {
        match self {
            RunechoError::Exited { code, .. } => *code,
            _ => RUNNER_FAILURE_CODE,
        }
    }

    /// Stdout lines captured before the failure (empty unless the child ran)
    pub fn captured(&self) -> &[String] {
        match self {
            RunechoError::Exited { captured, .. } => captured,
            _ => &[],
        }
    }
}

/// Result type alias for runecho operations
pub type Result<T> = std::result::Result<T, RunechoError>;
