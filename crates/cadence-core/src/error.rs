//! Error types for the plan store and the execution flow.

use std::{path::PathBuf, time::Duration};

use thiserror::Error;

/// Error type for all plan store operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// A plan with the requested ID already exists
    #[error("A plan with ID '{id}' already exists. Use 'update' to modify existing plans.")]
    AlreadyExists { id: String },
    /// Plan not found for the given ID
    #[error("No plan found with ID: {id}")]
    NotFound { id: String },
    /// No ID was given and no plan is active
    #[error("No active plan. Please specify a plan ID or set an active plan.")]
    NoActivePlan,
    /// Item index outside `[0, len)`
    #[error("Invalid item index: {index}. Plan has {len} item(s).")]
    IndexOutOfRange { index: i64, len: usize },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> PlannerError {
        PlannerError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlannerError {
        PlannerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlannerError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a not-found error for the given plan ID.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Whether the error means the referenced plan does not exist.
    pub fn is_missing_plan(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NoActivePlan)
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlannerError::database(message).with_source(e))
    }
}

/// Failure reported by an executor while running an item.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The executor ran but reported failure
    #[error("{message}")]
    Failed { message: String },
    /// The executor did not finish within the configured timeout
    #[error("executor timed out after {}s", after.as_secs_f64())]
    TimedOut { after: Duration },
    /// The executor process could not be started
    #[error("failed to start executor: {source}")]
    Spawn { source: std::io::Error },
    /// I/O with the executor process failed
    #[error("executor I/O error: {source}")]
    Io { source: std::io::Error },
}

impl ExecutionError {
    /// Creates a generic failure with the given message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}

/// Failure reported by the drafting collaborator.
#[derive(Error, Debug)]
pub enum DraftError {
    /// The collaborator call itself failed
    #[error("drafting call failed: {message}")]
    Call { message: String },
    /// The collaborator answered with something that is not a structured payload
    #[error("drafting payload is malformed: {source}")]
    Malformed {
        #[from]
        source: serde_json::Error,
    },
    /// The payload parsed but cannot become a plan
    #[error("drafting payload is incomplete: {reason}")]
    Incomplete { reason: String },
}

/// Errors that abort an entire flow run before any item settles.
#[derive(Error, Debug)]
pub enum FlowError {
    /// The executor registry has no primary executor
    #[error("No primary executor available")]
    NoPrimaryExecutor,
    /// Creating the initial plan in the store failed
    #[error("Failed to create plan: {source}")]
    PlanCreation {
        #[source]
        source: PlannerError,
    },
    /// The target plan does not exist after drafting
    #[error("Plan creation failed. Plan ID {id} not found in the plan store.")]
    PlanMissing { id: String },
}

/// Result type alias for plan store operations
pub type Result<T> = std::result::Result<T, PlannerError>;
