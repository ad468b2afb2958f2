use thiserror::Error;

/// Errors that can occur when confirming edits in the node configuration editor.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Invalid JSON in {field}: {message}")]
    InvalidJson { field: String, message: String },

    #[error("Parameter '{name}' is invalid: {message}")]
    InvalidParam { name: String, message: String },
}

/// Errors reported by a document store implementation.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("Workflow '{0}' was not found")]
    NotFound(String),

    #[error("Document store failure: {0}")]
    Internal(String),
}

/// Errors returned by an execution backend for run and transpile requests.
///
/// Backend messages travel to the user unchanged, so implementations should
/// phrase them as complete, user-facing sentences.
#[derive(Error, Debug, Clone)]
pub enum BackendError {
    #[error("{0}")]
    Unsupported(String),

    #[error("{0}")]
    Failed(String),
}

/// Umbrella error for workbench operations, wrapping every collaborator failure.
#[derive(Error, Debug, Clone)]
pub enum WorkbenchError {
    #[error("A save, run, or transpile request is already in flight")]
    Busy,

    #[error("No workflow document is currently open")]
    NoDocument,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}
