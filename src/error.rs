//! Error types for Suitewait
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur while waiting on check suites
#[derive(Debug, Error)]
pub enum SuitewaitError {
    /// Listing check suites returned something other than 200
    #[error(
        "Failed to list check suites for {owner}/{repo}@{git_ref}. Expected response code {expected}, got {actual}."
    )]
    FetchFailed {
        owner: String,
        repo: String,
        git_ref: String,
        expected: u16,
        actual: u16,
    },

    /// Looking up the current workflow run returned something other than 200
    #[error(
        "Failed to get workflow run from {owner}/{repo} with workflow run ID {run_id}. Expected response code {expected}, got {actual}."
    )]
    WorkflowRunFailed {
        owner: String,
        repo: String,
        run_id: u64,
        expected: u16,
        actual: u16,
    },

    /// A record lacks a field in the shape the reduction needs
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Status string outside the known set
    #[error("Check suite status '{0}' can't be mapped to a known check suite status")]
    UnknownStatus(String),

    /// Conclusion string outside the known set
    #[error("Check suite conclusion '{0}' can't be mapped to a known check suite conclusion")]
    UnknownConclusion(String),

    /// Filtering emptied a non-empty set while no filter was active
    #[error("A Check Suite should exist, but it doesn't. Please submit an issue on this tool's repository.")]
    UnreachableFilterState,

    /// Configured timeout elapsed before a terminal result
    #[error("Timeout of {seconds} seconds reached.")]
    Timeout { seconds: f64 },

    /// Invalid invocation parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for SuitewaitError {
    fn from(err: reqwest::Error) -> Self {
        SuitewaitError::Http(err.to_string())
    }
}

/// Result type alias for Suitewait operations
pub type Result<T> = std::result::Result<T, SuitewaitError>;
