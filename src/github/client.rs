//! Port traits for the GitHub REST capabilities the waiter consumes

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::RefTarget;
use crate::error::Result;

/// Status code the callers require from every call
pub const EXPECTED_STATUS: u16 = 200;

/// Raw response from the API: the HTTP status plus the decoded JSON body.
///
/// Non-success statuses are returned, not raised; deciding what a status
/// means is up to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(EXPECTED_STATUS, body)
    }

    pub fn is_expected(&self) -> bool {
        self.status == EXPECTED_STATUS
    }
}

/// Lists the check suites attached to a commit
#[async_trait]
pub trait CheckSuiteSource: Send + Sync {
    async fn list_suites_for_ref(&self, target: &RefTarget) -> Result<ApiResponse>;
}

/// Looks up a workflow run, used to find the run's own check suite
#[async_trait]
pub trait WorkflowRunSource: Send + Sync {
    async fn get_workflow_run(&self, owner: &str, repo: &str, run_id: u64) -> Result<ApiResponse>;
}
