//! Scripted in-memory GitHub for tests
//!
//! Responses are served in order; once the script runs out the last response
//! keeps being served.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::domain::RefTarget;
use crate::error::{Result, SuitewaitError};
use crate::github::client::{ApiResponse, CheckSuiteSource, WorkflowRunSource};

#[derive(Debug, Default)]
pub struct MockGitHub {
    suites: Mutex<VecDeque<ApiResponse>>,
    last_suites: Mutex<Option<ApiResponse>>,
    workflow_run: Option<ApiResponse>,
    list_calls: AtomicUsize,
    run_calls: AtomicUsize,
}

impl MockGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a listing response
    pub fn with_response(self, response: ApiResponse) -> Self {
        self.suites
            .lock()
            .expect("mock lock poisoned")
            .push_back(response);
        self
    }

    /// Queue a successful listing of the given suites
    pub fn with_suites(self, suites: Vec<Value>) -> Self {
        let body = json!({ "total_count": suites.len(), "check_suites": suites });
        self.with_response(ApiResponse::ok(body))
    }

    /// Queue a successful listing with no suites
    pub fn with_no_suites(self) -> Self {
        self.with_suites(vec![])
    }

    pub fn with_workflow_run(mut self, response: ApiResponse) -> Self {
        self.workflow_run = Some(response);
        self
    }

    /// Number of listing calls served so far
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn run_calls(&self) -> usize {
        self.run_calls.load(Ordering::SeqCst)
    }
}

/// Build a suite record the way the listing endpoint reports it
pub fn suite_json(
    id: u64,
    app_slug: Option<&str>,
    status: &str,
    conclusion: Option<&str>,
    created_at: &str,
) -> Value {
    json!({
        "id": id,
        "app": app_slug.map(|slug| json!({ "slug": slug })),
        "status": status,
        "conclusion": conclusion,
        "created_at": created_at,
    })
}

#[async_trait]
impl CheckSuiteSource for MockGitHub {
    async fn list_suites_for_ref(&self, _target: &RefTarget) -> Result<ApiResponse> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        let next = self.suites.lock().expect("mock lock poisoned").pop_front();
        let mut last = self.last_suites.lock().expect("mock lock poisoned");
        match next {
            Some(response) => {
                *last = Some(response.clone());
                Ok(response)
            }
            None => last
                .clone()
                .ok_or_else(|| SuitewaitError::Http("no mock response configured".to_string())),
        }
    }
}

#[async_trait]
impl WorkflowRunSource for MockGitHub {
    async fn get_workflow_run(&self, _owner: &str, _repo: &str, _run_id: u64) -> Result<ApiResponse> {
        self.run_calls.fetch_add(1, Ordering::SeqCst);
        self.workflow_run
            .clone()
            .ok_or_else(|| SuitewaitError::Http("no mock workflow run configured".to_string()))
    }
}
