//! Invocation inputs and their resolution into wait options.
//!
//! The run context (which repository and workflow run we are executing in)
//! is passed in explicitly rather than read from ambient state.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::domain::RefTarget;
use crate::error::{Result, SuitewaitError};
use crate::github::{EXPECTED_STATUS, WorkflowRunSource};
use crate::reduce::ReducePolicy;
use crate::wait::WaitOptions;

/// Where the tool itself is running, when inside a workflow run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunContext {
    /// `owner/repo` of the running workflow
    pub repository: Option<String>,
    pub run_id: Option<u64>,
}

/// Raw invocation inputs, before normalisation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitInputs {
    /// `owner/repo` whose commit is checked
    pub repository: String,
    pub git_ref: String,
    pub wait_for_a_check_suite: bool,
    pub interval_seconds: f64,
    pub timeout_seconds: Option<f64>,
    pub app_slug_filter: Option<String>,
    pub only_first_check_suite: bool,
}

impl WaitInputs {
    /// Normalise inputs and look up the run's own check suite
    pub async fn resolve(self, runs: &dyn WorkflowRunSource, context: &RunContext) -> Result<WaitOptions> {
        let (owner, repo) = split_repository(&self.repository)?;
        if self.git_ref.trim().is_empty() {
            return Err(SuitewaitError::InvalidInput("ref must not be empty".to_string()));
        }

        let interval = interval_from_seconds(self.interval_seconds)?;
        let timeout = normalize_timeout_seconds(self.timeout_seconds)?;
        let check_suite_id = resolve_check_suite_id(runs, context, &owner, &repo).await?;

        let policy = ReducePolicy {
            check_suite_id,
            wait_for_a_check_suite: self.wait_for_a_check_suite,
            app_slug_filter: normalize_app_slug(self.app_slug_filter),
            only_first_check_suite: self.only_first_check_suite,
        };
        log::debug!("Resolved policy: {:?}", policy);

        Ok(WaitOptions::new(RefTarget::new(owner, repo, self.git_ref), interval)
            .with_policy(policy)
            .with_timeout(timeout))
    }
}

/// Split `owner/repo`
pub fn split_repository(repository: &str) -> Result<(String, String)> {
    let mut parts = repository.split('/');
    match (parts.next(), parts.next()) {
        (Some(owner), Some(repo)) if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(SuitewaitError::InvalidInput(format!(
            "Invalid repository '{}'. Expected format {{owner}}/{{repo}}.",
            repository
        ))),
    }
}

/// Poll interval; must be positive and finite
pub fn interval_from_seconds(seconds: f64) -> Result<Duration> {
    if !(seconds.is_finite() && seconds > 0.0) {
        return Err(SuitewaitError::InvalidInput(format!(
            "intervalSeconds must be a positive number, got {}",
            seconds
        )));
    }
    let interval = Duration::try_from_secs_f64(seconds)
        .map_err(|e| SuitewaitError::InvalidInput(format!("intervalSeconds {}: {}", seconds, e)))?;
    if Instant::now().checked_add(interval.saturating_mul(2)).is_none() {
        return Err(SuitewaitError::InvalidInput(format!(
            "intervalSeconds {} is too large to schedule",
            seconds
        )));
    }
    Ok(interval)
}

/// Absent, zero, negative and NaN all mean "no timeout"
pub fn normalize_timeout_seconds(seconds: Option<f64>) -> Result<Option<Duration>> {
    match seconds {
        Some(s) if s > 0.0 => Duration::try_from_secs_f64(s)
            .map(Some)
            .map_err(|e| SuitewaitError::InvalidInput(format!("timeoutSeconds {}: {}", s, e))),
        _ => Ok(None),
    }
}

/// An empty slug is the same as no filter
pub fn normalize_app_slug(slug: Option<String>) -> Option<String> {
    slug.filter(|s| !s.is_empty())
}

/// Find the check suite of the workflow run we are executing in.
///
/// Only meaningful when checking the repository we run in; otherwise there
/// is nothing of ours to exclude.
pub async fn resolve_check_suite_id(
    runs: &dyn WorkflowRunSource,
    context: &RunContext,
    owner: &str,
    repo: &str,
) -> Result<Option<u64>> {
    let Some(current) = context.repository.as_deref() else {
        log::debug!("No current repository known; not excluding any check suite");
        return Ok(None);
    };

    let (current_owner, current_repo) = split_repository(current)?;
    if current_owner != owner || current_repo != repo {
        return Ok(None);
    }

    let run_id = context.run_id.ok_or_else(|| {
        SuitewaitError::InvalidInput(
            "Expected a workflow run ID ($GITHUB_RUN_ID) when checking the current repository".to_string(),
        )
    })?;

    let response = runs.get_workflow_run(owner, repo, run_id).await?;
    if !response.is_expected() {
        return Err(SuitewaitError::WorkflowRunFailed {
            owner: owner.to_string(),
            repo: repo.to_string(),
            run_id,
            expected: EXPECTED_STATUS,
            actual: response.status,
        });
    }

    let url = response.body["check_suite_url"].as_str().ok_or_else(|| {
        SuitewaitError::MalformedRecord(format!(
            "workflow run {} has no 'check_suite_url'",
            run_id
        ))
    })?;

    let id = url
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse::<u64>().ok())
        .ok_or_else(|| {
            SuitewaitError::MalformedRecord(format!(
                "check_suite_url '{}' does not end in a check suite ID",
                url
            ))
        })?;

    log::debug!("Excluding this run's check suite {}", id);
    Ok(Some(id))
}
