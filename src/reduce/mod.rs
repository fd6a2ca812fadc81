//! Reducer: many check suites down to one evaluation
//!
//! The pipeline is:
//! 1. Empty listing short-circuits (pending or success)
//! 2. App-slug filter, then self-exclusion
//! 3. Empty-after-filter short-circuits the same way
//! 4. Optional first-created selection
//! 5. Highest-priority status; anything but `completed` returns here
//! 6. Highest-priority conclusion across the same set

pub mod filter;
pub mod priority;

use serde::{Deserialize, Serialize};

use crate::domain::{CheckSuiteList, CheckSuiteStatus, Evaluation, SuiteSnapshot, Verdict};
use crate::error::Result;

pub use filter::{empty_after_filter_message, exclude_self, filter_by_app_slug, first_created};
pub use priority::{highest_priority_conclusion, highest_priority_status};

/// Filtering and waiting policy applied on every reduction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReducePolicy {
    /// The current run's own check suite, never evaluated
    pub check_suite_id: Option<u64>,
    /// Treat "no suites yet" as pending instead of success
    pub wait_for_a_check_suite: bool,
    /// Only suites owned by this app count
    pub app_slug_filter: Option<String>,
    /// Only the earliest-created remaining suite counts
    pub only_first_check_suite: bool,
}

impl ReducePolicy {
    /// What an empty suite set evaluates to
    fn when_empty(&self, message: &str) -> Evaluation {
        if self.wait_for_a_check_suite {
            log::debug!("{} Waiting for one to show up.", message);
            Evaluation::Pending(CheckSuiteStatus::Queued)
        } else {
            log::info!("{}", message);
            Evaluation::success()
        }
    }
}

/// Reduce a listing to a single evaluation. Pure apart from logging.
pub fn reduce(list: CheckSuiteList, policy: &ReducePolicy) -> Result<Evaluation> {
    if list.is_empty() {
        return Ok(policy.when_empty("No check suites exist for this commit."));
    }

    let app_slug = policy.app_slug_filter.as_deref();
    let suites = filter_by_app_slug(list.check_suites, app_slug);
    let mut suites = exclude_self(suites, policy.check_suite_id);

    if suites.is_empty() {
        let message = empty_after_filter_message(app_slug, policy.check_suite_id)?;
        return Ok(policy.when_empty(&message));
    }

    if policy.only_first_check_suite {
        suites = vec![first_created(&suites)?];
    }

    let status = highest_priority_status(&suites)?;
    if status != CheckSuiteStatus::Completed {
        log::debug!(
            "Highest priority status across {} check suite(s) is '{}'",
            suites.len(),
            status
        );
        return Ok(Evaluation::from_open_status(status));
    }

    let conclusion = highest_priority_conclusion(&suites)?;
    if conclusion.is_success() {
        return Ok(Evaluation::success());
    }

    log::error!("One or more check suites were unsuccessful. Below is some metadata on the check suites.");
    let snapshots: Vec<SuiteSnapshot> = suites.iter().map(|suite| suite.snapshot()).collect();
    match serde_json::to_string(&snapshots) {
        Ok(json) => log::error!("{}", json),
        Err(e) => log::warn!("Failed to serialize check suite metadata: {}", e),
    }

    Ok(Evaluation::Resolved(Verdict::Concluded(conclusion)))
}
