//! Highest-priority folds over a suite set
//!
//! Both folds parse every member first, so a single unknown value fails the
//! whole fold. Callers never pass an empty set.

use crate::domain::{CheckSuite, CheckSuiteConclusion, CheckSuiteStatus};
use crate::error::{Result, SuitewaitError};

/// Highest-priority status across `suites`
pub fn highest_priority_status(suites: &[CheckSuite]) -> Result<CheckSuiteStatus> {
    let statuses = suites
        .iter()
        .map(|suite| CheckSuiteStatus::parse(suite.status.as_deref()))
        .collect::<Result<Vec<_>>>()?;

    statuses
        .into_iter()
        .min_by_key(|status| status.rank())
        .ok_or(SuitewaitError::UnreachableFilterState)
}

/// Highest-priority conclusion across `suites`
pub fn highest_priority_conclusion(suites: &[CheckSuite]) -> Result<CheckSuiteConclusion> {
    let conclusions = suites
        .iter()
        .map(|suite| CheckSuiteConclusion::parse(suite.conclusion.as_deref()))
        .collect::<Result<Vec<_>>>()?;

    conclusions
        .into_iter()
        .min_by_key(|conclusion| conclusion.rank())
        .ok_or(SuitewaitError::UnreachableFilterState)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_status(status: &str) -> CheckSuite {
        CheckSuite {
            id: 1,
            app: None,
            status: Some(status.to_string()),
            conclusion: None,
            created_at: None,
        }
    }

    fn with_conclusion(conclusion: &str) -> CheckSuite {
        CheckSuite {
            conclusion: Some(conclusion.to_string()),
            ..with_status("completed")
        }
    }

    fn statuses(raw: &[&str]) -> Vec<CheckSuite> {
        raw.iter().map(|s| with_status(s)).collect()
    }

    fn conclusions(raw: &[&str]) -> Vec<CheckSuite> {
        raw.iter().map(|c| with_conclusion(c)).collect()
    }

    #[test]
    fn test_in_progress_beats_completed() {
        let status = highest_priority_status(&statuses(&["completed", "in_progress"])).unwrap();
        assert_eq!(status, CheckSuiteStatus::InProgress);
    }

    #[test]
    fn test_all_completed_is_completed() {
        let status = highest_priority_status(&statuses(&["completed", "completed"])).unwrap();
        assert_eq!(status, CheckSuiteStatus::Completed);
    }

    #[test]
    fn test_queued_beats_everything() {
        let status = highest_priority_status(&statuses(&[
            "pending",
            "requested",
            "waiting",
            "completed",
            "in_progress",
            "queued",
        ]))
        .unwrap();
        assert_eq!(status, CheckSuiteStatus::Queued);
    }

    #[test]
    fn test_completed_beats_waiting() {
        let status = highest_priority_status(&statuses(&["waiting", "completed"])).unwrap();
        assert_eq!(status, CheckSuiteStatus::Completed);
    }

    #[test]
    fn test_lone_waiting_stays_waiting() {
        let status = highest_priority_status(&statuses(&["waiting"])).unwrap();
        assert_eq!(status, CheckSuiteStatus::Waiting);
    }

    #[test]
    fn test_unknown_status_fails_whole_fold() {
        let err = highest_priority_status(&statuses(&["queued", "sleeping"])).unwrap_err();
        assert!(matches!(err, SuitewaitError::UnknownStatus(s) if s == "sleeping"));
    }

    #[test]
    fn test_all_success_is_success() {
        let c = highest_priority_conclusion(&conclusions(&["success", "success", "success"])).unwrap();
        assert_eq!(c, CheckSuiteConclusion::Success);
    }

    #[test]
    fn test_single_failure_wins_over_success() {
        let c = highest_priority_conclusion(&conclusions(&["success", "failure", "success"])).unwrap();
        assert_eq!(c, CheckSuiteConclusion::Failure);
    }

    #[test]
    fn test_cancelled_beats_success_but_loses_to_action_required() {
        let c = highest_priority_conclusion(&conclusions(&["success", "cancelled"])).unwrap();
        assert_eq!(c, CheckSuiteConclusion::Cancelled);

        let c = highest_priority_conclusion(&conclusions(&["success", "cancelled", "action_required"]))
            .unwrap();
        assert_eq!(c, CheckSuiteConclusion::ActionRequired);
    }

    #[test]
    fn test_success_beats_skipped_and_stale() {
        let c = highest_priority_conclusion(&conclusions(&["stale", "success", "skipped"])).unwrap();
        assert_eq!(c, CheckSuiteConclusion::Success);
    }

    #[test]
    fn test_all_skipped_is_skipped() {
        let c = highest_priority_conclusion(&conclusions(&["skipped", "skipped"])).unwrap();
        assert_eq!(c, CheckSuiteConclusion::Skipped);
    }

    #[test]
    fn test_null_conclusion_fails() {
        let err = highest_priority_conclusion(&[with_conclusion("success"), with_status("completed")])
            .unwrap_err();
        assert!(matches!(err, SuitewaitError::UnknownConclusion(_)));
    }

    #[test]
    fn test_fold_is_order_independent() {
        let forward = conclusions(&["neutral", "timed_out", "success"]);
        let mut backward = forward.clone();
        backward.reverse();
        assert_eq!(
            highest_priority_conclusion(&forward).unwrap(),
            highest_priority_conclusion(&backward).unwrap()
        );
    }
}
