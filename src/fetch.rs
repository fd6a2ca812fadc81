//! Status fetcher: one read of the check suites for a commit

use crate::domain::{CheckSuiteList, RefTarget};
use crate::error::{Result, SuitewaitError};
use crate::github::{CheckSuiteSource, EXPECTED_STATUS};

/// Fetch the current, unfiltered check suites for `target`.
///
/// Any status other than 200 fails the fetch; there is no retry here.
pub async fn fetch_check_suites(source: &dyn CheckSuiteSource, target: &RefTarget) -> Result<CheckSuiteList> {
    let response = source.list_suites_for_ref(target).await?;

    if !response.is_expected() {
        return Err(SuitewaitError::FetchFailed {
            owner: target.owner.clone(),
            repo: target.repo.clone(),
            git_ref: target.git_ref.clone(),
            expected: EXPECTED_STATUS,
            actual: response.status,
        });
    }

    serde_json::from_value(response.body).map_err(|e| {
        SuitewaitError::MalformedRecord(format!("check suite listing for {} did not decode: {}", target, e))
    })
}
