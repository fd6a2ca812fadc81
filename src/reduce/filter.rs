//! Suite filtering policy

use crate::domain::CheckSuite;
use crate::error::{Result, SuitewaitError};

/// Keep only suites owned by `app_slug`. Suites without an app never match.
pub fn filter_by_app_slug(suites: Vec<CheckSuite>, app_slug: Option<&str>) -> Vec<CheckSuite> {
    match app_slug {
        Some(slug) => suites
            .into_iter()
            .filter(|suite| suite.app_slug() == Some(slug))
            .collect(),
        None => suites,
    }
}

/// Drop the suite the current run reports into
pub fn exclude_self(suites: Vec<CheckSuite>, self_id: Option<u64>) -> Vec<CheckSuite> {
    match self_id {
        Some(id) => suites.into_iter().filter(|suite| suite.id != id).collect(),
        None => suites,
    }
}

/// The earliest-created suite. On equal timestamps the one seen first wins.
pub fn first_created(suites: &[CheckSuite]) -> Result<CheckSuite> {
    let mut earliest: Option<(&CheckSuite, chrono::DateTime<chrono::Utc>)> = None;

    for suite in suites {
        let created_at = suite.created_at()?;
        if earliest.is_none_or(|(_, best)| created_at < best) {
            earliest = Some((suite, created_at));
        }
    }

    earliest
        .map(|(suite, _)| suite.clone())
        .ok_or_else(|| SuitewaitError::MalformedRecord("no check suites to pick the first from".to_string()))
}

/// Explain why filtering left nothing behind.
///
/// With neither filter active an empty result is impossible, so that case
/// is an error rather than a message.
pub fn empty_after_filter_message(app_slug: Option<&str>, self_id: Option<u64>) -> Result<String> {
    match (app_slug, self_id) {
        (Some(slug), Some(_)) => Ok(format!(
            "No check suites (excluding this one) with the app slug '{}' exist for this commit.",
            slug
        )),
        (None, Some(_)) => Ok("No check suites (excluding this one) exist for this commit.".to_string()),
        (Some(slug), None) => Ok(format!(
            "No check suites with the app slug '{}' exist for this commit.",
            slug
        )),
        (None, None) => Err(SuitewaitError::UnreachableFilterState),
    }
}
