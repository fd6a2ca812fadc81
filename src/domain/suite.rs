//! Check suite records as reported by the listing endpoint
//!
//! Records keep status and conclusion as raw strings. They are only mapped
//! onto the closed enums during reduction, so an unknown value fails there
//! instead of being dropped while decoding.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SuitewaitError};

/// The commit a wait is scoped to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefTarget {
    pub owner: String,
    pub repo: String,
    pub git_ref: String,
}

impl RefTarget {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, git_ref: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            git_ref: git_ref.into(),
        }
    }
}

impl fmt::Display for RefTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.repo, self.git_ref)
    }
}

/// Application that owns a check suite
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteApp {
    #[serde(default)]
    pub slug: Option<String>,
}

/// One check suite snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSuite {
    pub id: u64,

    #[serde(default)]
    pub app: Option<SuiteApp>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub conclusion: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,
}

impl CheckSuite {
    /// Slug of the owning app, if the API reported one
    pub fn app_slug(&self) -> Option<&str> {
        self.app.as_ref().and_then(|app| app.slug.as_deref())
    }

    /// Parsed creation time. Needed for first-created selection.
    pub fn created_at(&self) -> Result<DateTime<Utc>> {
        let raw = self.created_at.as_deref().ok_or_else(|| {
            SuitewaitError::MalformedRecord(format!(
                "check suite {} has no 'created_at' timestamp",
                self.id
            ))
        })?;
        DateTime::parse_from_rfc3339(raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| {
                SuitewaitError::MalformedRecord(format!(
                    "check suite {} has an unparseable 'created_at' '{}': {}",
                    self.id, raw, e
                ))
            })
    }

    pub fn snapshot(&self) -> SuiteSnapshot {
        SuiteSnapshot {
            id: self.id,
            app: SuiteApp {
                slug: self.app_slug().map(str::to_string),
            },
            status: self.status.clone(),
            conclusion: self.conclusion.clone(),
        }
    }
}

/// Body of the list-check-suites-for-ref response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSuiteList {
    pub total_count: u64,
    pub check_suites: Vec<CheckSuite>,
}

impl CheckSuiteList {
    pub fn new(check_suites: Vec<CheckSuite>) -> Self {
        Self {
            total_count: check_suites.len() as u64,
            check_suites,
        }
    }

    /// No suites, by either the count or the page itself
    pub fn is_empty(&self) -> bool {
        self.total_count == 0 || self.check_suites.is_empty()
    }
}

/// Diagnostic view of a suite, logged when the reduction is unsuccessful
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteSnapshot {
    pub id: u64,
    pub app: SuiteApp,
    pub status: Option<String>,
    pub conclusion: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suite(json: serde_json::Value) -> CheckSuite {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_decode_full_record() {
        let s = suite(serde_json::json!({
            "id": 7,
            "app": { "slug": "github-actions" },
            "status": "completed",
            "conclusion": "success",
            "created_at": "2020-01-01T00:00:00Z",
            "head_sha": "abc123"
        }));
        assert_eq!(s.id, 7);
        assert_eq!(s.app_slug(), Some("github-actions"));
        assert_eq!(s.status.as_deref(), Some("completed"));
    }

    #[test]
    fn test_decode_null_app_and_conclusion() {
        let s = suite(serde_json::json!({
            "id": 8,
            "app": null,
            "status": "queued",
            "conclusion": null
        }));
        assert_eq!(s.app_slug(), None);
        assert!(s.conclusion.is_none());
    }

    #[test]
    fn test_created_at_parses_rfc3339() {
        let s = suite(serde_json::json!({ "id": 1, "created_at": "2020-01-02T03:04:05Z" }));
        let ts = s.created_at().unwrap();
        assert_eq!(ts.to_rfc3339(), "2020-01-02T03:04:05+00:00");
    }

    #[test]
    fn test_created_at_missing_is_malformed() {
        let s = suite(serde_json::json!({ "id": 1 }));
        assert!(matches!(s.created_at(), Err(SuitewaitError::MalformedRecord(_))));
    }

    #[test]
    fn test_created_at_garbage_is_malformed() {
        let s = suite(serde_json::json!({ "id": 1, "created_at": "yesterday" }));
        assert!(matches!(s.created_at(), Err(SuitewaitError::MalformedRecord(_))));
    }

    #[test]
    fn test_list_is_empty_by_count_or_page() {
        assert!(CheckSuiteList::default().is_empty());

        let page_without_count = CheckSuiteList {
            total_count: 0,
            check_suites: vec![suite(serde_json::json!({ "id": 1 }))],
        };
        assert!(page_without_count.is_empty());

        let populated = CheckSuiteList::new(vec![suite(serde_json::json!({ "id": 1 }))]);
        assert!(!populated.is_empty());
    }

    #[test]
    fn test_snapshot_shape() {
        let s = suite(serde_json::json!({
            "id": 3,
            "status": "completed",
            "conclusion": "failure"
        }));
        let json = serde_json::to_value(s.snapshot()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "app": { "slug": null },
                "status": "completed",
                "conclusion": "failure"
            })
        );
    }

    #[test]
    fn test_ref_target_display() {
        let target = RefTarget::new("owner", "repo", "main");
        assert_eq!(target.to_string(), "owner/repo@main");
    }
}
