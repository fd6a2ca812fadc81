//! Check suite lifecycle status
//!
//! Statuses carry an explicit rank; a lower rank means a higher priority when
//! several suites are reduced to one status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SuitewaitError;

/// Lifecycle stage reported for a check suite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckSuiteStatus {
    Queued,
    InProgress,
    Completed,
    Waiting,
    Requested,
    Pending,
}

impl CheckSuiteStatus {
    /// Every status, highest priority first
    pub const ALL: [CheckSuiteStatus; 6] = [
        Self::Queued,
        Self::InProgress,
        Self::Completed,
        Self::Waiting,
        Self::Requested,
        Self::Pending,
    ];

    /// Priority rank (0 is the highest priority)
    pub fn rank(self) -> u8 {
        match self {
            Self::Queued => 0,
            Self::InProgress => 1,
            Self::Completed => 2,
            Self::Waiting => 3,
            Self::Requested => 4,
            Self::Pending => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Waiting => "waiting",
            Self::Requested => "requested",
            Self::Pending => "pending",
        }
    }

    /// Only queued and in-progress suites are worth polling again
    pub fn is_actionable_pending(self) -> bool {
        matches!(self, Self::Queued | Self::InProgress)
    }

    /// Parse a raw status as reported by the API. A missing status is a
    /// contract violation just like an unknown one.
    pub fn parse(raw: Option<&str>) -> Result<Self, SuitewaitError> {
        match raw {
            Some(s) => s.parse(),
            None => Err(SuitewaitError::UnknownStatus("null".to_string())),
        }
    }
}

impl FromStr for CheckSuiteStatus {
    type Err = SuitewaitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| SuitewaitError::UnknownStatus(s.to_string()))
    }
}

impl fmt::Display for CheckSuiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_follow_priority_order() {
        let ranks: Vec<u8> = CheckSuiteStatus::ALL.iter().map(|s| s.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_parse_known_statuses() {
        for status in CheckSuiteStatus::ALL {
            assert_eq!(status.as_str().parse::<CheckSuiteStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_parse_unknown_status_fails() {
        let err = "exploded".parse::<CheckSuiteStatus>().unwrap_err();
        assert!(matches!(err, SuitewaitError::UnknownStatus(s) if s == "exploded"));
    }

    #[test]
    fn test_parse_missing_status_fails() {
        let err = CheckSuiteStatus::parse(None).unwrap_err();
        assert!(matches!(err, SuitewaitError::UnknownStatus(_)));
    }

    #[test]
    fn test_actionable_pending() {
        assert!(CheckSuiteStatus::Queued.is_actionable_pending());
        assert!(CheckSuiteStatus::InProgress.is_actionable_pending());
        assert!(!CheckSuiteStatus::Completed.is_actionable_pending());
        assert!(!CheckSuiteStatus::Waiting.is_actionable_pending());
        assert!(!CheckSuiteStatus::Requested.is_actionable_pending());
        assert!(!CheckSuiteStatus::Pending.is_actionable_pending());
    }

    #[test]
    fn test_serializes_snake_case() {
        let json = serde_json::to_string(&CheckSuiteStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
