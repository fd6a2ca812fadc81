//! Check suite conclusions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SuitewaitError;

/// Final outcome of a completed check suite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckSuiteConclusion {
    ActionRequired,
    Cancelled,
    TimedOut,
    StartupFailure,
    Failure,
    Neutral,
    Success,
    Skipped,
    Stale,
}

impl CheckSuiteConclusion {
    /// Every conclusion, highest priority first
    pub const ALL: [CheckSuiteConclusion; 9] = [
        Self::ActionRequired,
        Self::Cancelled,
        Self::TimedOut,
        Self::StartupFailure,
        Self::Failure,
        Self::Neutral,
        Self::Success,
        Self::Skipped,
        Self::Stale,
    ];

    /// Priority rank (0 is the highest priority)
    pub fn rank(self) -> u8 {
        match self {
            Self::ActionRequired => 0,
            Self::Cancelled => 1,
            Self::TimedOut => 2,
            Self::StartupFailure => 3,
            Self::Failure => 4,
            Self::Neutral => 5,
            Self::Success => 6,
            Self::Skipped => 7,
            Self::Stale => 8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ActionRequired => "action_required",
            Self::Cancelled => "cancelled",
            Self::TimedOut => "timed_out",
            Self::StartupFailure => "startup_failure",
            Self::Failure => "failure",
            Self::Neutral => "neutral",
            Self::Success => "success",
            Self::Skipped => "skipped",
            Self::Stale => "stale",
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    /// Parse a raw conclusion. Completed suites must carry one.
    pub fn parse(raw: Option<&str>) -> Result<Self, SuitewaitError> {
        match raw {
            Some(s) => s.parse(),
            None => Err(SuitewaitError::UnknownConclusion("null".to_string())),
        }
    }
}

impl FromStr for CheckSuiteConclusion {
    type Err = SuitewaitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|conclusion| conclusion.as_str() == s)
            .ok_or_else(|| SuitewaitError::UnknownConclusion(s.to_string()))
    }
}

impl fmt::Display for CheckSuiteConclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
