//! Results of evaluating a set of check suites

use std::fmt;

use serde::{Serialize, Serializer};

use super::conclusion::CheckSuiteConclusion;
use super::status::CheckSuiteStatus;

/// Terminal value of a wait
///
/// Normally a conclusion. A suite set whose highest-priority status is
/// `waiting`, `requested` or `pending` also settles immediately, carrying that
/// status as its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Concluded(CheckSuiteConclusion),
    Unsettled(CheckSuiteStatus),
}

impl Verdict {
    pub fn success() -> Self {
        Verdict::Concluded(CheckSuiteConclusion::Success)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Verdict::Concluded(c) if c.is_success())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Concluded(c) => c.as_str(),
            Verdict::Unsettled(s) => s.as_str(),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Outcome of one reduction pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// Keep polling; carries `queued` or `in_progress`
    Pending(CheckSuiteStatus),
    /// Stop polling with this value
    Resolved(Verdict),
}

impl Evaluation {
    pub fn success() -> Self {
        Evaluation::Resolved(Verdict::success())
    }

    /// Map a highest-priority status that is not `completed`
    pub fn from_open_status(status: CheckSuiteStatus) -> Self {
        if status.is_actionable_pending() {
            Evaluation::Pending(status)
        } else {
            Evaluation::Resolved(Verdict::Unsettled(status))
        }
    }

    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            Evaluation::Pending(_) => None,
            Evaluation::Resolved(v) => Some(*v),
        }
    }
}
