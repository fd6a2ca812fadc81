//! Domain types for Suitewait
//!
//! This module contains the core domain types:
//! - CheckSuiteStatus / CheckSuiteConclusion: closed enums with priority ranks
//! - CheckSuite: one suite record as reported by the listing endpoint
//! - Verdict / Evaluation: results of reducing a suite set

pub mod conclusion;
pub mod status;
pub mod suite;
pub mod verdict;

pub use conclusion::CheckSuiteConclusion;
pub use status::CheckSuiteStatus;
pub use suite::{CheckSuite, CheckSuiteList, RefTarget, SuiteApp, SuiteSnapshot};
pub use verdict::{Evaluation, Verdict};
