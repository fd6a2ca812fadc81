//! Suitewait - wait for the check suites of a commit to settle
//!
//! Suitewait polls the GitHub check-suites listing for one commit, filters the
//! suites, reduces them to a single conclusion by fixed priority, and keeps
//! polling on an interval (optionally bounded by a timeout) while they are
//! still queued or in progress.

pub mod config;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod github;
pub mod output;
pub mod reduce;
pub mod wait;

pub use error::{Result, SuitewaitError};
