//! GitHub API layer
//!
//! This module provides:
//! - CheckSuiteSource / WorkflowRunSource port traits
//! - GitHubClient, the reqwest implementation
//! - MockGitHub, a scripted implementation for tests

pub mod client;
pub mod mock;
pub mod rest;

pub use client::{ApiResponse, CheckSuiteSource, EXPECTED_STATUS, WorkflowRunSource};
pub use mock::{MockGitHub, suite_json};
pub use rest::{DEFAULT_API_URL, GitHubClient, GitHubConfig};
