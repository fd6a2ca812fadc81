//! CLI argument definitions using clap.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use suitewait::config::{GlobalConfig, RunContext, WaitInputs};

/// Suitewait - wait for a commit's check suites to settle
#[derive(Parser, Debug)]
#[command(name = "suitewait")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Repository to check, as owner/repo
    #[arg(long)]
    pub repository: String,

    /// Commit SHA, branch or tag whose check suites are checked
    #[arg(long = "ref")]
    pub git_ref: String,

    /// GitHub token (falls back to the configured token env var)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Keep waiting while no check suite exists yet
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    pub wait_for_a_check_suite: bool,

    /// Seconds between polls (config default when omitted)
    #[arg(long)]
    pub interval_seconds: Option<f64>,

    /// Give up after this many seconds; zero or negative waits forever
    #[arg(long, allow_negative_numbers = true)]
    pub timeout_seconds: Option<f64>,

    /// Exit non-zero when the conclusion is not success
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    pub fail_step_if_unsuccessful: bool,

    /// Only consider check suites created by this app
    #[arg(long)]
    pub app_slug_filter: Option<String>,

    /// Only consider the first check suite created
    #[arg(long, action = ArgAction::Set, default_value_t = false)]
    pub only_first_check_suite: bool,

    /// Workflow run this invocation belongs to
    #[arg(long, env = "GITHUB_RUN_ID")]
    pub run_id: Option<u64>,

    /// Repository this invocation runs in, as owner/repo
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub current_repository: Option<String>,

    /// File to append step outputs to
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub output_file: Option<PathBuf>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Raw wait inputs, with config defaults filled in
    pub fn wait_inputs(&self, config: &GlobalConfig) -> WaitInputs {
        WaitInputs {
            repository: self.repository.clone(),
            git_ref: self.git_ref.clone(),
            wait_for_a_check_suite: self.wait_for_a_check_suite,
            interval_seconds: self.interval_seconds.unwrap_or(config.polling.interval_seconds),
            timeout_seconds: self.timeout_seconds.or(config.polling.timeout_seconds),
            app_slug_filter: self.app_slug_filter.clone(),
            only_first_check_suite: self.only_first_check_suite,
        }
    }

    pub fn run_context(&self) -> RunContext {
        RunContext {
            repository: self.current_repository.clone().filter(|r| !r.is_empty()),
            run_id: self.run_id,
        }
    }
}
