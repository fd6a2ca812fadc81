//! Configuration system for Suitewait.
//!
//! Two layers:
//! 1. Global config file (~/.config/suitewait/suitewait.yml or .suitewait.yml)
//! 2. Invocation inputs, normalised into wait options

use eyre::Result;
use std::path::PathBuf;

pub use self::global::{GitHubSettings, GlobalConfig, PollingSettings};
pub use self::inputs::{
    RunContext, WaitInputs, interval_from_seconds, normalize_app_slug, normalize_timeout_seconds,
    resolve_check_suite_id, split_repository,
};

mod global;
mod inputs;

/// Load configuration from the standard search paths.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. .suitewait.yml in current directory (project config)
/// 3. ~/.config/suitewait/suitewait.yml (user config)
/// 4. Default values
pub fn load_config(explicit_path: Option<&PathBuf>) -> Result<GlobalConfig> {
    let config = GlobalConfig::load(explicit_path)?;
    config.validate()?;
    Ok(config)
}
