use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{LevelFilter, info};

mod cli;

use cli::Cli;
use suitewait::config::{GlobalConfig, load_config};
use suitewait::github::GitHubClient;
use suitewait::output::{UNSUCCESSFUL_MESSAGE, publish_conclusion, should_fail};
use suitewait::wait::wait_for_check_suites;

fn setup_logging(verbose: bool) {
    let default_level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}

/// Returns true when the step should be marked as failed
async fn run_application(cli: &Cli, config: &GlobalConfig) -> Result<bool> {
    info!("Starting application");

    let client = GitHubClient::new(config.github.client_config(cli.token.clone()))
        .context("Failed to create GitHub client")?;

    let options = cli
        .wait_inputs(config)
        .resolve(&client, &cli.run_context())
        .await?;

    let verdict = wait_for_check_suites(&client, &options).await?;

    let label = if verdict.is_success() {
        verdict.as_str().green()
    } else {
        verdict.as_str().red()
    };
    println!("Conclusion: {}", label);

    publish_conclusion(cli.output_file.as_deref(), &verdict).context("Failed to write step output")?;

    Ok(should_fail(&verdict, cli.fail_step_if_unsuccessful))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    setup_logging(cli.is_verbose());

    // Load configuration
    let config = load_config(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    let failed = run_application(&cli, &config).await?;
    if failed {
        eprintln!("{}", UNSUCCESSFUL_MESSAGE.red());
        std::process::exit(1);
    }

    Ok(())
}
