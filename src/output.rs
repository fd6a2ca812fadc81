//! Result sinks: step outputs and the unsuccessful-step policy

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::domain::Verdict;
use crate::error::Result;

/// Name of the step output carrying the verdict
pub const CONCLUSION_OUTPUT: &str = "conclusion";

/// Message used when an unsuccessful verdict fails the step
pub const UNSUCCESSFUL_MESSAGE: &str = "One or more of the check suites were unsuccessful.";

/// Append `name=value` to a GitHub Actions output file
pub fn append_output(path: &Path, name: &str, value: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}={}", name, value)?;
    Ok(())
}

/// Record the verdict as the `conclusion` output when an output file is given
pub fn publish_conclusion(output_file: Option<&Path>, verdict: &Verdict) -> Result<()> {
    match output_file {
        Some(path) => {
            append_output(path, CONCLUSION_OUTPUT, verdict.as_str())?;
            log::debug!("Wrote {}={} to {}", CONCLUSION_OUTPUT, verdict, path.display());
            Ok(())
        }
        None => Ok(()),
    }
}

/// Whether the verdict should fail the enclosing step
pub fn should_fail(verdict: &Verdict, fail_step_if_unsuccessful: bool) -> bool {
    fail_step_if_unsuccessful && !verdict.is_success()
}
