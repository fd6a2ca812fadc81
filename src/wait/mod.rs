//! Wait loop
//!
//! One immediate evaluation, then periodic re-evaluation on a fixed interval
//! until the suites resolve. An optional timeout races the polling; the
//! `select!` is the single settlement point, and whichever side loses is
//! dropped (cancelling its timer and any in-flight fetch) before the result
//! is returned.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::{Instant, MissedTickBehavior};

use crate::domain::{Evaluation, RefTarget, Verdict};
use crate::error::{Result, SuitewaitError};
use crate::fetch::fetch_check_suites;
use crate::github::CheckSuiteSource;
use crate::reduce::{ReducePolicy, reduce};

/// Everything one wait needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitOptions {
    pub target: RefTarget,
    pub policy: ReducePolicy,
    pub interval: Duration,
    /// `None` waits forever
    pub timeout: Option<Duration>,
}

impl WaitOptions {
    pub fn new(target: RefTarget, interval: Duration) -> Self {
        Self {
            target,
            policy: ReducePolicy::default(),
            interval,
            timeout: None,
        }
    }

    pub fn with_policy(mut self, policy: ReducePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the overall timeout. A zero duration means no timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout.filter(|t| !t.is_zero());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(SuitewaitError::InvalidInput(
                "interval must be greater than zero".to_string(),
            ));
        }
        // Two ticks out must still be a representable instant
        next_tick(Instant::now(), self.interval).and_then(|first| next_tick(first, self.interval))?;
        Ok(())
    }
}

fn next_tick(from: Instant, interval: Duration) -> Result<Instant> {
    from.checked_add(interval).ok_or_else(|| {
        SuitewaitError::InvalidInput(format!("interval of {:?} is too large to schedule", interval))
    })
}

/// Fetch once and reduce
pub async fn evaluate(source: &dyn CheckSuiteSource, options: &WaitOptions) -> Result<Evaluation> {
    let list = fetch_check_suites(source, &options.target).await?;
    reduce(list, &options.policy)
}

/// Wait until the check suites of `options.target` settle.
///
/// Resolves with a verdict (never a pending state) or fails with the first
/// fetch/reduction error, or with `Timeout`.
pub async fn wait_for_check_suites(source: &dyn CheckSuiteSource, options: &WaitOptions) -> Result<Verdict> {
    options.validate()?;

    if let Some(verdict) = evaluate(source, options).await?.verdict() {
        return Ok(verdict);
    }

    log::info!(
        "Waiting for check suites on {} (polling every {:?})",
        options.target,
        options.interval
    );

    let polling = poll_until_resolved(source, options);

    match options.timeout {
        Some(limit) => {
            tokio::select! {
                outcome = polling => outcome,
                _ = tokio::time::sleep(limit) => {
                    Err(SuitewaitError::Timeout { seconds: limit.as_secs_f64() })
                }
            }
        }
        None => polling.await,
    }
}

async fn poll_until_resolved(source: &dyn CheckSuiteSource, options: &WaitOptions) -> Result<Verdict> {
    let start = next_tick(Instant::now(), options.interval)?;
    let mut ticker = tokio::time::interval_at(start, options.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut ticks: u64 = 0;
    loop {
        ticker.tick().await;
        ticks += 1;

        match evaluate(source, options).await? {
            Evaluation::Resolved(verdict) => {
                log::debug!("Check suites resolved to '{}' after {} poll(s)", verdict, ticks);
                return Ok(verdict);
            }
            Evaluation::Pending(status) => {
                log::debug!("Check suites still '{}' after {} poll(s)", status, ticks);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CheckSuiteConclusion;
    use crate::github::{ApiResponse, MockGitHub, suite_json};
    use serde_json::json;

    const TICK: Duration = Duration::from_millis(10);

    fn options() -> WaitOptions {
        WaitOptions::new(RefTarget::new("owner", "repo", "ref"), TICK)
    }

    fn waiting_options() -> WaitOptions {
        options().with_policy(ReducePolicy {
            wait_for_a_check_suite: true,
            ..Default::default()
        })
    }

    fn suite(status: &str, conclusion: Option<&str>) -> serde_json::Value {
        suite_json(1, Some("actions"), status, conclusion, "2020-01-01T00:00:00Z")
    }

    #[tokio::test]
    async fn test_no_suites_without_waiting_is_success_without_polling() {
        let mock = MockGitHub::new().with_no_suites();
        let verdict = wait_for_check_suites(&mock, &options()).await.unwrap();
        assert_eq!(verdict, Verdict::success());
        assert_eq!(mock.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_terminal_first_result_skips_polling() {
        let mock = MockGitHub::new().with_suites(vec![suite("completed", Some("failure"))]);
        let verdict = wait_for_check_suites(&mock, &options()).await.unwrap();
        assert_eq!(verdict, Verdict::Concluded(CheckSuiteConclusion::Failure));
        assert_eq!(mock.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_no_suites_with_waiting_stays_pending() {
        let mock = MockGitHub::new().with_no_suites();
        let options = waiting_options();
        let result = tokio::time::timeout(
            Duration::from_millis(100),
            wait_for_check_suites(&mock, &options),
        )
        .await;
        assert!(result.is_err(), "wait should not have resolved");
        assert!(mock.list_calls() > 1);
    }

    #[tokio::test]
    async fn test_polls_until_success() {
        let mock = MockGitHub::new()
            .with_suites(vec![suite("queued", None)])
            .with_suites(vec![suite("in_progress", None)])
            .with_suites(vec![suite("completed", Some("success"))]);

        let verdict = wait_for_check_suites(&mock, &options()).await.unwrap();
        assert_eq!(verdict, Verdict::success());
        assert_eq!(mock.list_calls(), 3);
    }

    #[tokio::test]
    async fn test_suite_appearing_later_is_picked_up() {
        let mock = MockGitHub::new()
            .with_no_suites()
            .with_no_suites()
            .with_suites(vec![suite("completed", Some("cancelled"))]);

        let verdict = wait_for_check_suites(&mock, &waiting_options()).await.unwrap();
        assert_eq!(verdict, Verdict::Concluded(CheckSuiteConclusion::Cancelled));
    }

    #[tokio::test]
    async fn test_timeout_fires_and_never_resolves() {
        let mock = MockGitHub::new().with_no_suites();
        let options = waiting_options().with_timeout(Some(Duration::from_secs(1)));

        let started = std::time::Instant::now();
        let err = wait_for_check_suites(&mock, &options).await.unwrap_err();

        assert_eq!(err.to_string(), "Timeout of 1 seconds reached.");
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_timeout_stops_polling() {
        let mock = MockGitHub::new().with_no_suites();
        let options = waiting_options().with_timeout(Some(Duration::from_millis(50)));

        assert!(matches!(
            wait_for_check_suites(&mock, &options).await,
            Err(SuitewaitError::Timeout { .. })
        ));
        let calls = mock.list_calls();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(mock.list_calls(), calls);
    }

    #[test]
    fn test_zero_timeout_means_forever() {
        let options = waiting_options().with_timeout(Some(Duration::ZERO));
        assert!(options.timeout.is_none());
    }

    #[tokio::test]
    async fn test_first_fetch_failure_fails_immediately() {
        let mock = MockGitHub::new().with_response(ApiResponse::new(500, json!({})));
        let err = wait_for_check_suites(&mock, &waiting_options()).await.unwrap_err();
        assert!(matches!(err, SuitewaitError::FetchFailed { actual: 500, .. }));
        assert_eq!(mock.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_while_polling_stops_the_wait() {
        let mock = MockGitHub::new()
            .with_suites(vec![suite("queued", None)])
            .with_response(ApiResponse::new(403, json!({ "message": "rate limited" })));

        let options = options().with_timeout(Some(Duration::from_secs(5)));
        let err = wait_for_check_suites(&mock, &options).await.unwrap_err();
        assert!(matches!(err, SuitewaitError::FetchFailed { actual: 403, .. }));

        let calls = mock.list_calls();
        assert_eq!(calls, 2);
        tokio::time::sleep(TICK * 5).await;
        assert_eq!(mock.list_calls(), calls);
    }

    #[tokio::test]
    async fn test_malformed_data_while_polling_surfaces_unchanged() {
        let mock = MockGitHub::new()
            .with_suites(vec![suite("queued", None)])
            .with_suites(vec![suite("hibernating", None)]);

        let err = wait_for_check_suites(&mock, &options()).await.unwrap_err();
        assert!(matches!(err, SuitewaitError::UnknownStatus(s) if s == "hibernating"));
    }

    #[tokio::test]
    async fn test_listing_without_fields_fails_instead_of_succeeding() {
        let mock = MockGitHub::new().with_response(ApiResponse::ok(json!({})));
        let err = wait_for_check_suites(&mock, &options()).await.unwrap_err();
        assert!(matches!(err, SuitewaitError::MalformedRecord(_)));
    }

    #[tokio::test]
    async fn test_unschedulable_interval_rejected_without_panicking() {
        let mock = MockGitHub::new().with_no_suites();
        let interval = Duration::from_secs_f64(1e19);
        let options = WaitOptions::new(RefTarget::new("o", "r", "f"), interval)
            .with_policy(ReducePolicy {
                wait_for_a_check_suite: true,
                ..Default::default()
            })
            .with_timeout(Some(Duration::from_millis(50)));

        let err = wait_for_check_suites(&mock, &options).await.unwrap_err();
        assert!(matches!(err, SuitewaitError::InvalidInput(ref m) if m.contains("too large")));
        assert_eq!(mock.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_zero_interval_rejected() {
        let mock = MockGitHub::new().with_no_suites();
        let options = WaitOptions::new(RefTarget::new("o", "r", "f"), Duration::ZERO);
        assert!(matches!(
            wait_for_check_suites(&mock, &options).await,
            Err(SuitewaitError::InvalidInput(_))
        ));
        assert_eq!(mock.list_calls(), 0);
    }
}
