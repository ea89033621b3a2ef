use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::reporter::{PollReporter, TracingReporter};
use crate::config::MonitorConfig;
use crate::models::{Target, TargetList};

/// Why a single poll failed. Never escapes the poll loop.
#[derive(Debug, Clone, Error)]
pub enum PollError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("unexpected status code: {0}")]
    Status(StatusCode),

    #[error("invalid response body: {0}")]
    Body(String),

    #[error("request failed: {0}")]
    Request(String),
}

/// Result of polling one target once.
#[derive(Debug, Clone)]
pub struct PollOutcome {
    pub name: String,
    pub url: String,
    pub elapsed: Duration,
    pub result: Result<Value, PollError>,
}

impl PollOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Tally of one pass over all targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleSummary {
    pub cycle: u64,
    pub succeeded: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

/// Polls every target in order, then sleeps, until cancelled.
pub struct HeartbeatPoller {
    targets: TargetList,
    client: Client,
    timeout: Duration,
    interval: Duration,
    reporter: Arc<dyn PollReporter>,
}

impl HeartbeatPoller {
    /// Creates a poller that logs through [`TracingReporter`].
    pub fn new(targets: TargetList, settings: &MonitorConfig) -> Self {
        Self {
            targets,
            client: Client::new(),
            timeout: settings.timeout(),
            interval: settings.interval(),
            reporter: Arc::new(TracingReporter),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn PollReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_timing(mut self, timeout: Duration, interval: Duration) -> Self {
        self.timeout = timeout;
        self.interval = interval;
        self
    }

    pub fn targets(&self) -> &TargetList {
        &self.targets
    }

    fn classify(&self, err: reqwest::Error) -> PollError {
        if err.is_timeout() {
            PollError::Timeout(self.timeout)
        } else if err.is_connect() {
            PollError::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            PollError::Body(err.to_string())
        } else {
            PollError::Request(err.to_string())
        }
    }

    async fn fetch(&self, url: &str) -> Result<Value, PollError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PollError::Status(status));
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        serde_json::from_str(&body).map_err(|e| PollError::Body(e.to_string()))
    }

    /// Issues one GET against `target` and reports the outcome.
    pub async fn poll_target(&self, target: &Target) -> PollOutcome {
        debug!("Polling {}", target);
        let started = Instant::now();
        let result = self.fetch(target.url()).await;
        let outcome = PollOutcome {
            name: target.name().to_string(),
            url: target.url().to_string(),
            elapsed: started.elapsed(),
            result,
        };
        self.reporter.record_poll(&outcome);
        outcome
    }

    /// Polls every target once, in list order. Failures do not stop the cycle.
    pub async fn run_cycle(&self, cycle: u64) -> CycleSummary {
        let started = Instant::now();
        let mut succeeded = 0;
        let mut failed = 0;

        for target in &self.targets {
            if self.poll_target(target).await.is_success() {
                succeeded += 1;
            } else {
                failed += 1;
            }
        }

        let summary = CycleSummary {
            cycle,
            succeeded,
            failed,
            elapsed: started.elapsed(),
        };
        self.reporter.record_cycle(&summary);
        summary
    }

    /// Runs cycles back to back with `interval` of sleep after each, until `cancel` fires.
    pub async fn run(self, cancel: CancellationToken) {
        info!(
            event_name = "poller.started",
            event_domain = "poller",
            target_count = self.targets.len(),
            interval_secs = self.interval.as_secs_f64(),
            timeout_secs = self.timeout.as_secs_f64(),
            "Heartbeat poller running for {} target(s)",
            self.targets.len()
        );

        let mut cycle: u64 = 0;
        loop {
            cycle += 1;
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = self.run_cycle(cycle) => {}
            }
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!(
            event_name = "poller.stopped",
            event_domain = "poller",
            cycle,
            "Heartbeat poller stopped"
        );
    }
}
