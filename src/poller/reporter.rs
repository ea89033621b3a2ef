//! Where poll outcomes go once observed.

use tracing::{error, info};

use super::heartbeat::{CycleSummary, PollOutcome};

/// Receives every poll outcome and every completed cycle.
pub trait PollReporter: Send + Sync + 'static {
    /// Called once per target per cycle.
    fn record_poll(&self, outcome: &PollOutcome);

    /// Called after the last target of a cycle, before the sleep.
    fn record_cycle(&self, summary: &CycleSummary);
}

/// Writes one tracing event per outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl PollReporter for TracingReporter {
    fn record_poll(&self, outcome: &PollOutcome) {
        let elapsed_ms = outcome.elapsed.as_millis() as u64;
        match &outcome.result {
            Ok(data) => info!(
                event_name = "poller.poll.success",
                event_domain = "poller",
                target_name = outcome.name.as_str(),
                url = outcome.url.as_str(),
                elapsed_ms,
                "Heartbeat data received from {} ({}): {}",
                outcome.name,
                outcome.url,
                data
            ),
            Err(e) => error!(
                event_name = "poller.poll.failure",
                event_domain = "poller",
                target_name = outcome.name.as_str(),
                url = outcome.url.as_str(),
                elapsed_ms,
                error = %e,
                "Error fetching heartbeat from {} ({}): {}",
                outcome.name,
                outcome.url,
                e
            ),
        }
    }

    fn record_cycle(&self, summary: &CycleSummary) {
        info!(
            event_name = "poller.cycle.complete",
            event_domain = "poller",
            cycle = summary.cycle,
            succeeded = summary.succeeded,
            failed = summary.failed,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Heartbeat cycle {} complete: {} ok, {} failed",
            summary.cycle,
            summary.succeeded,
            summary.failed
        );
    }
}
