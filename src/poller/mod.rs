//! The heartbeat poller and the controller that starts it.
//!
//! A single background task visits every target in order, logs each outcome
//! through a [`PollReporter`] and sleeps a fixed interval between cycles.

mod controller;
mod heartbeat;
mod reporter;

pub use controller::{PollerController, StartOutcome, StartState};
pub use heartbeat::{CycleSummary, HeartbeatPoller, PollError, PollOutcome};
pub use reporter::{PollReporter, TracingReporter};
