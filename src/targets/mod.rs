//! Building the target list from configuration.
//!
//! Targets are read by index, starting at 1, from a [`TargetSource`]. The scan
//! stops at the first index without a url.

mod loader;
mod source;

pub use loader::{load_targets, normalize_url};
pub use source::{EnvTargets, TargetSource};
