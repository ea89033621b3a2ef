// This module re-exports important pieces for convenience,
// so we can "use crate::config::*" easily.
pub mod logging;
pub mod monitor;
pub mod types;

pub use logging::*;
pub use monitor::*;
pub use types::*;
