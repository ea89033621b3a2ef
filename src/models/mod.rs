pub mod target;

pub use target::{Target, TargetList};
