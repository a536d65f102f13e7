// Process module - Spawn a child and pump its output through the logger

mod pump;
mod runner;
mod types;

pub use runner::{run_cmd, Runner};
pub use types::{exit_code, RunOutput, StreamKind};
