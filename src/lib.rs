// Library exports for runecho

pub mod cli;
pub mod config;
pub mod echo;
pub mod error;
pub mod input;
pub mod process;

pub use echo::{Colour, LogLevel, Logger};
pub use error::{Result, RunechoError};
pub use process::{run_cmd, RunOutput, Runner};
