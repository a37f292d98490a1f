//! Output formatting for CLI.

mod json;
mod progress;

pub use json::{JsonOutput, OutputFormat};
pub use progress::ProgressBar;
