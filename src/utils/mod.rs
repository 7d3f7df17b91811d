//! Utilities - terminal styling, progress indicators, and logging setup

mod logging;
mod progress;
mod styling;

pub use logging::*;
pub use progress::*;
pub use styling::*;
