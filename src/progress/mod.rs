//! Progress reporting for compile runs

mod handler;
mod logging;

pub use handler::{ProgressEvent, ProgressHandler};
pub use logging::LoggingHandler;
