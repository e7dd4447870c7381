//! Progress reporting for plan assembly

mod handler;
mod logging;

pub use handler::{NoOpHandler, ProgressEvent, ProgressHandler};
pub use logging::LoggingHandler;
