pub mod log;
pub mod severity;
pub mod time;

pub use log::{enabled, init, log, min_severity, LOG_ENV};
pub use severity::LogSeverity;
