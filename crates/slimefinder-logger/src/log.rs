use crate::severity::LogSeverity;
use crate::time::now;
use once_cell::sync::OnceCell;

/// Environment variable holding the minimum severity, e.g. `SLIMEFINDER_LOG=debug`.
pub const LOG_ENV: &str = "SLIMEFINDER_LOG";

static MIN_SEVERITY: OnceCell<LogSeverity> = OnceCell::new();

/// Sets the process-wide minimum severity. Only the first call wins; returns
/// whether this call was the one that set it.
pub fn init(min: LogSeverity) -> bool {
    MIN_SEVERITY.set(min).is_ok()
}

pub fn min_severity() -> LogSeverity {
    *MIN_SEVERITY.get_or_init(|| LogSeverity::Info)
}

pub fn enabled(severity: LogSeverity) -> bool {
    severity >= min_severity()
}

fn format_line(msg: &str, severity: LogSeverity, time: &str) -> String {
    format!("[{}] {} {}", severity, time, msg)
}

pub fn log(msg: String, severity: LogSeverity) {
    if !enabled(severity) {
        return;
    }
    println!("{}", format_line(&msg, severity, &now()));
}
