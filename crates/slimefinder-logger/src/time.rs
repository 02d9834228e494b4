use std::time::{SystemTime, UNIX_EPOCH};

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

/// Returns the current local time as `YYYY-MM-DD HH:MM:SS TZ`.
#[cfg(unix)]
pub fn now() -> String {
    use std::ffi::CStr;

    let secs = unix_seconds() as libc::time_t;
    let mut tm: libc::tm = unsafe { std::mem::zeroed() };
    let converted = unsafe { !libc::localtime_r(&secs, &mut tm).is_null() };
    if !converted {
        return secs.to_string();
    }

    let mut buf = [0 as libc::c_char; 100];
    let fmt = b"%Y-%m-%d %H:%M:%S %Z\0";

    unsafe {
        let written = libc::strftime(
            buf.as_mut_ptr(),
            buf.len(),
            fmt.as_ptr() as *const libc::c_char,
            &tm,
        );
        if written == 0 {
            return secs.to_string();
        }
        CStr::from_ptr(buf.as_ptr()).to_string_lossy().into_owned()
    }
}

/// Seconds since the Unix epoch where no C time library is available.
#[cfg(not(unix))]
pub fn now() -> String {
    unix_seconds().to_string()
}
