//! Compact elapsed-time strings for the duration line.

use chrono::TimeDelta;

/// Formats an elapsed time as `1h2m3s`, `3m12s`, `45s` or `850ms`.
///
/// Zero-valued leading units are dropped, lower units are always kept once a
/// higher one is printed. Negative values clamp to `0ms`.
pub fn format_elapsed(elapsed: TimeDelta) -> String {
    let millis = elapsed.num_milliseconds().max(0);
    if millis < 1000 {
        return format!("{}ms", millis);
    }

    let total_secs = millis / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
