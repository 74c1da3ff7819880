use std::time::Duration;

/// Percent placeholder used while the total length is unknown.
pub const UNKNOWN_PERCENT: &str = "-.-%";

/// ETA placeholder used while no stable estimate exists.
pub const UNKNOWN_ETA: &str = "--:--";

/// ETA reported with the final event.
pub const FINISHED_ETA: &str = "00:00";

const MIN_ELAPSED: Duration = Duration::from_millis(1);
const MAX_ETA_MINUTES: u64 = 99;

/// Format completion as a percentage with one decimal, e.g. `"42.5%"`.
///
/// An empty resource (`total == 0`) is reported as complete.
///
/// # Examples
///
/// ```
/// use gatefetch_fetch::core::percent_complete;
///
/// assert_eq!(percent_complete(50, Some(200)), "25.0%");
/// assert_eq!(percent_complete(50, None), "-.-%");
/// ```
pub fn percent_complete(downloaded: u64, total: Option<u64>) -> String {
    match total {
        None => UNKNOWN_PERCENT.to_string(),
        Some(0) => "100.0%".to_string(),
        Some(total) => format!("{:.1}%", downloaded as f64 / total as f64 * 100.0),
    }
}

/// Estimate time remaining as `MM:SS` from the average rate since the start.
///
/// Returns [`UNKNOWN_ETA`] when the total is unknown, nothing has arrived
/// yet, less than a millisecond has passed, or the estimate exceeds 99
/// minutes.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use gatefetch_fetch::core::eta;
///
/// // 100 B/s with 6000 bytes to go
/// assert_eq!(eta(Duration::from_secs(1), Some(6100), 100), "01:00");
/// assert_eq!(eta(Duration::from_secs(1), None, 100), "--:--");
/// ```
pub fn eta(elapsed: Duration, total: Option<u64>, downloaded: u64) -> String {
    let Some(total) = total else {
        return UNKNOWN_ETA.to_string();
    };
    if downloaded == 0 || elapsed < MIN_ELAPSED {
        return UNKNOWN_ETA.to_string();
    }

    let rate = downloaded as f64 / elapsed.as_secs_f64();
    if !rate.is_finite() || rate <= 0.0 {
        return UNKNOWN_ETA.to_string();
    }

    let remaining = total.saturating_sub(downloaded) as f64;
    let seconds = (remaining / rate) as u64;
    let (minutes, seconds) = (seconds / 60, seconds % 60);

    if minutes > MAX_ETA_MINUTES {
        return UNKNOWN_ETA.to_string();
    }
    format!("{minutes:02}:{seconds:02}")
}
