use std::io::Write;

use gatefetch_fetch::{ObserverResult, ProgressEvent, ProgressObserver};
use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;

const PB_STYLE: &str =
    "{spinner:.blue} [{elapsed_precise}] {wide_bar:.cyan/blue} {bytes}/{total_bytes} {prefix} ({bytes_per_sec}, ETA {msg})";

const SPINNER_STYLE: &str = "{spinner:.blue} [{elapsed_precise}] {bytes} ({bytes_per_sec})";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const PB_CHARS: &str = "█▓▒░  ";

static PB_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| template(PB_STYLE));

static SPINNER_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| template(SPINNER_STYLE));

fn template(style: &str) -> Option<ProgressStyle> {
    let pb_style = match ProgressStyle::with_template(style) {
        Ok(pb_style) => pb_style.tick_chars(TICK).progress_chars(PB_CHARS),
        Err(_) => return None,
    };

    Some(pb_style)
}

/// Renders progress events as a terminal progress bar.
///
/// Starts as a spinner and turns into a bar once an event carries a total.
#[derive(Clone)]
pub struct ProgressTracker {
    pub pb: ProgressBar,
}

impl ProgressTracker {
    pub fn new() -> Self { Self::with_bar(ProgressBar::no_length()) }

    fn with_bar(pb: ProgressBar) -> Self {
        if let Some(style) = SPINNER_TEMPLATE.as_ref() {
            pb.set_style(style.clone());
        }
        ProgressTracker { pb }
    }

    /// Leave the bar where it stopped, e.g. after a failed transfer.
    pub fn abandon(&self) {
        if !self.pb.is_finished() {
            self.pb.abandon();
        }
    }
}

impl Default for ProgressTracker {
    fn default() -> Self { Self::new() }
}

impl ProgressObserver for ProgressTracker {
    fn on_progress(&self, event: &ProgressEvent) -> ObserverResult {
        if let Some(total) = event.total
            && self.pb.length() != Some(total)
        {
            self.pb.set_length(total);
            if let Some(style) = PB_TEMPLATE.as_ref() {
                self.pb.set_style(style.clone());
            }
        }

        self.pb.set_position(event.downloaded);
        self.pb.set_prefix(event.percent_complete.clone());
        self.pb.set_message(event.time_remaining.clone());

        if event.is_finished() {
            self.pb.finish();
        }
        Ok(())
    }
}

/// Print each event as one JSON line on stdout.
pub fn json_lines(event: &ProgressEvent) -> ObserverResult {
    let line = serde_json::to_string(event)?;
    writeln!(std::io::stdout().lock(), "{line}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatefetch_fetch::TransferStatus;

    fn event(total: Option<u64>, downloaded: u64, status: TransferStatus) -> ProgressEvent {
        ProgressEvent {
            total,
            downloaded,
            status,
            percent_complete: "50.0%".into(),
            time_remaining: "00:03".into(),
        }
    }

    #[test]
    fn test_templates_parse() {
        assert!(PB_TEMPLATE.is_some());
        assert!(SPINNER_TEMPLATE.is_some());
    }

    #[test]
    fn test_default_tracker_starts_without_length() {
        let tracker = ProgressTracker::default();
        assert_eq!(tracker.pb.length(), None);
        assert_eq!(tracker.pb.position(), 0);
        assert!(!tracker.pb.is_finished());
    }

    #[test]
    fn test_tracker_follows_events() {
        let tracker = ProgressTracker::with_bar(ProgressBar::hidden());

        tracker.on_progress(&event(Some(200), 100, TransferStatus::Downloading)).unwrap();
        assert_eq!(tracker.pb.length(), Some(200));
        assert_eq!(tracker.pb.position(), 100);
        assert_eq!(tracker.pb.message(), "00:03");
        assert_eq!(tracker.pb.prefix(), "50.0%");
        assert!(!tracker.pb.is_finished());

        tracker.on_progress(&event(Some(200), 200, TransferStatus::Finished)).unwrap();
        assert!(tracker.pb.is_finished());
    }

    #[test]
    fn test_tracker_without_total() {
        let tracker = ProgressTracker::with_bar(ProgressBar::hidden());

        tracker.on_progress(&event(None, 4096, TransferStatus::Downloading)).unwrap();
        assert_eq!(tracker.pb.position(), 4096);

        tracker.abandon();
        assert!(tracker.pb.is_finished());
    }
}
