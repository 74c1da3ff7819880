use serde::Serialize;

/// Lifecycle state reported with each [`ProgressEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    /// A block was received; more may follow.
    Downloading,
    /// The body stream ended. Emitted once, before the integrity gate runs.
    Finished,
}

/// Snapshot handed to every progress observer.
///
/// The string fields are preformatted so renderers need no math of their own:
/// `percent_complete` is `"-.-%"` and `time_remaining` is `"--:--"` while the
/// value cannot be estimated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    /// Declared total length in bytes, if the server sent one.
    pub total: Option<u64>,

    /// Bytes received so far.
    pub downloaded: u64,

    pub status: TransferStatus,

    pub percent_complete: String,

    /// Estimated remaining time as `MM:SS`.
    pub time_remaining: String,
}

impl ProgressEvent {
    #[must_use]
    pub fn is_finished(&self) -> bool { self.status == TransferStatus::Finished }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_status_lowercase() {
        let event = ProgressEvent {
            total: None,
            downloaded: 12,
            status: TransferStatus::Finished,
            percent_complete: "-.-%".into(),
            time_remaining: "00:00".into(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["status"], "finished");
        assert_eq!(json["total"], serde_json::Value::Null);
        assert_eq!(json["downloaded"], 12);
        assert!(event.is_finished());
    }
}
