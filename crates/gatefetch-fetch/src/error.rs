//! Error types for gatefetch-fetch.

use std::io;
use thiserror::Error;

/// Why the transport probe rejected a resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeFailure {
    #[error("HEAD request failed: {0}")]
    Request(String),

    #[error("server answered {status} {reason}")]
    BadStatus { status: u16, reason: String },

    #[error("expected content type {expected}, got {actual}")]
    ContentTypeMismatch { expected: String, actual: String },

    #[error("response has no Content-Length header")]
    MissingContentLength,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("probe rejected {url}: {failure}")]
    Probe {
        url: String,
        #[source]
        failure: ProbeFailure,
    },

    #[error("transfer from {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("integrity check failed: expected {expected}, got {actual}")]
    IntegrityMismatch { expected: String, actual: String },

    #[error("no bytes received, cannot verify digest")]
    EmptyPayload,

    #[error("transfer cancelled")]
    Cancelled,

    #[error("staging error: {0}")]
    Staging(#[from] gatefetch_fs::Error),

    #[error("file I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FetchError {
    pub(crate) fn probe(url: &str, failure: ProbeFailure) -> Self {
        FetchError::Probe {
            url: url.to_string(),
            failure,
        }
    }

    pub(crate) fn transport(url: &str, reason: impl Into<String>) -> Self {
        FetchError::Transport {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the transfer was rejected before any body bytes were requested.
    pub fn is_probe_failure(&self) -> bool { matches!(self, FetchError::Probe { .. }) }

    /// Returns `true` for digest mismatches and unverifiable empty payloads.
    pub fn is_integrity_failure(&self) -> bool {
        matches!(
            self,
            FetchError::IntegrityMismatch { .. } | FetchError::EmptyPayload
        )
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
