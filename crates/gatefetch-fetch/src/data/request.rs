use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use gatefetch_verify::{Checksum, HashAlgorithm};
use tokio_util::sync::CancellationToken;

use super::observers::{ObserverResult, ProgressObservers};
use super::probe::ProbeOptions;
use super::progress::ProgressEvent;
use crate::core::DEFAULT_BLOCK_SIZE;

/// Everything needed to run one download.
///
/// # Examples
///
/// ```
/// use gatefetch_fetch::{ProbeOptions, TransferRequest};
/// use gatefetch_verify::HashAlgorithm;
///
/// let request = TransferRequest::new("https://example.com/tool.7z", "downloads/tool.7z")
///     .expected_digest("fc20affd161264e7c5b816ddc85955cd")
///     .digest_algorithm(HashAlgorithm::Md5)
///     .max_retries(5)
///     .probe(ProbeOptions::default().require_content_length(true));
///
/// assert!(request.checksum().is_some());
/// ```
#[derive(Clone)]
pub struct TransferRequest {
    pub url: String,

    /// File written only after the integrity gate passes.
    pub destination: PathBuf,

    /// Expected hex digest. `None` skips verification.
    pub expected_digest: Option<String>,

    /// Default: md5
    pub digest_algorithm: HashAlgorithm,

    /// Connection-level retries of the GET after the initial attempt.
    ///
    /// - Retries are triggered for transport errors and retryable statuses (408, 429, 5xx)
    /// - Digest mismatches are never retried
    /// - Total attempts = 1 (initial) + max_retries
    ///
    /// Default: 3
    pub max_retries: u32,

    /// Base delay for exponential backoff between retries.
    ///
    /// Default: 100ms
    pub retry_backoff: Duration,

    /// First read size in bytes; adapted after every block.
    ///
    /// Default: 16384
    pub block_size: usize,

    /// HEAD checks run before the transfer. `None` skips the probe.
    ///
    /// Default: None
    pub probe: Option<ProbeOptions>,

    pub observers: ProgressObservers,

    /// Checked once per block and while waiting between retries.
    pub cancel: Option<CancellationToken>,
}

impl TransferRequest {
    pub fn new(url: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            destination: destination.into(),
            expected_digest: None,
            digest_algorithm: HashAlgorithm::default(),
            max_retries: 3,
            retry_backoff: Duration::from_millis(100),
            block_size: DEFAULT_BLOCK_SIZE,
            probe: None,
            observers: ProgressObservers::new(),
            cancel: None,
        }
    }

    #[must_use]
    pub fn expected_digest(mut self, digest: impl Into<String>) -> Self {
        self.expected_digest = Some(digest.into());
        self
    }

    #[must_use]
    pub fn digest_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.digest_algorithm = algorithm;
        self
    }

    #[must_use]
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn retry_backoff(mut self, retry_backoff: Duration) -> Self {
        self.retry_backoff = retry_backoff;
        self
    }

    /// Set the initial block size. Zero is raised to one.
    #[must_use]
    pub fn block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(1);
        self
    }

    #[must_use]
    pub fn probe(mut self, options: ProbeOptions) -> Self {
        self.probe = Some(options);
        self
    }

    #[must_use]
    pub fn on_progress<F>(mut self, observer: F) -> Self
    where
        F: Fn(&ProgressEvent) -> ObserverResult + Send + Sync + 'static,
    {
        self.observers.subscribe(observer);
        self
    }

    #[must_use]
    pub fn observers(mut self, observers: ProgressObservers) -> Self {
        self.observers = observers;
        self
    }

    #[must_use]
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The expected digest paired with its algorithm.
    pub fn checksum(&self) -> Option<Checksum> {
        self.expected_digest
            .as_ref()
            .map(|digest| Checksum::new(self.digest_algorithm, digest.clone()))
    }

    pub(crate) fn initial_block_size(&self) -> usize { self.block_size.max(1) }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }
}

impl fmt::Debug for TransferRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferRequest")
            .field("url", &self.url)
            .field("destination", &self.destination)
            .field("expected_digest", &self.expected_digest)
            .field("digest_algorithm", &self.digest_algorithm)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff", &self.retry_backoff)
            .field("block_size", &self.block_size)
            .field("probe", &self.probe)
            .field("observers", &self.observers)
            .field("cancel", &self.cancel.is_some())
            .finish()
    }
}

/// A payload that passed the integrity gate and now lives at `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Downloaded {
    pub path: PathBuf,
    pub bytes: u64,
    /// Hex digest, present when one was verified.
    pub digest: Option<String>,
}
