//! Shared fixtures for the fetch integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use futures_util::StreamExt;
use gatefetch_fetch::{GetResponse, HeadResponse, HttpClient, ObserverResult, ProgressEvent, ProgressObservers};
use gatefetch_verify::{AnyHasher, HashAlgorithm, Hasher};

#[derive(Debug)]
pub struct MockError(pub String);

impl std::fmt::Display for MockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

impl std::error::Error for MockError {}

/// Scripted HTTP client.
///
/// GET attempts first fail with transport errors, then answer with the
/// scripted statuses, then serve `body` in `chunk_size` pieces.
#[derive(Debug, Clone)]
pub struct MockClient {
    pub body: Vec<u8>,
    pub chunk_size: usize,
    pub declare_length: bool,
    pub head: Option<HeadResponse>,
    pub transport_failures: usize,
    pub statuses: Vec<u16>,
    pub final_status: u16,
    pub break_body_after: Option<usize>,
    pub stall_body_after: Option<usize>,
    pub head_calls: Arc<AtomicUsize>,
    pub get_calls: Arc<AtomicUsize>,
}

impl MockClient {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        let head = HeadResponse {
            status: 200,
            reason: "OK".into(),
            content_type: Some("application/octet-stream".into()),
            content_length: Some(body.len() as u64),
        };

        Self {
            body,
            chunk_size: 1024,
            declare_length: true,
            head: Some(head),
            transport_failures: 0,
            statuses: Vec::new(),
            final_status: 200,
            break_body_after: None,
            stall_body_after: None,
            head_calls: Arc::new(AtomicUsize::new(0)),
            get_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn without_length(mut self) -> Self {
        self.declare_length = false;
        if let Some(head) = self.head.as_mut() {
            head.content_length = None;
        }
        self
    }

    pub fn head(mut self, status: u16, content_type: Option<&str>) -> Self {
        let head = self.head.get_or_insert_with(HeadResponse::default);
        head.status = status;
        head.reason = reason(status).into();
        head.content_type = content_type.map(str::to_string);
        self
    }

    /// Make the HEAD request itself fail.
    pub fn unreachable_head(mut self) -> Self {
        self.head = None;
        self
    }

    pub fn transport_failures(mut self, count: usize) -> Self {
        self.transport_failures = count;
        self
    }

    pub fn statuses(mut self, statuses: &[u16]) -> Self {
        self.statuses = statuses.to_vec();
        self
    }

    pub fn final_status(mut self, status: u16) -> Self {
        self.final_status = status;
        self
    }

    pub fn break_body_after(mut self, chunks: usize) -> Self {
        self.break_body_after = Some(chunks);
        self
    }

    /// Serve `chunks` pieces of the body, then never yield again.
    pub fn stall_body_after(mut self, chunks: usize) -> Self {
        self.stall_body_after = Some(chunks);
        self
    }

    pub fn head_calls(&self) -> usize { self.head_calls.load(Ordering::SeqCst) }

    pub fn get_calls(&self) -> usize { self.get_calls.load(Ordering::SeqCst) }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        408 => "Request Timeout",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "",
    }
}

impl HttpClient for MockClient {
    type Error = MockError;

    async fn head(&self, _url: &str, _timeout: Duration) -> Result<HeadResponse, MockError> {
        self.head_calls.fetch_add(1, Ordering::SeqCst);
        self.head
            .clone()
            .ok_or_else(|| MockError("connection refused".into()))
    }

    async fn get(&self, _url: &str) -> Result<GetResponse<MockError>, MockError> {
        let attempt = self.get_calls.fetch_add(1, Ordering::SeqCst);
        if attempt < self.transport_failures {
            return Err(MockError("connection reset".into()));
        }

        let status = self
            .statuses
            .get(attempt - self.transport_failures)
            .copied()
            .unwrap_or(self.final_status);

        let mut items: Vec<Result<Bytes, MockError>> = if (200..300).contains(&status) {
            self.body
                .chunks(self.chunk_size)
                .map(|c| Ok(Bytes::copy_from_slice(c)))
                .collect()
        } else {
            Vec::new()
        };

        if let Some(after) = self.break_body_after {
            items.truncate(after);
            items.push(Err(MockError("connection dropped".into())));
        }

        let body = match self.stall_body_after {
            Some(after) => {
                items.truncate(after);
                futures_util::stream::iter(items)
                    .chain(futures_util::stream::pending())
                    .boxed()
            }
            None => futures_util::stream::iter(items).boxed(),
        };

        Ok(GetResponse {
            status,
            reason: reason(status).into(),
            content_length: self.declare_length.then_some(self.body.len() as u64),
            body,
        })
    }
}

/// Records every event it sees.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl Recorder {
    pub fn observe(&self) -> impl Fn(&ProgressEvent) -> ObserverResult + Send + Sync + 'static {
        let events = Arc::clone(&self.events);
        move |event: &ProgressEvent| {
            events.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    pub fn observers(&self) -> ProgressObservers { ProgressObservers::new().with(self.observe()) }

    pub fn events(&self) -> Vec<ProgressEvent> { self.events.lock().unwrap().clone() }
}

/// Deterministic, non-repeating-looking payload.
pub fn payload(len: usize) -> Vec<u8> { (0..len).map(|i| (i * 31 % 251) as u8).collect() }

pub fn md5_hex(data: &[u8]) -> String {
    let mut hasher = AnyHasher::new(HashAlgorithm::Md5);
    hasher.update(data);
    hasher.finalize_hex()
}

/// Every entry in `dir` other than `keep`.
pub fn debris(dir: &Path, keep: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p != keep)
        .collect()
}
