//! Immutable data types for fetch operations.
//!
//! Requests, probe settings, progress snapshots and outcomes. Nothing here
//! performs I/O; the observer registry only fans events out to callbacks.

pub mod observers;
pub mod probe;
pub mod progress;
pub mod request;

pub use observers::{ObserverError, ObserverResult, ProgressObserver, ProgressObservers};
pub use probe::{ProbeOptions, ProbeReport};
pub use progress::{ProgressEvent, TransferStatus};
pub use request::{Downloaded, TransferRequest};
