//! HTTP downloading with adaptive block sizing, progress estimates and a
//! digest-gated commit.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Requests, probe settings, progress snapshots and observers
//! - [`core`] - Pure transformations
//! - `effects` - I/O operations behind the [`HttpClient`] trait
//!
//! # Key Features
//!
//! - **Probe First**: An optional HEAD request rejects bad statuses, wrong
//!   media types and missing lengths before any body bytes are requested
//! - **Adaptive Blocks**: Each read is sized from the throughput of the last one
//! - **Fault-Isolated Progress**: A failing or panicking observer never
//!   disturbs the transfer or the other observers
//! - **Digest Gate**: Bytes are hashed while staged beside the destination and
//!   only renamed into place once the digest matches
//!
//! # Example
//!
//! ```no_run
//! use gatefetch_fetch::{Fetcher, ProbeOptions, ReqwestClient, TransferRequest};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = Fetcher::new(ReqwestClient::new()?);
//! let request = TransferRequest::new("https://example.com/tool.zip", "downloads/tool.zip")
//!     .expected_digest("5eb63bbbe01eeed093cb22bb8f5acdc3")
//!     .probe(ProbeOptions::default().expected_content_type("application/zip"))
//!     .on_progress(|event| {
//!         println!("{} {}", event.percent_complete, event.time_remaining);
//!         Ok(())
//!     });
//!
//! let downloaded = fetcher.try_download(&request).await?;
//! println!("{} bytes at {}", downloaded.bytes, downloaded.path.display());
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod data;
mod effects;
mod error;

pub use self::core::{DEFAULT_BLOCK_SIZE, MAX_BLOCK_SIZE, best_block_size, eta, percent_complete, retry_delay};
pub use data::{
    Downloaded, ObserverError, ObserverResult, ProbeOptions, ProbeReport, ProgressEvent, ProgressObserver,
    ProgressObservers, TransferRequest, TransferStatus,
};
pub use effects::{BoxStream, Fetcher, GetResponse, HeadResponse, HttpClient, StagedPayload, probe, settle};

#[cfg(feature = "reqwest")]
pub use effects::{ClientSettings, ReqwestClient};

pub use error::{FetchError, ProbeFailure, Result};

pub use gatefetch_verify::{Checksum, HashAlgorithm};
