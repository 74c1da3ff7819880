//! I/O operations for fetching.
//!
//! The HTTP client seam, the HEAD probe, the streaming fetcher and the
//! integrity gate that decides whether a staged payload reaches its
//! destination. Decisions are delegated to [`crate::core`].

mod blocking;
mod fetcher;
mod gate;
mod http;
mod probe;
mod transfer;

pub use fetcher::Fetcher;
pub use gate::settle;
pub use http::{BoxStream, GetResponse, HeadResponse, HttpClient};
pub use probe::probe;
pub use transfer::StagedPayload;

#[cfg(feature = "reqwest")]
pub use http::{ClientSettings, ReqwestClient};
