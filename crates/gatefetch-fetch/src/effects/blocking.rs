use std::io;

use crate::error::{FetchError, Result};

/// Run filesystem work on tokio's blocking pool.
pub(crate) async fn run_blocking<F, T>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| FetchError::Io(io::Error::other(e)))?
}
