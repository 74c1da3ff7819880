use std::io;
use std::time::Instant;

use futures_util::TryStreamExt;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::io::StreamReader;
use tracing::{debug, error, info, instrument};

use crate::core::{is_retryable_status, is_success_status, retry_delay};
use crate::data::{Downloaded, ProbeOptions, ProbeReport, TransferRequest};
use crate::effects::gate::{discard_destination, settle};
use crate::effects::http::{GetResponse, HttpClient};
use crate::effects::probe::probe;
use crate::effects::transfer::{StagedPayload, TransferState};
use crate::error::{FetchError, Result};

/// Runs transfers over a shared HTTP client.
///
/// A `Fetcher` holds no per-transfer state, so one instance can serve any
/// number of concurrent downloads through `&self`.
pub struct Fetcher<C: HttpClient> {
    client: C,
}

impl<C: HttpClient> Fetcher<C> {
    /// Create a new fetcher with the provided HTTP client.
    pub fn new(client: C) -> Self { Self { client } }

    pub fn client(&self) -> &C { &self.client }

    /// Validate a resource with a HEAD request.
    pub async fn probe(&self, url: &str, options: &ProbeOptions) -> Result<ProbeReport> {
        probe(&self.client, url, options).await
    }

    /// Download `request`, reporting only whether the payload was persisted.
    ///
    /// Every failure is logged and collapsed to `false`; use
    /// [`Fetcher::try_download`] to inspect the cause.
    pub async fn download(&self, request: &TransferRequest) -> bool {
        match self.try_download(request).await {
            Ok(_) => true,
            Err(e) => {
                error!(url = %request.url, error = %e, "download failed");
                false
            }
        }
    }

    /// Probe, fetch and gate `request`.
    ///
    /// A probe rejection leaves the destination untouched. Any later failure
    /// discards the staged bytes and removes a pre-existing destination.
    #[instrument(
        name = "download",
        level = "debug",
        skip(self, request),
        fields(url = %request.url, destination = %request.destination.display())
    )]
    pub async fn try_download(&self, request: &TransferRequest) -> Result<Downloaded> {
        let known_length = match &request.probe {
            Some(options) => self.probe(&request.url, options).await?.content_length,
            None => None,
        };

        let payload = match self.fetch(request, known_length).await {
            Ok(payload) => payload,
            Err(e) => {
                discard_destination(&request.destination).await;
                return Err(e);
            }
        };

        let elapsed = payload.elapsed();
        let downloaded = settle(payload, request.checksum().as_ref()).await?;
        info!(
            path = %downloaded.path.display(),
            bytes = downloaded.bytes,
            ?elapsed,
            "download complete"
        );
        Ok(downloaded)
    }

    /// Stream the body of `request.url` into a staging file.
    ///
    /// `known_length` is used as the total when the GET response does not
    /// declare one. The returned payload has not been verified or committed.
    pub async fn fetch(
        &self,
        request: &TransferRequest,
        known_length: Option<u64>,
    ) -> Result<StagedPayload> {
        let response = self.open(request).await?;
        let total = response.content_length.or(known_length);
        if total.is_none() {
            debug!("no content length, progress will not show percent or time left");
        }

        let checksum = request.checksum();
        let mut state = TransferState::open(
            &request.destination,
            total,
            request.initial_block_size(),
            checksum.as_ref(),
        )
        .await?;

        let mut reader = StreamReader::new(response.body.map_err(io::Error::other));
        let mut block = Vec::with_capacity(state.block_size());

        loop {
            if request.is_cancelled() {
                debug!("cancelled between blocks");
                return Err(FetchError::Cancelled);
            }

            let started = Instant::now();
            let read = read_block(&mut reader, state.block_size(), &mut block);
            let received = match &request.cancel {
                Some(token) => tokio::select! {
                    _ = token.cancelled() => {
                        debug!("cancelled while waiting for body bytes");
                        return Err(FetchError::Cancelled);
                    }
                    received = read => received,
                },
                None => read.await,
            };
            received.map_err(|e| FetchError::transport(&request.url, e.to_string()))?;
            let read_time = started.elapsed();

            if block.is_empty() {
                break;
            }

            state.absorb(&block, read_time).await?;
            request.observers.notify(&state.progress());
        }

        request.observers.notify(&state.finished());
        debug!("body received");
        state.seal().await
    }

    /// Open the GET, retrying transport errors and transient statuses.
    async fn open(&self, request: &TransferRequest) -> Result<GetResponse<C::Error>> {
        let url = request.url.as_str();
        let mut attempt = 0u32;

        loop {
            if request.is_cancelled() {
                return Err(FetchError::Cancelled);
            }

            let reason = match self.client.get(url).await {
                Ok(response) if is_success_status(response.status) => return Ok(response),
                Ok(response) if !is_retryable_status(response.status) => {
                    return Err(FetchError::transport(
                        url,
                        format!("HTTP {} {}", response.status, response.reason),
                    ));
                }
                Ok(response) => format!("HTTP {} {}", response.status, response.reason),
                Err(e) => e.to_string(),
            };

            if attempt >= request.max_retries {
                return Err(FetchError::transport(
                    url,
                    format!("{reason} (gave up after {} attempts)", attempt + 1),
                ));
            }

            let delay = retry_delay(attempt, request.retry_backoff);
            debug!(attempt = attempt + 1, ?delay, %reason, "retrying GET");

            match &request.cancel {
                Some(token) => tokio::select! {
                    _ = token.cancelled() => return Err(FetchError::Cancelled),
                    _ = tokio::time::sleep(delay) => {}
                },
                None => tokio::time::sleep(delay).await,
            }
            attempt += 1;
        }
    }
}

/// Read up to `limit` bytes, stopping early only at end of stream.
async fn read_block<R: AsyncRead + Unpin>(
    reader: &mut R,
    limit: usize,
    block: &mut Vec<u8>,
) -> io::Result<usize> {
    block.clear();
    (&mut *reader).take(limit as u64).read_to_end(block).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[tokio::test]
    async fn test_read_block_fills_until_limit() {
        let mut reader = Cursor::new(vec![7u8; 10]);
        let mut block = Vec::new();

        assert_eq!(read_block(&mut reader, 4, &mut block).await.unwrap(), 4);
        assert_eq!(block, vec![7; 4]);
        assert_eq!(read_block(&mut reader, 4, &mut block).await.unwrap(), 4);
        assert_eq!(read_block(&mut reader, 4, &mut block).await.unwrap(), 2);
        assert_eq!(read_block(&mut reader, 4, &mut block).await.unwrap(), 0);
        assert!(block.is_empty());
    }

    #[tokio::test]
    async fn test_read_block_spans_stream_chunks() {
        let chunks = vec![
            Ok::<_, io::Error>(bytes::Bytes::from_static(b"ab")),
            Ok(bytes::Bytes::from_static(b"cde")),
            Ok(bytes::Bytes::from_static(b"f")),
        ];
        let mut reader = StreamReader::new(futures_util::stream::iter(chunks));
        let mut block = Vec::new();

        read_block(&mut reader, 4, &mut block).await.unwrap();
        assert_eq!(block, b"abcd");
        read_block(&mut reader, 4, &mut block).await.unwrap();
        assert_eq!(block, b"ef");
    }
}
