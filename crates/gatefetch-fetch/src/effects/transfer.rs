use std::path::Path;
use std::time::{Duration, Instant};

use gatefetch_fs::Staging;
use gatefetch_verify::{AnyHasher, Checksum, Hasher};
use tokio::io::AsyncWriteExt;
use tracing::trace;

use crate::core::{FINISHED_ETA, best_block_size, eta, percent_complete};
use crate::data::{ProgressEvent, TransferStatus};
use crate::effects::blocking::run_blocking;
use crate::error::Result;

/// Mutable state of one in-flight transfer.
///
/// Owned by a single fetch; received blocks are hashed and appended to a
/// staging file beside the destination.
pub(crate) struct TransferState {
    file: tokio::fs::File,
    staging: Staging,
    hasher: Option<AnyHasher>,
    downloaded: u64,
    total: Option<u64>,
    block_size: usize,
    started: Instant,
    percent: String,
}

impl TransferState {
    pub(crate) async fn open(
        destination: &Path,
        total: Option<u64>,
        block_size: usize,
        checksum: Option<&Checksum>,
    ) -> Result<Self> {
        let destination = destination.to_path_buf();
        let (file, staging) = run_blocking(move || Ok(Staging::new(destination)?)).await?;

        Ok(Self {
            file: tokio::fs::File::from_std(file),
            staging,
            hasher: checksum.map(Checksum::hasher),
            downloaded: 0,
            total,
            block_size: block_size.max(1),
            started: Instant::now(),
            percent: percent_complete(0, total),
        })
    }

    pub(crate) fn block_size(&self) -> usize { self.block_size }

    /// Hash and stage one non-empty block, then adapt the next read size.
    pub(crate) async fn absorb(&mut self, block: &[u8], read_time: Duration) -> Result<()> {
        if let Some(hasher) = self.hasher.as_mut() {
            hasher.update(block);
        }
        self.file.write_all(block).await?;
        self.downloaded += block.len() as u64;

        self.block_size = best_block_size(read_time, block.len());
        trace!(
            received = block.len(),
            ?read_time,
            next_block = self.block_size,
            "block staged"
        );
        Ok(())
    }

    /// Snapshot for the block just absorbed.
    pub(crate) fn progress(&mut self) -> ProgressEvent {
        self.percent = percent_complete(self.downloaded, self.total);

        ProgressEvent {
            total: self.total,
            downloaded: self.downloaded,
            status: TransferStatus::Downloading,
            percent_complete: self.percent.clone(),
            time_remaining: eta(self.started.elapsed(), self.total, self.downloaded),
        }
    }

    /// Final snapshot, emitted once the stream has ended.
    pub(crate) fn finished(&self) -> ProgressEvent {
        ProgressEvent {
            total: self.total,
            downloaded: self.downloaded,
            status: TransferStatus::Finished,
            percent_complete: self.percent.clone(),
            time_remaining: FINISHED_ETA.to_string(),
        }
    }

    /// Flush the staging file and hand the payload to the integrity gate.
    pub(crate) async fn seal(mut self) -> Result<StagedPayload> {
        self.file.flush().await?;
        self.file.sync_all().await?;
        drop(self.file);

        Ok(StagedPayload {
            staging: self.staging,
            downloaded: self.downloaded,
            hasher: self.hasher,
            elapsed: self.started.elapsed(),
        })
    }
}

/// A fully received payload waiting for the integrity gate.
///
/// Dropping it discards the staging file.
pub struct StagedPayload {
    pub(crate) staging: Staging,
    pub(crate) downloaded: u64,
    pub(crate) hasher: Option<AnyHasher>,
    pub(crate) elapsed: Duration,
}

impl StagedPayload {
    pub fn bytes(&self) -> u64 { self.downloaded }

    pub fn staging_path(&self) -> &Path { self.staging.path() }

    pub fn destination(&self) -> &Path { self.staging.destination() }

    /// Wall time from the first read to the end of the stream.
    pub fn elapsed(&self) -> Duration { self.elapsed }
}

impl std::fmt::Debug for StagedPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagedPayload")
            .field("staging", &self.staging)
            .field("downloaded", &self.downloaded)
            .field("elapsed", &self.elapsed)
            .finish()
    }
}
