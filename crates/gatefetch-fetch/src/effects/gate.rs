use std::path::Path;

use gatefetch_fs::{Staging, remove_if_exists};
use gatefetch_verify::Checksum;
use tracing::debug;

use crate::core::{Verdict, evaluate};
use crate::data::Downloaded;
use crate::effects::blocking::run_blocking;
use crate::effects::transfer::StagedPayload;
use crate::error::{FetchError, Result};

/// Run the integrity gate over a staged payload.
///
/// On pass the staging file replaces the destination. On failure the staging
/// file is dropped and any pre-existing destination is removed, so the
/// destination never holds an unverified payload.
pub async fn settle(payload: StagedPayload, checksum: Option<&Checksum>) -> Result<Downloaded> {
    let StagedPayload {
        staging,
        downloaded,
        hasher,
        ..
    } = payload;

    let digest = match evaluate(checksum, downloaded, hasher) {
        Verdict::Skipped => {
            debug!("no digest to verify");
            None
        }
        Verdict::Verified { digest } => {
            debug!(%digest, "digest verified");
            Some(digest)
        }
        Verdict::Empty => {
            debug!("nothing received, cannot verify digest");
            discard(staging).await;
            return Err(FetchError::EmptyPayload);
        }
        Verdict::Mismatch { expected, actual } => {
            debug!(%expected, %actual, "digest mismatch");
            discard(staging).await;
            return Err(FetchError::IntegrityMismatch { expected, actual });
        }
    };

    let path = run_blocking(move || Ok(staging.commit()?)).await?;
    Ok(Downloaded {
        path,
        bytes: downloaded,
        digest,
    })
}

/// Best-effort removal of a stale destination file.
pub(crate) async fn discard_destination(destination: &Path) {
    let target = destination.to_path_buf();
    let removed = run_blocking(move || Ok(remove_if_exists(&target)?)).await;
    log_removal(destination, removed);
}

/// Drop the staging file, then remove a stale destination.
async fn discard(staging: Staging) {
    let destination = staging.destination().to_path_buf();
    let target = destination.clone();
    let removed = run_blocking(move || {
        drop(staging);
        Ok(remove_if_exists(&target)?)
    })
    .await;
    log_removal(&destination, removed);
}

fn log_removal(destination: &Path, removed: Result<bool>) {
    match removed {
        Ok(true) => debug!(path = %destination.display(), "removed stale destination"),
        Ok(false) => {}
        Err(e) => debug!(path = %destination.display(), error = %e, "could not remove stale destination"),
    }
}
