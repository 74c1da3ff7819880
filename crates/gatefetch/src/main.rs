use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use gatefetch_fetch::{Fetcher, ProgressObservers, ReqwestClient};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{App, ProgressMode};
use crate::tracker::{ProgressTracker, json_lines};

mod cli;
mod tracker;

#[tokio::main]
async fn main() -> ExitCode {
    let app = App::parse();
    init_tracing(app.log_filter());

    match run(app).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(app: App) -> Result<()> {
    let client = ReqwestClient::with_settings(app.client_settings()).context("failed to build HTTP client")?;
    let fetcher = Fetcher::new(client);

    let cancel = CancellationToken::new();
    let tracker = (app.progress == ProgressMode::Bar).then(ProgressTracker::new);

    let mut observers = ProgressObservers::new();
    match (app.progress, &tracker) {
        (ProgressMode::Bar, Some(tracker)) => observers.subscribe_observer(Arc::new(tracker.clone())),
        (ProgressMode::Json, _) => observers.subscribe(json_lines),
        _ => {}
    }

    let request = app.request().observers(observers).cancel_token(cancel.clone());

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling transfer");
            cancel.cancel();
        }
    });

    info!(url = %request.url, destination = %request.destination.display(), "starting download");
    let result = fetcher.try_download(&request).await;

    if let Some(tracker) = &tracker {
        tracker.abandon();
    }

    let downloaded = result.with_context(|| format!("failed to download {}", request.url))?;
    match &downloaded.digest {
        Some(digest) => info!(path = %downloaded.path.display(), %digest, "saved and verified"),
        None => info!(path = %downloaded.path.display(), "saved"),
    }
    Ok(())
}
