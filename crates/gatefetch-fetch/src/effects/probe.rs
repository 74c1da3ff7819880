use tracing::{debug, instrument};

use crate::core::content_type_matches;
use crate::data::{ProbeOptions, ProbeReport};
use crate::effects::http::HttpClient;
use crate::error::{FetchError, ProbeFailure, Result};

/// Validate a resource with a HEAD request before committing to a transfer.
///
/// Rejects unreachable resources, failure statuses, unexpected media types
/// and, if required, resources without a declared length.
#[instrument(level = "debug", skip(client, options), fields(url = %url))]
pub async fn probe<C: HttpClient>(client: &C, url: &str, options: &ProbeOptions) -> Result<ProbeReport> {
    let response = client
        .head(url, options.timeout)
        .await
        .map_err(|e| FetchError::probe(url, ProbeFailure::Request(e.to_string())))?;

    debug!(
        status = response.status,
        content_type = ?response.content_type,
        content_length = ?response.content_length,
        "probe response"
    );

    if !response.is_ok() {
        return Err(FetchError::probe(
            url,
            ProbeFailure::BadStatus {
                status: response.status,
                reason: response.reason,
            },
        ));
    }

    if let Some(expected) = &options.expected_content_type {
        let actual = response.content_type.as_deref().unwrap_or_default();
        if !content_type_matches(expected, actual) {
            return Err(FetchError::probe(
                url,
                ProbeFailure::ContentTypeMismatch {
                    expected: expected.clone(),
                    actual: actual.to_string(),
                },
            ));
        }
    }

    if options.require_content_length && response.content_length.is_none() {
        return Err(FetchError::probe(url, ProbeFailure::MissingContentLength));
    }

    Ok(ProbeReport {
        content_length: response.content_length,
        content_type: response.content_type,
    })
}
