// src/core/net.rs

use tracing::info;

use crate::BoxError;

/// Blocking GET. A non-success status is an error, never an empty body.
/// No retries; a failed fetch aborts the run and the operator re-runs,
/// resuming from whatever pages the cache already holds.
pub fn http_get(url: &str) -> Result<String, BoxError> {
    info!("loading {url}");
    let resp = reqwest::blocking::get(url)?.error_for_status()?;
    Ok(resp.text()?)
}
