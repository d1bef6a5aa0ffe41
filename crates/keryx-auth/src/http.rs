//! HTTP well-known endpoint challenge verification.

use std::time::Duration;

use crate::error::AuthError;

/// Well-known path the challenge value must be served from.
pub const WELL_KNOWN_PATH: &str = "/.well-known/keryx-challenge";

/// Returns the well-known challenge URL for a domain.
#[must_use]
pub fn well_known_url(domain: &str) -> String {
    format!("https://{domain}{WELL_KNOWN_PATH}")
}

/// Verifies that `url` serves the expected challenge value.
///
/// The body is matched line-wise so the endpoint may serve other content
/// (older challenges, comments) alongside the current value.
///
/// # Errors
///
/// Returns [`AuthError::ChallengeFailed`] on connect failure, timeout,
/// a non-2xx answer, or a body that does not contain the challenge.
pub(crate) async fn verify_challenge_at(
    url: &str,
    challenge: &str,
    timeout: Duration,
) -> Result<(), AuthError> {
    let http = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AuthError::ChallengeFailed {
            reason: format!("failed to build HTTP client: {e}"),
        })?;

    let response = http
        .get(url)
        .send()
        .await
        .map_err(|e| AuthError::ChallengeFailed {
            reason: format!("could not fetch {url}: {e}"),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(AuthError::ChallengeFailed {
            reason: format!("{url} returned {status}"),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| AuthError::ChallengeFailed {
            reason: format!("could not read challenge body from {url}: {e}"),
        })?;

    if body.lines().any(|line| line.trim() == challenge) {
        tracing::debug!(url, "HTTP challenge verified");
        Ok(())
    } else {
        Err(AuthError::ChallengeFailed {
            reason: format!("{url} does not serve the expected challenge value"),
        })
    }
}
