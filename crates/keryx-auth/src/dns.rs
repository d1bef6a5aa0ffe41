//! DNS TXT record challenge verification.

use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::TokioAsyncResolver;

use crate::error::AuthError;

/// Subdomain label the challenge TXT record must live under.
pub const CHALLENGE_LABEL: &str = "_keryx-challenge";

/// Returns the fully qualified TXT record name for a domain.
#[must_use]
pub fn challenge_record_name(domain: &str) -> String {
    format!("{CHALLENGE_LABEL}.{domain}")
}

/// Verifies that the challenge TXT record is present for `domain`.
///
/// # Errors
///
/// Returns [`AuthError::DnsRecordMissing`] when no TXT record carries the
/// challenge value, [`AuthError::DnsTimeout`] when the lookup does not
/// complete within `timeout`, and [`AuthError::ChallengeFailed`] for other
/// resolver failures.
pub(crate) async fn verify_txt_challenge(
    domain: &str,
    challenge: &str,
    timeout: Duration,
) -> Result<(), AuthError> {
    let record = challenge_record_name(domain);

    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    let resolver = TokioAsyncResolver::tokio(ResolverConfig::default(), opts);

    match resolver.txt_lookup(record.as_str()).await {
        Ok(lookup) => {
            let values: Vec<String> = lookup
                .iter()
                .map(|txt| {
                    txt.txt_data()
                        .iter()
                        .map(|part| String::from_utf8_lossy(part))
                        .collect()
                })
                .collect();

            if challenge_found(&values, challenge) {
                tracing::debug!(record, "DNS challenge verified");
                Ok(())
            } else {
                Err(AuthError::DnsRecordMissing { record })
            }
        }
        Err(e) => match e.kind() {
            ResolveErrorKind::NoRecordsFound { .. } => {
                Err(AuthError::DnsRecordMissing { record })
            }
            ResolveErrorKind::Timeout => Err(AuthError::DnsTimeout { record }),
            _ => Err(AuthError::ChallengeFailed {
                reason: format!("DNS lookup for {record} failed: {e}"),
            }),
        },
    }
}

/// Returns true if any TXT value matches the challenge.
fn challenge_found(values: &[String], challenge: &str) -> bool {
    values.iter().any(|value| value.trim() == challenge)
}
