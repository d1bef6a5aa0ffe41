//! Wire types for the registry's client-facing API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for `POST /v0/auth/challenge`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeRequest {
    /// Authentication method requesting the challenge (`http` or `dns`).
    pub method: String,

    /// Domain ownership is being proven for.
    pub domain: String,
}

/// A registry-issued proof-of-control challenge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeGrant {
    /// Opaque challenge value the caller must publish at the
    /// method-specific well-known location.
    pub challenge: String,

    /// When the challenge stops being accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Request body for `POST /v0/auth/token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRequest {
    /// Authentication method the exchange belongs to.
    pub method: String,

    /// Domain the challenge was issued for (`http`/`dns` methods).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Proven challenge value (`http`/`dns` methods).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge: Option<String>,

    /// Ambient CI identity token (`github-oidc` method).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
}

/// A registry-scoped token issued after a successful exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenGrant {
    /// Bearer token accepted by the registry.
    pub token: String,

    /// Token expiry, if bounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Identity the registry associated with the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

/// Acknowledgement returned by a successful publication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishReceipt {
    /// Registry-assigned identifier for the published server version.
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_request_omits_absent_fields() {
        let request = TokenRequest {
            method: "github-oidc".to_string(),
            domain: None,
            challenge: None,
            id_token: Some("jwt".to_string()),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("id_token"));
        assert!(!json.contains("domain"));
        assert!(!json.contains("challenge"));
    }

    #[test]
    fn test_receipt_round_trip() {
        let receipt: PublishReceipt = serde_json::from_str(r#"{"id": "srv_01HZX"}"#).unwrap();
        assert_eq!(receipt.id, "srv_01HZX");
    }
}
