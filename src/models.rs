// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies for the sign-in endpoints. Field names are
//! camelCase on the wire to match what browser wallets send.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::AuthenticatedUser;

/// Response for `GET /api/nonce`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NonceResponse {
    /// 64 lowercase hex characters
    #[schema(example = "9f2c4e7a0b1d3f5e6a8c9b0d2e4f6a8c1b3d5f7e9a0c2e4b6d8f0a1c3e5b7d9f")]
    pub nonce: String,
}

/// Body of `POST /login`.
///
/// Fields are optional at the serde layer so a missing one is reported by
/// name instead of as a generic deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Base-64 detached Ed25519 signature over `message`
    #[serde(default)]
    pub signed_message: Option<String>,
    /// The exact UTF-8 text the wallet signed
    #[serde(default)]
    #[schema(example = "login:9f2c4e7a0b1d3f5e6a8c9b0d2e4f6a8c1b3d5f7e9a0c2e4b6d8f0a1c3e5b7d9f")]
    pub message: Option<String>,
    /// Base-58 Ed25519 public key
    #[serde(default)]
    pub public_key: Option<String>,
}

/// Outcome reported by `POST /verify`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum VerifyStatus {
    #[serde(rename = "ok")]
    Ok,
    #[serde(rename = "tokenExpired")]
    TokenExpired,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifyResponse {
    pub message: VerifyStatus,
}

/// Response for `GET /session`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub public_key: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl From<AuthenticatedUser> for SessionResponse {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            public_key: user.public_key,
            issued_at: user.issued_at,
            expires_at: user.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_reads_camel_case() {
        let req: LoginRequest = serde_json::from_str(
            r#"{"signedMessage":"c2ln","message":"login:x","publicKey":"abc"}"#,
        )
        .unwrap();
        assert_eq!(req.signed_message.as_deref(), Some("c2ln"));
        assert_eq!(req.message.as_deref(), Some("login:x"));
        assert_eq!(req.public_key.as_deref(), Some("abc"));
    }

    #[test]
    fn login_request_tolerates_missing_fields() {
        let req: LoginRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert!(req.signed_message.is_none());
        assert!(req.public_key.is_none());
    }

    #[test]
    fn verify_status_wire_names() {
        let ok = serde_json::to_string(&VerifyResponse {
            message: VerifyStatus::Ok,
        })
        .unwrap();
        assert_eq!(ok, r#"{"message":"ok"}"#);

        let expired = serde_json::to_string(&VerifyResponse {
            message: VerifyStatus::TokenExpired,
        })
        .unwrap();
        assert_eq!(expired, r#"{"message":"tokenExpired"}"#);
    }
}
