// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token claims and the authenticated wallet they describe.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims carried by a session token.
///
/// Standard JWT names: `sub` is the wallet's base-58 public key, `iat` and
/// `exp` are unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (base-58 public key)
    pub sub: String,
    /// Issued at
    pub iat: i64,
    /// Expiration
    pub exp: i64,
}

/// Result of validating a structurally sound, correctly signed token.
///
/// Expiry is reported here instead of failing validation, because callers
/// answer "expired" differently from "invalid".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSession {
    pub subject: String,
    pub issued_at: i64,
    pub expires_at: i64,
    pub expired: bool,
}

/// The wallet behind an unexpired session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    /// Base-58 Ed25519 public key
    pub public_key: String,
    /// Unix timestamp the session was issued at
    pub issued_at: i64,
    /// Unix timestamp the session expires at
    pub expires_at: i64,
}

impl AuthenticatedUser {
    /// `None` for an expired session.
    pub fn from_session(session: ValidatedSession) -> Option<Self> {
        if session.expired {
            return None;
        }
        Some(Self {
            public_key: session.subject,
            issued_at: session.issued_at,
            expires_at: session.expires_at,
        })
    }
}
