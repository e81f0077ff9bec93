// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Stateless session tokens (HS256 JWT).
//!
//! The token is the whole session record: nothing is stored server-side.
//! Tokens live for one hour and cannot be revoked early; rotating the
//! secret invalidates every outstanding token.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use super::claims::{SessionClaims, ValidatedSession};
use crate::clock::Clock;
use crate::config::SessionSecret;

/// Fixed session lifetime, in seconds.
pub const SESSION_TTL_SECS: i64 = 3600;

const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("session subject must not be empty")]
    EmptySubject,
    #[error("token is malformed")]
    MalformedToken,
    #[error("token integrity check failed")]
    TokenIntegrityFailure,
    #[error("failed to encode token: {0}")]
    Encoding(String),
}

pub struct SessionTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl SessionTokenService {
    pub fn new(secret: &SessionSecret, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        // Expiry is checked against the injected clock and reported, not rejected.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "iat", "exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            clock,
        }
    }

    /// Mint a token for `subject`, valid for [`SESSION_TTL_SECS`] from now.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        if subject.is_empty() {
            return Err(TokenError::EmptySubject);
        }
        let now = self.clock.now();
        let claims = SessionClaims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(SESSION_TTL_SECS)).timestamp(),
        };
        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Check structure and integrity, then report whether the token expired.
    pub fn validate(&self, token: &str) -> Result<ValidatedSession, TokenError> {
        let header = decode_header(token).map_err(|_| TokenError::MalformedToken)?;
        if header.alg != ALGORITHM {
            return Err(TokenError::MalformedToken);
        }

        // The header is known good here, so a base64 failure can only come
        // from the tag segment.
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::Base64(_) => {
                    TokenError::TokenIntegrityFailure
                }
                _ => TokenError::MalformedToken,
            },
        )?;

        let claims = data.claims;
        if claims.sub.is_empty() {
            return Err(TokenError::MalformedToken);
        }
        let expired = self.clock.now().timestamp() >= claims.exp;

        Ok(ValidatedSession {
            subject: claims.sub,
            issued_at: claims.iat,
            expires_at: claims.exp,
            expired,
        })
    }
}
