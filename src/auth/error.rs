// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::signature::SignatureError;
use super::token::TokenError;

/// Authentication failure as seen at the HTTP boundary.
///
/// Every token problem renders the same `Invalid token` message; the
/// `error_code` field tells them apart for operators.
#[derive(Debug)]
pub enum AuthError {
    /// No usable `Authorization: Bearer <token>` header
    MissingCredential,
    /// Token could not be parsed
    MalformedToken,
    /// Token tag does not match its contents
    TokenIntegrityFailure,
    /// Token is genuine but past its expiry
    TokenExpired,
    /// Login signature does not verify under the claimed key
    InvalidSignature,
    /// Signed message does not embed an outstanding nonce
    NonceRejected,
    /// A login field is missing or badly encoded
    MalformedEncoding(String),
    /// Internal error
    Internal(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::MalformedToken => "malformed_token",
            AuthError::TokenIntegrityFailure => "token_integrity_failure",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::NonceRejected => "nonce_rejected",
            AuthError::MalformedEncoding(_) => "malformed_encoding",
            AuthError::Internal(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredential
            | AuthError::MalformedToken
            | AuthError::TokenIntegrityFailure
            | AuthError::TokenExpired
            | AuthError::InvalidSignature
            | AuthError::NonceRejected => StatusCode::UNAUTHORIZED,
            AuthError::MalformedEncoding(_) => StatusCode::BAD_REQUEST,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingCredential
            | AuthError::MalformedToken
            | AuthError::TokenIntegrityFailure => write!(f, "Invalid token"),
            AuthError::TokenExpired => write!(f, "Token has expired"),
            AuthError::InvalidSignature => write!(f, "Invalid signature."),
            AuthError::NonceRejected => write!(f, "Invalid or expired nonce."),
            AuthError::MalformedEncoding(msg) => write!(f, "{msg}"),
            AuthError::Internal(msg) => write!(f, "Internal authentication error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<SignatureError> for AuthError {
    fn from(err: SignatureError) -> Self {
        AuthError::MalformedEncoding(err.to_string())
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::MalformedToken | TokenError::EmptySubject => AuthError::MalformedToken,
            TokenError::TokenIntegrityFailure => AuthError::TokenIntegrityFailure,
            TokenError::Encoding(msg) => AuthError::Internal(msg),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
