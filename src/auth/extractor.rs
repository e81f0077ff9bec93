// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for bearer credentials.
//!
//! `BearerToken` only pulls the raw token out of the header; `/verify` uses
//! it because it must answer "expired" itself. `Auth` additionally validates
//! the token and rejects expired sessions:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::{AuthError, AuthenticatedUser};
use crate::state::AppState;

/// Raw token from `Authorization: Bearer <token>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

impl BearerToken {
    /// Parse a header value of the form `Bearer <token>`.
    pub fn parse(header: &str) -> Result<Self, AuthError> {
        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .ok_or(AuthError::MissingCredential)?;
        if token.is_empty() {
            return Err(AuthError::MissingCredential);
        }
        Ok(Self(token.to_string()))
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingCredential)?
            .to_str()
            .map_err(|_| AuthError::MissingCredential)?;
        Self::parse(header)
    }
}

/// Extractor for a wallet holding a valid, unexpired session.
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;
        let session = state.tokens.validate(&token)?;
        let user = AuthenticatedUser::from_session(session).ok_or(AuthError::TokenExpired)?;

        Ok(Auth(user))
    }
}
