// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Sign-in endpoints: nonce, login and verify.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::{
    auth::{signature, AuthError, BearerToken, DetachedSignature, PublicKey},
    error::ApiError,
    models::{LoginRequest, NonceResponse, VerifyResponse, VerifyStatus},
    state::AppState,
};

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, ApiError> {
    value
        .as_deref()
        .ok_or_else(|| ApiError::bad_request(format!("{field} is required")))
}

/// Issue a fresh login nonce.
#[utoipa::path(
    get,
    path = "/api/nonce",
    tag = "Auth",
    responses((status = 200, description = "Fresh single-use nonce", body = NonceResponse))
)]
pub async fn get_nonce(State(state): State<AppState>) -> Json<NonceResponse> {
    let nonce = state.challenges.issue_nonce();
    tracing::debug!("Issued login nonce");
    Json(NonceResponse {
        nonce: nonce.to_hex(),
    })
}

/// Exchange a wallet signature for a session token.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session token", body = String),
        (status = 400, description = "Missing or badly encoded field"),
        (status = 401, description = "Invalid signature or nonce"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<String>, ApiError> {
    let Json(request) = payload?;

    let public_key_text = required(&request.public_key, PublicKey::FIELD)?;
    let signature_text = required(&request.signed_message, DetachedSignature::FIELD)?;
    let message = required(&request.message, "message")?;

    let public_key = PublicKey::from_base58(public_key_text).map_err(AuthError::from)?;
    let signature = DetachedSignature::from_base64(signature_text).map_err(AuthError::from)?;

    if !signature::verify(message.as_bytes(), &signature, &public_key) {
        tracing::warn!(public_key = %public_key, "Login rejected: invalid signature");
        return Err(AuthError::InvalidSignature.into());
    }

    if state.require_nonce && !state.challenges.redeem(message) {
        tracing::warn!(public_key = %public_key, "Login rejected: unknown, expired or reused nonce");
        return Err(AuthError::NonceRejected.into());
    }

    let token = state
        .tokens
        .issue(&public_key.to_base58())
        .map_err(AuthError::from)?;

    tracing::info!(public_key = %public_key, "Login succeeded");
    Ok(Json(token))
}

/// Check a bearer token.
///
/// An expired but genuine token is a 200 with `tokenExpired`, so the client
/// can prompt for a fresh signature instead of treating it as an attack.
#[utoipa::path(
    post,
    path = "/verify",
    tag = "Auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Token status", body = VerifyResponse),
        (status = 401, description = "Missing, malformed or tampered token"),
    )
)]
pub async fn verify(
    State(state): State<AppState>,
    bearer: Result<BearerToken, AuthError>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let BearerToken(token) = bearer.inspect_err(|_| {
        tracing::warn!("Verify rejected: missing or malformed Authorization header");
    })?;

    let session = state.tokens.validate(&token).map_err(|e| {
        tracing::warn!(error = %e, "Verify rejected");
        AuthError::from(e)
    })?;

    let message = if session.expired {
        tracing::info!(public_key = %session.subject, "Verify: token expired");
        VerifyStatus::TokenExpired
    } else {
        tracing::debug!(public_key = %session.subject, "Verify: ok");
        VerifyStatus::Ok
    };

    Ok(Json(VerifyResponse { message }))
}
