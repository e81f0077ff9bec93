// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Current session endpoint.

use axum::Json;

use crate::auth::Auth;
use crate::models::SessionResponse;

/// Get the wallet behind the presented session token.
#[utoipa::path(
    get,
    path = "/session",
    tag = "Auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Session details", body = SessionResponse),
        (status = 401, description = "Missing, invalid or expired token"),
    )
)]
pub async fn current_session(Auth(user): Auth) -> Json<SessionResponse> {
    Json(user.into())
}
