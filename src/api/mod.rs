// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{LoginRequest, NonceResponse, SessionResponse, VerifyResponse, VerifyStatus},
    state::AppState,
};

pub mod auth;
pub mod health;
pub mod session;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/api/nonce", get(auth::get_nonce))
        .route("/login", post(auth::login))
        .route("/verify", post(auth::verify))
        .route("/session", get(session::current_session))
        .route("/health", get(health::liveness))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::get_nonce,
        auth::login,
        auth::verify,
        session::current_session,
        health::liveness
    ),
    components(
        schemas(
            NonceResponse,
            LoginRequest,
            VerifyResponse,
            VerifyStatus,
            SessionResponse,
            health::HealthResponse
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "Auth", description = "Sign-in with wallet"),
        (name = "Health", description = "Liveness")
    )
)]
struct ApiDoc;
