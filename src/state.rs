// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::auth::{ChallengeIssuer, NonceStore, SessionTokenService};
use crate::clock::Clock;
use crate::config::AppConfig;

/// Shared, read-mostly handler state. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<SessionTokenService>,
    pub challenges: Arc<ChallengeIssuer>,
    /// Require login messages to embed an issued, unused nonce.
    pub require_nonce: bool,
}

impl AppState {
    pub fn new(config: &AppConfig, clock: Arc<dyn Clock>) -> Self {
        let capacity = NonZeroUsize::new(config.nonce_capacity).unwrap_or(NonZeroUsize::MIN);
        let store = NonceStore::new(capacity, config.nonce_ttl, clock.clone());

        Self {
            tokens: Arc::new(SessionTokenService::new(&config.session_secret, clock)),
            challenges: Arc::new(ChallengeIssuer::new(Arc::new(store))),
            require_nonce: config.require_nonce,
        }
    }
}
