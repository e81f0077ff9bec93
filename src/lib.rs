// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet Sign-In Server
//!
//! Authenticates a client by proof of possession of an Ed25519 private key
//! and issues a stateless, one-hour session token.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Nonces, signature verification and session tokens
//! - `clock` - Injectable time source
//! - `config` - Environment configuration

pub mod api;
pub mod auth;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod state;
