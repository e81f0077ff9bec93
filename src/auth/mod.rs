// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Sign-in with wallet: the client proves it holds the Ed25519 private key
//! for a public key and receives a one-hour session token.
//!
//! ## Auth Flow
//!
//! 1. Client fetches a nonce (`GET /api/nonce`)
//! 2. Wallet signs a message embedding it, e.g. `login:<nonce>`
//! 3. Client posts `{signedMessage, message, publicKey}` to `/login`
//! 4. Server:
//!    - decodes the base-58 key and base-64 signature into fixed arrays
//!    - verifies the Ed25519 signature over the exact message bytes
//!    - consumes the embedded nonce (single use, short TTL)
//!    - mints an HS256 JWT with `sub` = public key
//! 5. Client sends `Authorization: Bearer <token>` afterwards
//!
//! ## Security
//!
//! - Private keys never reach the server
//! - Session tokens are stateless and cannot be revoked before expiry
//! - The HMAC secret, signatures and tokens are never logged

pub mod challenge;
pub mod claims;
pub mod error;
pub mod extractor;
pub mod nonce_store;
pub mod signature;
pub mod token;

pub use challenge::{ChallengeIssuer, Nonce};
pub use claims::{AuthenticatedUser, ValidatedSession};
pub use error::AuthError;
pub use extractor::{Auth, BearerToken};
pub use nonce_store::NonceStore;
pub use signature::{DetachedSignature, PublicKey, SignatureError};
pub use token::{SessionTokenService, TokenError};
