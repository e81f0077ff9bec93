// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login challenges.
//!
//! The client asks for a nonce, embeds it in the message it signs (for
//! example `login:<nonce>`), and the login handler consumes it. Nonces are
//! 32 bytes from the OS CSPRNG, rendered as 64 lowercase hex characters.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rand::rngs::OsRng;
use rand::RngCore;

use super::nonce_store::NonceStore;
use crate::config::ConfigError;

pub const NONCE_LEN: usize = 32;
pub const NONCE_HEX_LEN: usize = NONCE_LEN * 2;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nonce([u8; NONCE_LEN]);

impl Nonce {
    pub fn from_bytes(bytes: [u8; NONCE_LEN]) -> Self {
        Self(bytes)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nonce({})", self.to_hex())
    }
}

/// Only the canonical lowercase form parses, so a nonce has one spelling.
impl FromStr for Nonce {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((index, c)) = s.char_indices().find(|(_, c)| c.is_ascii_uppercase()) {
            return Err(hex::FromHexError::InvalidHexCharacter { c, index });
        }
        let mut bytes = [0u8; NONCE_LEN];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

/// Every 64-character lowercase hex word in a signed message, in order.
///
/// Words are split on anything that is not ASCII alphanumeric, so
/// `login:<nonce>` and `Sign in (<nonce>)` both work. A message may carry
/// other hex values of the same length, such as a hash.
pub fn nonce_candidates(message: &str) -> impl Iterator<Item = Nonce> + '_ {
    message
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| word.len() == NONCE_HEX_LEN)
        .filter_map(|word| word.parse().ok())
}

/// Check once at startup that the OS random source works.
pub fn probe_entropy() -> Result<(), ConfigError> {
    let mut probe = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut probe)
        .map_err(|e| ConfigError::EntropyUnavailable(e.to_string()))
}

/// Issues nonces and remembers them for later consumption.
pub struct ChallengeIssuer {
    store: Arc<NonceStore>,
}

impl ChallengeIssuer {
    pub fn new(store: Arc<NonceStore>) -> Self {
        Self { store }
    }

    pub fn issue_nonce(&self) -> Nonce {
        let mut bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut bytes);
        let nonce = Nonce(bytes);
        self.store.insert(nonce);
        nonce
    }

    /// Consume the first outstanding nonce embedded in `message`.
    pub fn redeem(&self, message: &str) -> bool {
        nonce_candidates(message).any(|nonce| self.store.consume(&nonce))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use std::collections::HashSet;
    use std::num::NonZeroUsize;
    use std::time::Duration;

    fn issuer(capacity: usize) -> ChallengeIssuer {
        let store = NonceStore::new(
            NonZeroUsize::new(capacity).unwrap(),
            Duration::from_secs(300),
            Arc::new(SystemClock),
        );
        ChallengeIssuer::new(Arc::new(store))
    }

    #[test]
    fn nonce_is_64_lowercase_hex() {
        let nonce = issuer(4).issue_nonce().to_hex();
        assert_eq!(nonce.len(), 64);
        assert!(nonce
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn nonces_are_distinct() {
        let issuer = issuer(16);
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(issuer.issue_nonce()));
        }
    }

    #[test]
    fn redeem_consumes_embedded_nonce_once() {
        let issuer = issuer(4);
        let nonce = issuer.issue_nonce();
        let message = format!("login:{nonce}");

        assert!(issuer.redeem(&message));
        assert!(!issuer.redeem(&message));
    }

    #[test]
    fn redeem_rejects_message_without_nonce() {
        let issuer = issuer(4);
        issuer.issue_nonce();
        assert!(!issuer.redeem("login:please"));
    }

    #[test]
    fn redeem_skips_other_hex_words() {
        let issuer = issuer(4);
        let nonce = issuer.issue_nonce();
        let digest = Nonce::from_bytes([0x5a; 32]);
        let message = format!("Sign in\nsha256:{digest}\nnonce:{nonce}");

        assert!(issuer.redeem(&message));
        assert!(!issuer.redeem(&message));
    }

    #[test]
    fn candidates_are_found_in_order() {
        let first = Nonce::from_bytes([0xab; 32]);
        let second = Nonce::from_bytes([0xcd; 32]);
        let message = format!("Sign in to Example ({first}) key {second} at 12:00");
        assert_eq!(nonce_candidates(&message).collect::<Vec<_>>(), vec![first, second]);
        assert_eq!(nonce_candidates("login:abc").count(), 0);
    }

    #[test]
    fn uppercase_hex_does_not_parse() {
        let upper = Nonce::from_bytes([0xab; 32]).to_hex().to_uppercase();
        assert!(upper.parse::<Nonce>().is_err());
        assert_eq!(nonce_candidates(&format!("login:{upper}")).count(), 0);
    }

    #[test]
    fn entropy_probe_succeeds() {
        assert!(probe_entropy().is_ok());
    }
}
