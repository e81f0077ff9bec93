// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bounded, TTL-limited set of outstanding login nonces.
//!
//! A nonce is recorded when issued and removed on first successful use, so a
//! signed login message cannot be replayed. When full, the least recently
//! issued nonce is evicted.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use lru::LruCache;

use super::challenge::Nonce;
use crate::clock::Clock;

pub struct NonceStore {
    entries: Mutex<LruCache<Nonce, DateTime<Utc>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl NonceStore {
    /// Create a store holding at most `capacity` nonces, each valid for `ttl`.
    pub fn new(capacity: NonZeroUsize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
            clock,
        }
    }

    pub fn insert(&self, nonce: Nonce) {
        let now = self.clock.now();
        if let Ok(mut entries) = self.entries.lock() {
            entries.put(nonce, now);
        }
    }

    /// Remove `nonce`, returning `true` only if it was outstanding and fresh.
    pub fn consume(&self, nonce: &Nonce) -> bool {
        let issued_at = match self.entries.lock() {
            Ok(mut entries) => entries.pop(nonce),
            Err(_) => None,
        };
        match issued_at {
            Some(issued_at) => !self.is_expired(issued_at),
            None => false,
        }
    }

    #[cfg(test)]
    fn contains(&self, nonce: &Nonce) -> bool {
        let issued_at = match self.entries.lock() {
            Ok(entries) => entries.peek(nonce).copied(),
            Err(_) => None,
        };
        issued_at.is_some_and(|t| !self.is_expired(t))
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    fn is_expired(&self, issued_at: DateTime<Utc>) -> bool {
        let age = self.clock.now().signed_duration_since(issued_at);
        age.to_std().map(|age| age >= self.ttl).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn store(capacity: usize, ttl_secs: u64) -> (NonceStore, ManualClock) {
        let clock = ManualClock::starting_now();
        let store = NonceStore::new(
            NonZeroUsize::new(capacity).unwrap(),
            Duration::from_secs(ttl_secs),
            Arc::new(clock.clone()),
        );
        (store, clock)
    }

    #[test]
    fn consume_succeeds_once() {
        let (store, _clock) = store(8, 300);
        let nonce = Nonce::from_bytes([1u8; 32]);
        store.insert(nonce);

        assert!(store.contains(&nonce));
        assert!(store.consume(&nonce));
        assert!(!store.consume(&nonce));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn unknown_nonce_is_rejected() {
        let (store, _clock) = store(8, 300);
        assert!(!store.consume(&Nonce::from_bytes([9u8; 32])));
    }

    #[test]
    fn expired_nonce_is_rejected() {
        let (store, clock) = store(8, 300);
        let nonce = Nonce::from_bytes([2u8; 32]);
        store.insert(nonce);

        clock.advance(chrono::Duration::seconds(300));

        assert!(!store.contains(&nonce));
        assert!(!store.consume(&nonce));
    }

    #[test]
    fn oldest_nonce_evicted_at_capacity() {
        let (store, _clock) = store(2, 300);
        let first = Nonce::from_bytes([1u8; 32]);
        let second = Nonce::from_bytes([2u8; 32]);
        let third = Nonce::from_bytes([3u8; 32]);
        store.insert(first);
        store.insert(second);
        store.insert(third);

        assert_eq!(store.len(), 2);
        assert!(!store.consume(&first));
        assert!(store.consume(&second));
        assert!(store.consume(&third));
    }
}
