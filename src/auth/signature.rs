// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ed25519 detached signature verification.
//!
//! Wallets submit their public key as base-58 and the signature as base-64.
//! Both are decoded into fixed-size arrays here, at the boundary, so nothing
//! of the wrong length ever reaches the curve arithmetic. The server only
//! ever sees public keys; private keys never leave the client.

use std::fmt;

use base64ct::{Base64, Encoding};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use thiserror::Error;

pub const PUBLIC_KEY_LEN: usize = 32;
pub const SIGNATURE_LEN: usize = 64;

/// Boundary decoding failure. Always a client error, never "bad signature".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("{field} is not valid {encoding}")]
    MalformedEncoding {
        field: &'static str,
        encoding: &'static str,
    },
    #[error("{field} must decode to {expected} bytes, got {actual}")]
    WrongLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl SignatureError {
    /// Name of the request field that failed to decode.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MalformedEncoding { field, .. } | Self::WrongLength { field, .. } => field,
        }
    }
}

/// A 32-byte Ed25519 public key; the wallet identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    pub const FIELD: &'static str = "publicKey";

    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_base58(text: &str) -> Result<Self, SignatureError> {
        let decoded = bs58::decode(text)
            .into_vec()
            .map_err(|_| SignatureError::MalformedEncoding {
                field: Self::FIELD,
                encoding: "base58",
            })?;
        let actual = decoded.len();
        let bytes: [u8; PUBLIC_KEY_LEN] =
            decoded
                .try_into()
                .map_err(|_| SignatureError::WrongLength {
                    field: Self::FIELD,
                    expected: PUBLIC_KEY_LEN,
                    actual,
                })?;
        Ok(Self(bytes))
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_base58())
    }
}

/// A 64-byte detached Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DetachedSignature([u8; SIGNATURE_LEN]);

impl DetachedSignature {
    pub const FIELD: &'static str = "signedMessage";

    pub fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_base64(text: &str) -> Result<Self, SignatureError> {
        let decoded = Base64::decode_vec(text).map_err(|_| SignatureError::MalformedEncoding {
            field: Self::FIELD,
            encoding: "base64",
        })?;
        let actual = decoded.len();
        let bytes: [u8; SIGNATURE_LEN] =
            decoded
                .try_into()
                .map_err(|_| SignatureError::WrongLength {
                    field: Self::FIELD,
                    expected: SIGNATURE_LEN,
                    actual,
                })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }
}

impl fmt::Debug for DetachedSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DetachedSignature(..)")
    }
}

/// Verify a detached Ed25519 signature over `message`.
///
/// Returns `false` for a bad signature and also for a public key that is not
/// a valid curve point.
pub fn verify(message: &[u8], signature: &DetachedSignature, public_key: &PublicKey) -> bool {
    let verifying_key = match VerifyingKey::from_bytes(public_key.as_bytes()) {
        Ok(k) => k,
        Err(_) => return false,
    };
    let sig = Signature::from_bytes(signature.as_bytes());
    verifying_key.verify(message, &sig).is_ok()
}

/// Decode boundary text and verify in one step.
///
/// The public key is decoded first, so a request with two bad fields reports
/// the key.
pub fn verify_encoded(
    message: &str,
    signature_base64: &str,
    public_key_base58: &str,
) -> Result<bool, SignatureError> {
    let public_key = PublicKey::from_base58(public_key_base58)?;
    let signature = DetachedSignature::from_base64(signature_base64)?;
    Ok(verify(message.as_bytes(), &signature, &public_key))
}

#[cfg(test)]
pub(crate) mod test_support {
    use base64ct::{Base64, Encoding};
    use ed25519_dalek::{Signer, SigningKey};
    use rand::rngs::OsRng;

    /// A throwaway wallet for tests.
    pub struct TestWallet {
        signing_key: SigningKey,
    }

    impl TestWallet {
        pub fn generate() -> Self {
            Self {
                signing_key: SigningKey::generate(&mut OsRng),
            }
        }

        pub fn public_key_base58(&self) -> String {
            bs58::encode(self.signing_key.verifying_key().as_bytes()).into_string()
        }

        pub fn sign(&self, message: &[u8]) -> [u8; 64] {
            self.signing_key.sign(message).to_bytes()
        }

        pub fn sign_base64(&self, message: &str) -> String {
            Base64::encode_string(&self.sign(message.as_bytes()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::TestWallet;
    use super::*;

    fn parts(wallet: &TestWallet, message: &[u8]) -> (DetachedSignature, PublicKey) {
        let signature = DetachedSignature::from_bytes(wallet.sign(message));
        let public_key = PublicKey::from_base58(&wallet.public_key_base58()).unwrap();
        (signature, public_key)
    }

    #[test]
    fn valid_signature_verifies() {
        for _ in 0..32 {
            let wallet = TestWallet::generate();
            let message = format!("login:{}", hex::encode(rand::random::<[u8; 32]>()));
            let (signature, public_key) = parts(&wallet, message.as_bytes());
            assert!(verify(message.as_bytes(), &signature, &public_key));
        }
    }

    #[test]
    fn any_signature_byte_flip_rejects() {
        let wallet = TestWallet::generate();
        let message = b"login:abc";
        let (signature, public_key) = parts(&wallet, message);

        for i in 0..SIGNATURE_LEN {
            let mut bytes = *signature.as_bytes();
            bytes[i] ^= 0x01;
            let tampered = DetachedSignature::from_bytes(bytes);
            assert!(!verify(message, &tampered, &public_key), "byte {i}");
        }
    }

    #[test]
    fn any_message_byte_flip_rejects() {
        let wallet = TestWallet::generate();
        let message = b"login:0123456789abcdef".to_vec();
        let (signature, public_key) = parts(&wallet, &message);

        for i in 0..message.len() {
            let mut tampered = message.clone();
            tampered[i] ^= 0x01;
            assert!(!verify(&tampered, &signature, &public_key), "byte {i}");
        }
    }

    #[test]
    fn wrong_key_rejects() {
        let signer = TestWallet::generate();
        let other = TestWallet::generate();
        let message = "login:nonce";
        let result =
            verify_encoded(message, &signer.sign_base64(message), &other.public_key_base58());
        assert_eq!(result, Ok(false));
    }

    #[test]
    fn encoded_round_trip() {
        let wallet = TestWallet::generate();
        let message = "Sign in to the app";
        let result =
            verify_encoded(message, &wallet.sign_base64(message), &wallet.public_key_base58());
        assert_eq!(result, Ok(true));
    }

    #[test]
    fn invalid_base64_is_a_decoding_error() {
        let wallet = TestWallet::generate();
        let err = verify_encoded("hello", "not-base64!", &wallet.public_key_base58()).unwrap_err();
        assert_eq!(
            err,
            SignatureError::MalformedEncoding {
                field: "signedMessage",
                encoding: "base64",
            }
        );
    }

    #[test]
    fn invalid_base58_is_a_decoding_error() {
        // '0', 'O', 'I' and 'l' are not in the base-58 alphabet.
        let err = PublicKey::from_base58("0OIl").unwrap_err();
        assert_eq!(err.field(), "publicKey");
        assert!(matches!(err, SignatureError::MalformedEncoding { .. }));
    }

    #[test]
    fn wrong_lengths_rejected_before_verification() {
        let short_key = bs58::encode([7u8; 16]).into_string();
        assert_eq!(
            PublicKey::from_base58(&short_key).unwrap_err(),
            SignatureError::WrongLength {
                field: "publicKey",
                expected: 32,
                actual: 16,
            }
        );

        let short_sig = Base64::encode_string(&[1u8; 32]);
        assert_eq!(
            DetachedSignature::from_base64(&short_sig).unwrap_err(),
            SignatureError::WrongLength {
                field: "signedMessage",
                expected: 64,
                actual: 32,
            }
        );
    }

    #[test]
    fn public_key_base58_round_trip() {
        let wallet = TestWallet::generate();
        let encoded = wallet.public_key_base58();
        let key = PublicKey::from_base58(&encoded).unwrap();
        assert_eq!(key.to_base58(), encoded);
        assert_eq!(key.to_string(), encoded);
    }
}
