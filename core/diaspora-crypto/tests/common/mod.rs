//! Shared test helpers for crypto tests.

#![allow(dead_code)]

use diaspora_crypto::PrivateKey;
use std::sync::OnceLock;

/// Key size for tests. Small enough to generate quickly, large enough for
/// PKCS#1 v1.5 wrapping of cipher params.
pub const TEST_KEY_BITS: usize = 1024;

/// A key pair shared by every test in the binary.
pub fn test_key() -> &'static PrivateKey {
    static KEY: OnceLock<PrivateKey> = OnceLock::new();
    KEY.get_or_init(|| PrivateKey::generate(TEST_KEY_BITS).unwrap())
}

/// A second, unrelated key pair.
pub fn other_key() -> &'static PrivateKey {
    static KEY: OnceLock<PrivateKey> = OnceLock::new();
    KEY.get_or_init(|| PrivateKey::generate(TEST_KEY_BITS).unwrap())
}
