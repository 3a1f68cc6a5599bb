//! RSA key pairs.
//!
//! Keys are exchanged as PEM. Private keys are written as PKCS#1
//! (`BEGIN RSA PRIVATE KEY`), public keys as SubjectPublicKeyInfo
//! (`BEGIN PUBLIC KEY`); both PKCS#1 and PKCS#8/SPKI are accepted on input.

use rand::rngs::OsRng;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};

use crate::error::{CryptoError, CryptoResult};

/// Key size used for newly generated person keys.
pub const DEFAULT_KEY_BITS: usize = 4096;

/// An RSA private key.
#[derive(Clone)]
pub struct PrivateKey(RsaPrivateKey);

/// An RSA public key.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey(RsaPublicKey);

impl PrivateKey {
    /// Generates a new random key of `bits` size.
    pub fn generate(bits: usize) -> CryptoResult<Self> {
        RsaPrivateKey::new(&mut OsRng, bits)
            .map(Self)
            .map_err(|e| CryptoError::KeyGeneration(e.to_string()))
    }

    /// Decodes a PKCS#1 or PKCS#8 PEM document.
    pub fn from_pem(pem: &str) -> CryptoResult<Self> {
        let pem = pem.trim();
        RsaPrivateKey::from_pkcs1_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs8_pem(pem))
            .map(Self)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))
    }

    /// Encodes as a PKCS#1 PEM document.
    pub fn to_pem(&self) -> CryptoResult<String> {
        let pem = self
            .0
            .to_pkcs1_pem(LineEnding::LF)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        Ok(pem.as_str().to_owned())
    }

    /// Returns the matching public key.
    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.to_public_key())
    }

    /// Modulus size in bits.
    #[must_use]
    pub fn size_bits(&self) -> usize {
        self.0.size() * 8
    }

    /// Decrypts data wrapped with [`PublicKey::encrypt`].
    pub fn decrypt(&self, ciphertext: &[u8]) -> CryptoResult<Vec<u8>> {
        self.0
            .decrypt(Pkcs1v15Encrypt, ciphertext)
            .map_err(|e| CryptoError::Decryption(e.to_string()))
    }

    pub(crate) fn as_rsa(&self) -> &RsaPrivateKey {
        &self.0
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("bits", &self.size_bits())
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl PublicKey {
    /// Decodes an SPKI or PKCS#1 PEM document.
    pub fn from_pem(pem: &str) -> CryptoResult<Self> {
        let pem = pem.trim();
        RsaPublicKey::from_public_key_pem(pem)
            .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
            .map(Self)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))
    }

    /// Encodes as an SPKI PEM document.
    pub fn to_pem(&self) -> CryptoResult<String> {
        self.0
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))
    }

    /// Modulus size in bits.
    #[must_use]
    pub fn size_bits(&self) -> usize {
        self.0.size() * 8
    }

    /// Wraps a short secret (PKCS#1 v1.5) so only the private key holder can read it.
    ///
    /// The plaintext must be at most `size_bits() / 8 - 11` bytes.
    pub fn encrypt(&self, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        self.0
            .encrypt(&mut OsRng, Pkcs1v15Encrypt, plaintext)
            .map_err(|e| CryptoError::Encryption(e.to_string()))
    }

    pub(crate) fn as_rsa(&self) -> &RsaPublicKey {
        &self.0
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicKey")
            .field("bits", &self.size_bits())
            .finish()
    }
}
