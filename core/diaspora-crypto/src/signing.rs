//! RSA-SHA256 signing and verification (PKCS#1 v1.5 padding).

use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{SignatureEncoding, Signer as _, Verifier as _};
use sha2::Sha256;

use crate::error::{CryptoError, CryptoResult};
use crate::key::{PrivateKey, PublicKey};

impl PrivateKey {
    /// Signs a message and returns the raw signature bytes.
    pub fn sign(&self, message: &[u8]) -> CryptoResult<Vec<u8>> {
        let signing_key = SigningKey::<Sha256>::new(self.as_rsa().clone());
        signing_key
            .try_sign(message)
            .map(|sig| sig.to_vec())
            .map_err(|e| CryptoError::Signing(e.to_string()))
    }
}

impl PublicKey {
    /// Verifies a signature against a message.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> CryptoResult<()> {
        let verifying_key = VerifyingKey::<Sha256>::new(self.as_rsa().clone());
        let signature =
            Signature::try_from(signature).map_err(|_| CryptoError::InvalidSignature)?;
        verifying_key
            .verify(message, &signature)
            .map_err(|_| CryptoError::InvalidSignature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_verify_roundtrip() {
        let key = PrivateKey::generate(1024).unwrap();
        let sig = key.sign(b"hello world").unwrap();
        assert!(key.public_key().verify(b"hello world", &sig).is_ok());
    }

    #[test]
    fn wrong_message_fails() {
        let key = PrivateKey::generate(1024).unwrap();
        let sig = key.sign(b"correct").unwrap();
        assert!(key.public_key().verify(b"wrong", &sig).is_err());
    }

    #[test]
    fn signature_length_matches_modulus() {
        let key = PrivateKey::generate(1024).unwrap();
        let sig = key.sign(b"data").unwrap();
        assert_eq!(sig.len(), 128);
    }
}
