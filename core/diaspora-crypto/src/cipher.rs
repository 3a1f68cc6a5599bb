//! Payload encryption using AES-256-CBC with PKCS#7 padding.
//!
//! Each encrypted payload gets its own random key and IV. The pair travels
//! base64-encoded as [`CipherParams`], never inside the ciphertext.

use base64::{engine::general_purpose::STANDARD, Engine};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{CryptoError, CryptoResult};

/// Size of AES keys in bytes (256 bits).
pub const AES_KEY_SIZE: usize = 32;

/// Size of the CBC initialization vector in bytes (128 bits).
pub const AES_IV_SIZE: usize = 16;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Symmetric key and IV, both standard base64.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct CipherParams {
    pub key: String,
    pub iv: String,
}

impl CipherParams {
    /// Generates a fresh random key and IV.
    #[must_use]
    pub fn generate() -> Self {
        let mut key = Zeroizing::new([0u8; AES_KEY_SIZE]);
        let mut iv = [0u8; AES_IV_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut key[..]);
        rand::rngs::OsRng.fill_bytes(&mut iv);
        Self::from_bytes(&key, &iv)
    }

    /// Creates params from raw key and IV bytes.
    #[must_use]
    pub fn from_bytes(key: &[u8; AES_KEY_SIZE], iv: &[u8; AES_IV_SIZE]) -> Self {
        Self {
            key: STANDARD.encode(key),
            iv: STANDARD.encode(iv),
        }
    }

    /// Serializes to a JSON object `{"key": .., "iv": ..}`.
    pub fn to_json(&self) -> CryptoResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a JSON object `{"key": .., "iv": ..}`.
    pub fn from_json(json: &str) -> CryptoResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn decode(&self) -> CryptoResult<(Zeroizing<Vec<u8>>, Vec<u8>)> {
        let key = Zeroizing::new(
            STANDARD
                .decode(self.key.trim())
                .map_err(|e| CryptoError::InvalidKey(format!("invalid base64 key: {e}")))?,
        );
        let iv = STANDARD
            .decode(self.iv.trim())
            .map_err(|e| CryptoError::InvalidKey(format!("invalid base64 iv: {e}")))?;

        if key.len() != AES_KEY_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                expected: AES_KEY_SIZE,
                actual: key.len(),
            });
        }
        if iv.len() != AES_IV_SIZE {
            return Err(CryptoError::InvalidIvLength {
                expected: AES_IV_SIZE,
                actual: iv.len(),
            });
        }
        Ok((key, iv))
    }
}

impl std::fmt::Debug for CipherParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherParams")
            .field("key", &"[REDACTED]")
            .field("iv", &self.iv)
            .finish()
    }
}

/// Encrypts plaintext with the given params.
pub fn encrypt(params: &CipherParams, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
    let (key, iv) = params.decode()?;
    let cipher = Aes256CbcEnc::new_from_slices(&key, &iv)
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

/// Decrypts ciphertext with the given params.
pub fn decrypt(params: &CipherParams, ciphertext: &[u8]) -> CryptoResult<Vec<u8>> {
    let (key, iv) = params.decode()?;
    let cipher = Aes256CbcDec::new_from_slices(&key, &iv)
        .map_err(|e| CryptoError::Decryption(e.to_string()))?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptoError::Decryption("bad padding (wrong key or tampered data)".into()))
}
