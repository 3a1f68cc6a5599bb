use diaspora_crypto::CryptoError;

#[test]
fn error_display_key_generation() {
    let err = CryptoError::KeyGeneration("too small".into());
    assert!(format!("{err}").contains("key generation failed"));
    assert!(format!("{err}").contains("too small"));
}

#[test]
fn error_display_invalid_signature() {
    let err = CryptoError::InvalidSignature;
    assert_eq!(format!("{err}"), "signature verification failed");
}

#[test]
fn error_display_decryption() {
    let err = CryptoError::Decryption("bad padding".into());
    assert!(format!("{err}").contains("decryption failed"));
}

#[test]
fn error_display_invalid_lengths() {
    let key = CryptoError::InvalidKeyLength {
        expected: 32,
        actual: 16,
    };
    let msg = format!("{key}");
    assert!(msg.contains("32"));
    assert!(msg.contains("16"));

    let iv = CryptoError::InvalidIvLength {
        expected: 16,
        actual: 8,
    };
    assert!(format!("{iv}").contains("iv length"));
}

#[test]
fn error_from_serde_json() {
    let serde_err: Result<serde_json::Value, _> = serde_json::from_str("not json");
    let crypto_err: CryptoError = serde_err.unwrap_err().into();
    assert!(format!("{crypto_err}").contains("serialization"));
}
