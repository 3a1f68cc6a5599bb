use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;

/// URL-safe alphabet. Writes padding, accepts input with or without it.
const URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub(crate) fn urlsafe_encode(input: impl AsRef<[u8]>) -> String {
    URL_SAFE.encode(input)
}

pub(crate) fn urlsafe_decode(input: &str) -> Option<Vec<u8>> {
    URL_SAFE.decode(strip_whitespace(input)).ok()
}

pub(crate) fn encode(input: impl AsRef<[u8]>) -> String {
    STANDARD.encode(input)
}

pub(crate) fn decode(input: &str) -> Option<Vec<u8>> {
    STANDARD.decode(strip_whitespace(input)).ok()
}

fn strip_whitespace(input: &str) -> String {
    input.chars().filter(|c| !c.is_ascii_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urlsafe_pads_and_accepts_unpadded() {
        assert_eq!(urlsafe_encode(b"ab"), "YWI=");
        assert_eq!(urlsafe_decode("YWI").unwrap(), b"ab");
        assert_eq!(urlsafe_decode("YWI=").unwrap(), b"ab");
    }

    #[test]
    fn urlsafe_uses_url_alphabet() {
        assert_eq!(urlsafe_encode([0xfb, 0xff]), "-_8=");
    }

    #[test]
    fn line_breaks_are_ignored() {
        assert_eq!(decode("YW\nJj\n").unwrap(), b"abc");
    }
}
