//! URL helper functions

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters kept verbatim by `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single path segment for use inside a fragment link
pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

/// Decode a percent-encoded route parameter
pub fn decode_component(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("hello-world"), "hello-world");
        assert_eq!(encode_component("a b/c"), "a%20b%2Fc");
        assert_eq!(encode_component("한글"), "%ED%95%9C%EA%B8%80");
    }

    #[test]
    fn test_decode_component() {
        assert_eq!(decode_component("a%20b%2Fc"), "a b/c");
        assert_eq!(decode_component("plain"), "plain");
    }

    #[test]
    fn test_round_trip() {
        let name = "systems & networks";
        assert_eq!(decode_component(&encode_component(name)), name);
    }
}
