//! Transfer encodings and header-word encoding.
//!
//! Supports Base64, Quoted-Printable, and RFC 2047 header encoding.

use crate::error::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;
use std::fmt::Write as _;

/// Content transfer encodings (RFC 2045 section 6).
///
/// The 7bit, 8bit and binary forms are identity encodings: bytes pass
/// through unchanged and only the declared label differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferEncoding {
    /// 7-bit ASCII, written as-is.
    #[default]
    SevenBit,
    /// 8-bit data, written as-is.
    EightBit,
    /// Raw binary, written as-is.
    Binary,
    /// Base64 encoding.
    Base64,
    /// Quoted-Printable encoding.
    QuotedPrintable,
}

impl TransferEncoding {
    /// Returns true when bytes pass through unchanged under this encoding.
    #[must_use]
    pub const fn is_identity(self) -> bool {
        matches!(self, Self::SevenBit | Self::EightBit | Self::Binary)
    }

    /// Encodes raw content bytes into their on-the-wire representation.
    #[must_use]
    pub fn encode(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Base64 => encode_base64_wrapped(data).into_bytes(),
            Self::QuotedPrintable => encode_quoted_printable(data).into_bytes(),
            Self::SevenBit | Self::EightBit | Self::Binary => data.to_vec(),
        }
    }

    /// Decodes on-the-wire bytes back into raw content.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid for this encoding.
    pub fn decode(self, data: &[u8]) -> Result<Vec<u8>> {
        match self {
            Self::Base64 => {
                let text = String::from_utf8_lossy(data);
                // Remove whitespace for lenient parsing
                let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
                decode_base64(&cleaned)
            }
            Self::QuotedPrintable => decode_quoted_printable(&String::from_utf8_lossy(data)),
            Self::SevenBit | Self::EightBit | Self::Binary => Ok(data.to_vec()),
        }
    }
}

impl fmt::Display for TransferEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SevenBit => write!(f, "7bit"),
            Self::EightBit => write!(f, "8bit"),
            Self::Binary => write!(f, "binary"),
            Self::Base64 => write!(f, "base64"),
            Self::QuotedPrintable => write!(f, "quoted-printable"),
        }
    }
}

/// Encodes data as Base64 on a single line.
#[must_use]
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decodes Base64 data.
///
/// # Errors
///
/// Returns an error if the input is not valid Base64.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    STANDARD.decode(data).map_err(Into::into)
}

/// Maximum line length for encoded body data.
const MAX_LINE_LENGTH: usize = 76;

/// Encodes data as Base64 wrapped at 76 columns for message bodies.
#[must_use]
pub fn encode_base64_wrapped(data: &[u8]) -> String {
    let encoded = STANDARD.encode(data);
    let mut result = String::with_capacity(encoded.len() + encoded.len() / MAX_LINE_LENGTH + 1);
    for (i, c) in encoded.chars().enumerate() {
        if i > 0 && i % MAX_LINE_LENGTH == 0 {
            result.push('\n');
        }
        result.push(c);
    }
    result
}

/// Encodes bytes using Quoted-Printable encoding (RFC 2045).
///
/// Every byte outside the printable ASCII range is escaped, so arbitrary
/// binary input survives a decode round trip.
#[must_use]
pub fn encode_quoted_printable(data: &[u8]) -> String {
    let mut result = String::new();
    let mut line_length = 0;

    for &byte in data {
        // Soft line break before the escape would overflow the line
        if line_length >= MAX_LINE_LENGTH - 3 {
            result.push_str("=\n");
            line_length = 0;
        }

        match byte {
            // Printable ASCII except '=' and space (handled separately)
            b'!'..=b'<' | b'>'..=b'~' => {
                result.push(byte as char);
                line_length += 1;
            }
            // Space must be escaped at the end of a line
            b' ' => {
                if line_length >= MAX_LINE_LENGTH - 1 {
                    result.push_str("=20");
                    line_length += 3;
                } else {
                    result.push(' ');
                    line_length += 1;
                }
            }
            // Everything else gets escaped
            _ => {
                result.push('=');
                let _ = write!(result, "{byte:02X}");
                line_length += 3;
            }
        }
    }

    result
}

/// Decodes Quoted-Printable text (RFC 2045).
///
/// # Errors
///
/// Returns an error if the input contains invalid escape sequences.
pub fn decode_quoted_printable(text: &str) -> Result<Vec<u8>> {
    let mut result = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '=' {
            // Soft line break
            if chars.peek() == Some(&'\r') {
                chars.next();
                if chars.peek() == Some(&'\n') {
                    chars.next();
                    continue;
                }
            } else if chars.peek() == Some(&'\n') {
                chars.next();
                continue;
            }

            // Hex encoded byte
            let hex: String = chars.by_ref().take(2).collect();
            if hex.len() == 2 {
                let byte = u8::from_str_radix(&hex, 16)
                    .map_err(|e| Error::InvalidEncoding(format!("invalid hex: {e}")))?;
                result.push(byte);
            } else {
                return Err(Error::InvalidEncoding(
                    "incomplete escape sequence".to_string(),
                ));
            }
        } else {
            result.push(ch as u8);
        }
    }

    Ok(result)
}

/// Encodes one header word using RFC 2047 B-encoding.
///
/// Format: `=?charset?B?encoded-text?=`. Pure ASCII words without `=` or
/// `?` are returned unchanged.
#[must_use]
pub fn encode_rfc2047(text: &str, charset: &str) -> String {
    if text.chars().all(|c| c.is_ascii() && c != '=' && c != '?') {
        return text.to_string();
    }

    let encoded = encode_base64(text.as_bytes());
    format!("=?{charset}?B?{encoded}?=")
}

/// Encodes a header value word by word, leaving ASCII words untouched.
///
/// Only the words that need it are wrapped in encoded-word form, so
/// address syntax like `<user@example.com>` survives encoding.
#[must_use]
pub fn encode_header_text(text: &str) -> String {
    if text.is_ascii() && !text.contains("=?") {
        return text.to_string();
    }

    text.split(' ')
        .map(|word| {
            if word.is_ascii() && !word.contains("=?") {
                word.to_string()
            } else {
                encode_rfc2047(word, "utf-8")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decodes an RFC 2047 encoded header word.
///
/// Values not in `=?charset?encoding?text?=` form are returned unchanged.
///
/// # Errors
///
/// Returns an error if the encoded payload is malformed.
pub fn decode_rfc2047(text: &str) -> Result<String> {
    if !text.starts_with("=?") || !text.ends_with("?=") {
        return Ok(text.to_string());
    }

    let inner = &text[2..text.len() - 2];
    let parts: Vec<&str> = inner.split('?').collect();

    if parts.len() != 3 {
        return Err(Error::InvalidEncoding("invalid RFC 2047 format".to_string()));
    }

    let encoding = parts[1].to_uppercase();
    let encoded_text = parts[2];

    match encoding.as_str() {
        "B" => {
            let decoded = decode_base64(encoded_text)?;
            String::from_utf8(decoded).map_err(Into::into)
        }
        "Q" => {
            // Quoted-Printable with underscore for space
            let text_with_spaces = encoded_text.replace('_', " ");
            let decoded = decode_quoted_printable(&text_with_spaces)?;
            String::from_utf8(decoded).map_err(Into::into)
        }
        _ => Err(Error::InvalidEncoding(format!(
            "unknown encoding: {encoding}"
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_base64_encode_decode() {
        let data = b"Hello, World!";
        let encoded = encode_base64(data);
        assert_eq!(encoded, "SGVsbG8sIFdvcmxkIQ==");

        let decoded = decode_base64(&encoded).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_base64_wrapped_line_length() {
        let data = vec![0xAB; 300];
        let encoded = encode_base64_wrapped(&data);
        for line in encoded.lines() {
            assert!(line.len() <= MAX_LINE_LENGTH);
        }

        let cleaned: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(decode_base64(&cleaned).unwrap(), data);
    }

    #[test]
    fn test_quoted_printable_encode() {
        assert_eq!(encode_quoted_printable(b"Hello, World!"), "Hello, World!");

        let encoded = encode_quoted_printable("Héllo, Wørld!".as_bytes());
        assert!(encoded.contains("=C3"));
    }

    #[test]
    fn test_quoted_printable_decode() {
        assert_eq!(
            decode_quoted_printable("Hello, World!").unwrap(),
            b"Hello, World!"
        );
        assert_eq!(
            decode_quoted_printable("H=C3=A9llo").unwrap(),
            "Héllo".as_bytes()
        );
    }

    #[test]
    fn test_quoted_printable_soft_line_break() {
        assert_eq!(decode_quoted_printable("Hello=\r\nWorld").unwrap(), b"HelloWorld");
        assert_eq!(decode_quoted_printable("Hello=\nWorld").unwrap(), b"HelloWorld");
    }

    #[test]
    fn test_transfer_encoding_display() {
        assert_eq!(TransferEncoding::SevenBit.to_string(), "7bit");
        assert_eq!(TransferEncoding::Base64.to_string(), "base64");
        assert_eq!(
            TransferEncoding::QuotedPrintable.to_string(),
            "quoted-printable"
        );
    }

    #[test]
    fn test_transfer_encoding_identity() {
        assert!(TransferEncoding::SevenBit.is_identity());
        assert!(TransferEncoding::Binary.is_identity());
        assert!(!TransferEncoding::Base64.is_identity());

        let data = b"raw bytes".to_vec();
        assert_eq!(TransferEncoding::EightBit.encode(&data), data);
        assert_eq!(TransferEncoding::EightBit.decode(&data).unwrap(), data);
    }

    #[test]
    fn test_rfc2047_encode() {
        assert_eq!(encode_rfc2047("Hello", "utf-8"), "Hello");

        let encoded = encode_rfc2047("Héllo", "utf-8");
        assert!(encoded.starts_with("=?utf-8?B?"));
        assert!(encoded.ends_with("?="));
    }

    #[test]
    fn test_rfc2047_decode() {
        assert_eq!(decode_rfc2047("Hello").unwrap(), "Hello");
        assert_eq!(decode_rfc2047("=?utf-8?B?SMOpbGxv?=").unwrap(), "Héllo");
        assert_eq!(decode_rfc2047("=?utf-8?Q?H=C3=A9llo?=").unwrap(), "Héllo");
    }

    #[test]
    fn test_encode_header_text_word_wise() {
        assert_eq!(encode_header_text("plain ascii value"), "plain ascii value");

        let encoded = encode_header_text("hello привет world");
        let words: Vec<&str> = encoded.split(' ').collect();
        assert_eq!(words[0], "hello");
        assert!(words[1].starts_with("=?utf-8?B?"));
        assert_eq!(words[2], "world");
        assert_eq!(decode_rfc2047(words[1]).unwrap(), "привет");
    }

    proptest! {
        #[test]
        fn quoted_printable_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            let encoded = encode_quoted_printable(&data);
            let decoded = decode_quoted_printable(&encoded).unwrap();
            prop_assert_eq!(decoded, data);
        }

        #[test]
        fn base64_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            let decoded = decode_base64(&encode_base64(&data)).unwrap();
            prop_assert_eq!(decoded, data);
        }
    }
}
