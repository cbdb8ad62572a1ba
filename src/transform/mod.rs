//! In-place encode/decode transforms.
//!
//! Applies base64 and URL encode/decode operations to a selected span of a
//! text buffer. Transforms are all-or-nothing: on error the caller keeps its
//! original buffer.

pub mod error;

pub use error::TransformError;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Characters left alone by component encoding: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
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

/// Base64 decoder that accepts missing padding and non-zero trailing bits.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// A transform that can be applied to a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransformOp {
    /// Base64-encode the UTF-8 bytes of the selection.
    Base64Encode,
    /// Base64-decode the selection into UTF-8 text.
    Base64Decode,
    /// Percent-decode the selection.
    UrlDecode,
    /// Percent-encode reserved and unsafe characters only.
    UrlEncodeKey,
    /// Percent-encode every UTF-16 code unit.
    UrlEncodeAll,
    /// Percent-encode every ASCII character; non-ASCII as UTF-8 bytes.
    UrlEncodeUnicode,
}

impl TransformOp {
    /// All operations, in menu order.
    pub const ALL: [TransformOp; 6] = [
        TransformOp::Base64Encode,
        TransformOp::Base64Decode,
        TransformOp::UrlDecode,
        TransformOp::UrlEncodeKey,
        TransformOp::UrlEncodeAll,
        TransformOp::UrlEncodeUnicode,
    ];

    /// Returns the action name of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransformOp::Base64Encode => "base64-encode",
            TransformOp::Base64Decode => "base64-decode",
            TransformOp::UrlDecode => "url-decode",
            TransformOp::UrlEncodeKey => "url-encode-key",
            TransformOp::UrlEncodeAll => "url-encode-all",
            TransformOp::UrlEncodeUnicode => "url-encode-unicode",
        }
    }
}

impl fmt::Display for TransformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransformOp {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransformOp::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| TransformError::UnknownOperation(s.to_string()))
    }
}

/// Result of a successful transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutcome {
    /// The full buffer with the selection replaced.
    pub text: String,
    /// Byte offset just after the replacement.
    pub cursor: usize,
}

/// Replaces `text[start..end]` with its transformed form.
///
/// Offsets are byte offsets and must fall on character boundaries.
///
/// # Examples
///
/// ```
/// use http_replay::transform::{apply, TransformOp};
///
/// let outcome = apply("token=hello", 6, 11, TransformOp::Base64Encode).unwrap();
/// assert_eq!(outcome.text, "token=aGVsbG8=");
/// assert_eq!(outcome.cursor, 14);
/// ```
pub fn apply(
    text: &str,
    start: usize,
    end: usize,
    op: TransformOp,
) -> Result<TransformOutcome, TransformError> {
    let selected = selection(text, start, end)?;
    if selected.trim().is_empty() {
        return Err(TransformError::EmptySelection);
    }

    let replacement = transform(selected, op)?;

    let mut out = String::with_capacity(text.len() - selected.len() + replacement.len());
    out.push_str(&text[..start]);
    out.push_str(&replacement);
    out.push_str(&text[end..]);

    Ok(TransformOutcome {
        text: out,
        cursor: start + replacement.len(),
    })
}

fn selection(text: &str, start: usize, end: usize) -> Result<&str, TransformError> {
    if start > end || !text.is_char_boundary(start) || !text.is_char_boundary(end) {
        return Err(TransformError::InvalidSelection { start, end });
    }
    Ok(&text[start..end])
}

/// Applies `op` to a whole string.
pub fn transform(input: &str, op: TransformOp) -> Result<String, TransformError> {
    match op {
        TransformOp::Base64Encode => Ok(STANDARD.encode(input.as_bytes())),
        TransformOp::Base64Decode => base64_decode(input),
        TransformOp::UrlDecode => url_decode(input),
        TransformOp::UrlEncodeKey => Ok(utf8_percent_encode(input, COMPONENT).to_string()),
        TransformOp::UrlEncodeAll => Ok(encode_code_units(input)),
        TransformOp::UrlEncodeUnicode => Ok(encode_unicode(input)),
    }
}

fn base64_decode(input: &str) -> Result<String, TransformError> {
    let compact: String = input.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = LENIENT_BASE64
        .decode(compact.as_bytes())
        .map_err(|e| TransformError::InvalidBase64(e.to_string()))?;
    String::from_utf8(bytes).map_err(|_| TransformError::InvalidUtf8)
}

fn url_decode(input: &str) -> Result<String, TransformError> {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let well_formed = i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !well_formed {
                return Err(TransformError::InvalidPercentEncoding { offset: i });
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    percent_decode_str(input)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| TransformError::InvalidUtf8)
}

// Raw code-unit encoding: characters outside the BMP become two surrogate
// escapes, and non-ASCII BMP characters are not UTF-8 encoded.
fn encode_code_units(input: &str) -> String {
    input
        .encode_utf16()
        .map(|unit| format!("%{:02X}", unit))
        .collect()
}

fn encode_unicode(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    let mut buf = [0u8; 4];
    for c in input.chars() {
        if c.is_ascii() {
            out.push_str(&format!("%{:02X}", c as u32));
        } else {
            let encoded: &str = c.encode_utf8(&mut buf);
            out.extend(utf8_percent_encode(encoded, NON_ALPHANUMERIC));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_round_trip_examples() {
        assert_eq!(transform("hello", TransformOp::Base64Encode).unwrap(), "aGVsbG8=");
        assert_eq!(transform("aGVsbG8=", TransformOp::Base64Decode).unwrap(), "hello");
    }

    #[test]
    fn test_base64_utf8_safe() {
        let encoded = transform("héllo ✓", TransformOp::Base64Encode).unwrap();
        assert_eq!(encoded, "aMOpbGxvIOKckw==");
        assert_eq!(
            transform(&encoded, TransformOp::Base64Decode).unwrap(),
            "héllo ✓"
        );
    }

    #[test]
    fn test_base64_decode_is_lenient_about_padding_and_whitespace() {
        assert_eq!(transform("aGVsbG8", TransformOp::Base64Decode).unwrap(), "hello");
        assert_eq!(transform("aGVs\nbG8=", TransformOp::Base64Decode).unwrap(), "hello");
    }

    #[test]
    fn test_base64_decode_invalid() {
        let result = transform("not*base64!", TransformOp::Base64Decode);
        assert!(matches!(result, Err(TransformError::InvalidBase64(_))));
    }

    #[test]
    fn test_base64_decode_non_utf8() {
        // 0xFF 0xFE
        let result = transform("//4=", TransformOp::Base64Decode);
        assert_eq!(result, Err(TransformError::InvalidUtf8));
    }

    #[test]
    fn test_url_decode() {
        assert_eq!(
            transform("a%20b%2Fc%E2%9C%93", TransformOp::UrlDecode).unwrap(),
            "a b/c✓"
        );
        assert_eq!(transform("a+b", TransformOp::UrlDecode).unwrap(), "a+b");
    }

    #[test]
    fn test_url_decode_malformed() {
        assert_eq!(
            transform("100%", TransformOp::UrlDecode),
            Err(TransformError::InvalidPercentEncoding { offset: 3 })
        );
        assert_eq!(
            transform("%zz", TransformOp::UrlDecode),
            Err(TransformError::InvalidPercentEncoding { offset: 0 })
        );
        assert_eq!(
            transform("%FF", TransformOp::UrlDecode),
            Err(TransformError::InvalidUtf8)
        );
    }

    #[test]
    fn test_url_encode_key() {
        assert_eq!(transform("A", TransformOp::UrlEncodeKey).unwrap(), "A");
        assert_eq!(
            transform("a b&c=d/e?f#g", TransformOp::UrlEncodeKey).unwrap(),
            "a%20b%26c%3Dd%2Fe%3Ff%23g"
        );
        assert_eq!(
            transform("-_.!~*'()", TransformOp::UrlEncodeKey).unwrap(),
            "-_.!~*'()"
        );
        assert_eq!(transform("é", TransformOp::UrlEncodeKey).unwrap(), "%C3%A9");
    }

    #[test]
    fn test_url_encode_all() {
        assert_eq!(transform("A", TransformOp::UrlEncodeAll).unwrap(), "%41");
        assert_eq!(transform("a1 ", TransformOp::UrlEncodeAll).unwrap(), "%61%31%20");
        assert_eq!(transform("\n", TransformOp::UrlEncodeAll).unwrap(), "%0A");
        // Code units, not UTF-8 bytes
        assert_eq!(transform("é", TransformOp::UrlEncodeAll).unwrap(), "%E9");
        assert_eq!(transform("中", TransformOp::UrlEncodeAll).unwrap(), "%4E2D");
    }

    #[test]
    fn test_url_encode_unicode() {
        assert_eq!(transform("A", TransformOp::UrlEncodeUnicode).unwrap(), "%41");
        assert_eq!(
            transform("aé", TransformOp::UrlEncodeUnicode).unwrap(),
            "%61%C3%A9"
        );
        assert_eq!(
            transform("中", TransformOp::UrlEncodeUnicode).unwrap(),
            "%E4%B8%AD"
        );
    }

    #[test]
    fn test_apply_replaces_only_selection() {
        let text = "GET /?q=a b HTTP/1.1";
        let start = text.find("a b").unwrap();
        let outcome = apply(text, start, start + 3, TransformOp::UrlEncodeKey).unwrap();
        assert_eq!(outcome.text, "GET /?q=a%20b HTTP/1.1");
        assert_eq!(outcome.cursor, start + "a%20b".len());
    }

    #[test]
    fn test_apply_rejects_bad_selection() {
        assert_eq!(
            apply("abc", 2, 1, TransformOp::Base64Encode),
            Err(TransformError::InvalidSelection { start: 2, end: 1 })
        );
        assert_eq!(
            apply("abc", 0, 10, TransformOp::Base64Encode),
            Err(TransformError::InvalidSelection { start: 0, end: 10 })
        );
        // Splits the two-byte 'é'
        assert_eq!(
            apply("é", 0, 1, TransformOp::Base64Encode),
            Err(TransformError::InvalidSelection { start: 0, end: 1 })
        );
    }

    #[test]
    fn test_apply_rejects_blank_selection() {
        assert_eq!(
            apply("a   b", 1, 4, TransformOp::Base64Encode),
            Err(TransformError::EmptySelection)
        );
        assert_eq!(
            apply("ab", 1, 1, TransformOp::Base64Encode),
            Err(TransformError::EmptySelection)
        );
    }

    #[test]
    fn test_op_names_round_trip() {
        for op in TransformOp::ALL {
            assert_eq!(op.as_str().parse::<TransformOp>().unwrap(), op);
        }
        assert_eq!(
            "rot13".parse::<TransformOp>(),
            Err(TransformError::UnknownOperation("rot13".to_string()))
        );
    }

    #[test]
    fn test_op_serde_names() {
        let json = serde_json::to_string(&TransformOp::UrlEncodeUnicode).unwrap();
        assert_eq!(json, "\"url-encode-unicode\"");
    }
}
