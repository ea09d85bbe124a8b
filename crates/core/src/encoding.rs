//! Comment encoding for `custom` events
//!
//! Comments are free text, so they are encoded to keep a log line splittable
//! on spaces. The encoding matches HTML form encoding: ASCII alphanumerics and
//! `_.-~` are kept, a space becomes `+`, and every other UTF-8 byte becomes an
//! upper-case `%XX` escape.

use crate::error::{CoreError, Result};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Bytes escaped in comments. Space is left alone here and mapped to `+`.
const COMMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b' ');

/// Encode a free-text comment for the `args` field of a `custom` line
pub fn encode_comment(comment: &str) -> String {
    utf8_percent_encode(comment, COMMENT)
        .to_string()
        .replace(' ', "+")
}

/// Decode a comment previously produced by [`encode_comment`]
pub fn decode_comment(encoded: &str) -> Result<String> {
    let spaced = encoded.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|_| CoreError::InvalidEncoding(encoded.to_string()))
}
