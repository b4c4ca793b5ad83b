// src/encoding.rs
//! Percent-encoding of caller-supplied identifiers before they are
//! interpolated into endpoint templates

use percent_encoding::{percent_decode_str, percent_encode, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::borrow::Cow;

/// Characters kept verbatim inside a path segment: RFC 3986 unreserved only.
/// `/`, `@`, `?` and friends must not leak into the path structure.
pub const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Characters kept verbatim inside a query-string value. Delimiters of the
/// query itself (`&`, `=`, `+`, `#`) are always encoded.
pub const QUERY_VALUE: &AsciiSet = &PATH_SEGMENT
    .remove(b'!')
    .remove(b'$')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b',')
    .remove(b';')
    .remove(b':')
    .remove(b'@')
    .remove(b'/');

/// Encode an identifier destined for a single path segment
pub fn encode_path_segment(input: &str) -> Cow<'_, str> {
    utf8_percent_encode(input, PATH_SEGMENT).into()
}

/// Encode a value destined for the query string. Spaces become `%20`, never `+`.
pub fn encode_query_value(input: &str) -> Cow<'_, str> {
    utf8_percent_encode(input, QUERY_VALUE).into()
}

/// Encode raw bytes for a path segment. Works for input that is not valid
/// UTF-8, since every byte outside the allowed set is emitted as `%XX`.
pub fn encode_path_bytes(input: &[u8]) -> String {
    percent_encode(input, PATH_SEGMENT).to_string()
}

/// Decode a percent-encoded component, replacing invalid UTF-8 sequences
pub fn decode_component(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}
