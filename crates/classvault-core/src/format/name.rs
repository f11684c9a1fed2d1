//! Percent-escaping of item names.
//!
//! The tree service percent-escapes file names on the wire. Names are
//! decoded once at the client boundary and never shown escaped.

use std::fmt::Write;

/// ASCII punctuation the server escapes in names.
pub const ESCAPED_PUNCTUATION: [char; 25] = [
    ' ', '"', '#', '$', '%', '&', '\'', '+', ',', '/', ':', ';', '<', '=', '>', '?', '@', '[',
    '\\', ']', '^', '`', '{', '|', '}',
];

/// Decode a percent-escaped name for display.
///
/// Malformed input (an escape that does not decode to UTF-8) is returned
/// unchanged rather than failing the whole listing.
pub fn decode_name(raw: &str) -> String {
    if !raw.contains('%') {
        return raw.to_string();
    }
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    }
}

/// Escape a name the way the server does.
///
/// Every character in [`ESCAPED_PUNCTUATION`], every control character,
/// and every non-ASCII character is written as uppercase `%XX` UTF-8 bytes.
pub fn encode_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii() && !ch.is_ascii_control() && !ESCAPED_PUNCTUATION.contains(&ch) {
            out.push(ch);
            continue;
        }
        let mut buf = [0u8; 4];
        for byte in ch.encode_utf8(&mut buf).bytes() {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}
