//! Pure display helpers: wire-name decoding, byte humanizing, and
//! MIME-derived presentation hints.

pub mod mime;
pub mod name;
pub mod size;

pub use mime::{FileCategory, category_for_mime, color_for_mime, extension_for_mime};
pub use name::{ESCAPED_PUNCTUATION, decode_name, encode_name};
pub use size::format_bytes;
