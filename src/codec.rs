//! Conversion between the 16-byte binary form and the canonical text form.
//!
//! These are the byte-slice and string entry points used where the input comes from outside the
//! type system, such as the blob and text values handed over by a query engine. Both directions
//! are strict: no length other than 16 bytes and no text other than the hyphenated 8-4-4-4-12
//! grouping is accepted.

use crate::{LengthError, ParseError, Uuid};

/// Returns the lowercase canonical text of a 16-byte big-endian UUID.
///
/// # Errors
///
/// Returns [`LengthError`] if `bytes` is not exactly 16 bytes long.
///
/// # Examples
///
/// ```rust
/// use uuidfunc::codec;
///
/// let bytes = [0x6b, 0xa7, 0xb8, 0x10, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0, 0xc0, 0x4f, 0xd4, 0x30, 0xc8];
/// assert_eq!(codec::to_text(&bytes)?, "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
/// assert!(codec::to_text(&bytes[..15]).is_err());
/// # Ok::<(), uuidfunc::LengthError>(())
/// ```
pub fn to_text(bytes: &[u8]) -> Result<String, LengthError> {
    Uuid::try_from(bytes).map(String::from)
}

/// Returns the 16-byte big-endian form of a canonical UUID string. Hex digits may be in either
/// case.
///
/// # Errors
///
/// Returns [`ParseError`] if `text` is not a hyphenated 8-4-4-4-12 hexadecimal string.
pub fn to_blob(text: &str) -> Result<[u8; 16], ParseError> {
    text.parse::<Uuid>().map(<[u8; 16]>::from)
}
