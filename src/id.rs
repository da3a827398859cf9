use fstr::FStr;
use std::{fmt, str};

/// Represents a Universally Unique IDentifier.
///
/// The sixteen octets are stored in network (big-endian) order, so the first octet is the most
/// significant byte of `time_low` for a UUIDv1 and the most significant byte of the digest for a
/// UUIDv3 or UUIDv5.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Creates an object from a 16-byte big-endian array.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Creates an object from a 128-bit unsigned integer.
    pub const fn from_u128(value: u128) -> Self {
        Self(value.to_be_bytes())
    }

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates a UUID byte array from UUIDv1 field values.
    ///
    /// `timestamp` is the 60-bit count of 100-nanosecond intervals since 1582-10-15 00:00:00 UTC,
    /// `clock_seq` the 14-bit clock sequence, and `node` the 48-bit node identifier.
    ///
    /// # Panics
    ///
    /// Panics if any argument exceeds its field width.
    pub const fn from_fields_v1(timestamp: u64, clock_seq: u16, node: u64) -> Self {
        if timestamp >= 1 << 60 || clock_seq >= 1 << 14 || node >= 1 << 48 {
            panic!("invalid field value");
        }

        Self([
            (timestamp >> 24) as u8,
            (timestamp >> 16) as u8,
            (timestamp >> 8) as u8,
            timestamp as u8,
            (timestamp >> 40) as u8,
            (timestamp >> 32) as u8,
            0x10 | (timestamp >> 56) as u8,
            (timestamp >> 48) as u8,
            0x80 | (clock_seq >> 8) as u8,
            clock_seq as u8,
            (node >> 40) as u8,
            (node >> 32) as u8,
            (node >> 24) as u8,
            (node >> 16) as u8,
            (node >> 8) as u8,
            node as u8,
        ])
    }

    /// Overwrites the four version bits (the high nibble of octet 6) with `version`.
    pub fn set_version(&mut self, version: u8) {
        debug_assert!(version < 16, "version must fit in four bits");
        self.0[6] = (self.0[6] & 0x0f) | (version << 4);
    }

    /// Overwrites the two most significant bits of octet 8 with `10`, the RFC 4122 variant,
    /// leaving the remaining six bits untouched.
    pub fn set_variant(&mut self) {
        self.0[8] = (self.0[8] & 0x3f) | 0x80;
    }

    /// Reports the variant field value of the UUID.
    pub const fn variant(&self) -> Variant {
        match self.0[8] >> 5 {
            0b000..=0b011 => Variant::Var0,
            0b100 | 0b101 => Variant::Var10,
            0b110 => Variant::Var110,
            _ => Variant::VarReserved,
        }
    }

    /// Returns the version field value of the UUID or `None` if the UUID does not have the
    /// variant field value of `10`.
    pub const fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(self.version_bits()),
            _ => None,
        }
    }

    /// Returns the raw four version bits regardless of the variant.
    pub const fn version_bits(&self) -> u8 {
        self.0[6] >> 4
    }

    /// Reads back the 60-bit timestamp of a UUIDv1, or `None` for other versions.
    pub const fn timestamp_v1(&self) -> Option<u64> {
        match self.version() {
            Some(1) => Some(
                ((self.0[6] as u64 & 0x0f) << 56)
                    | (self.0[7] as u64) << 48
                    | (self.0[4] as u64) << 40
                    | (self.0[5] as u64) << 32
                    | (self.0[0] as u64) << 24
                    | (self.0[1] as u64) << 16
                    | (self.0[2] as u64) << 8
                    | self.0[3] as u64,
            ),
            _ => None,
        }
    }

    /// Reads back the 14-bit clock sequence of a UUIDv1, or `None` for other versions.
    pub const fn clock_seq_v1(&self) -> Option<u16> {
        match self.version() {
            Some(1) => Some(((self.0[8] as u16 & 0x3f) << 8) | self.0[9] as u16),
            _ => None,
        }
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// string type that can be dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidfunc::Uuid;
    ///
    /// let x = "6BA7B810-9DAD-11D1-80B4-00C04FD430C8".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
    /// assert_eq!(format!("{}", y), "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
    /// # Ok::<(), uuidfunc::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [0u8; 36];
        let mut pos = 0;
        for (i, e) in self.0.iter().enumerate() {
            if i == 4 || i == 6 || i == 8 || i == 10 {
                buffer[pos] = b'-';
                pos += 1;
            }
            buffer[pos] = DIGITS[(e >> 4) as usize];
            buffer[pos + 1] = DIGITS[(e & 15) as usize];
            pos += 2;
        }
        debug_assert!(buffer.is_ascii());

        // SAFETY: buffer holds ASCII hex digits and hyphens only
        unsafe { FStr::from_bytes_unchecked(buffer) }
    }
}

/// The reserved bits that distinguish UUID layouts.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// `0xx`: reserved for NCS backward compatibility (includes the Nil UUID).
    Var0,
    /// `10x`: the layout specified by RFC 4122.
    Var10,
    /// `110`: reserved for Microsoft backward compatibility.
    Var110,
    /// `111`: reserved for future definition (includes the Max UUID).
    VarReserved,
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    ///
    /// Hex digits are accepted in either case; braces, URN prefixes, the hyphen-less form and
    /// surrounding whitespace are all rejected.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const ERR: ParseError = ParseError {};
        let src = src.as_bytes();
        if src.len() != 36 {
            return Err(ERR);
        }

        let mut dst = [0u8; 16];
        let mut pos = 0;
        for (i, e) in dst.iter_mut().enumerate() {
            if i == 4 || i == 6 || i == 8 || i == 10 {
                if src[pos] != b'-' {
                    return Err(ERR);
                }
                pos += 1;
            }
            let hi = hex_value(src[pos]).ok_or(ERR)?;
            let lo = hex_value(src[pos + 1]).ok_or(ERR)?;
            *e = (hi << 4) | lo;
            pos += 2;
        }
        Ok(Self(dst))
    }
}

const fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl TryFrom<&[u8]> for Uuid {
    type Error = LengthError;

    /// Creates an object from a byte slice that must be exactly 16 bytes long.
    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        <[u8; 16]>::try_from(src)
            .map(Self)
            .map_err(|_| LengthError { len: src.len() })
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self::from_u128(src)
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for Uuid {
    type Error = ParseError;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

/// Error parsing an invalid string representation of UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid string representation")
    }
}

impl std::error::Error for ParseError {}

/// Error converting a byte sequence whose length is not 16 into UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct LengthError {
    len: usize,
}

impl LengthError {
    /// Returns the length of the rejected byte sequence.
    pub const fn found(&self) -> usize {
        self.len
    }
}

impl fmt::Display for LengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid length: expected 16 bytes, found {}", self.len)
    }
}

impl std::error::Error for LengthError {}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            Self::Value::try_from(value).map_err(de::Error::custom)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::Uuid;
        use serde_test::{assert_de_tokens_error, assert_tokens, Configure, Token};

        /// Serializes and deserializes prepared cases correctly
        #[test]
        fn serializes_and_deserializes_prepared_cases_correctly() {
            let cases = [
                ("00000000-0000-0000-0000-000000000000", &[0u8; 16]),
                (
                    "6ba7b810-9dad-11d1-80b4-00c04fd430c8",
                    &[
                        107, 167, 184, 16, 157, 173, 17, 209, 128, 180, 0, 192, 79, 212, 48, 200,
                    ],
                ),
                (
                    "87654321-cba9-11ed-9234-0123456789ab",
                    &[
                        135, 101, 67, 33, 203, 169, 17, 237, 146, 52, 1, 35, 69, 103, 137, 171,
                    ],
                ),
                (
                    "04738bdf-b25a-3829-a801-b21a1d25095b",
                    &[
                        4, 115, 139, 223, 178, 90, 56, 41, 168, 1, 178, 26, 29, 37, 9, 91,
                    ],
                ),
            ];

            for (text, bytes) in cases {
                let e = text.parse::<Uuid>().unwrap();
                assert_tokens(&e.readable(), &[Token::String(text)]);
                assert_tokens(&e.compact(), &[Token::Bytes(bytes)]);
            }
        }

        /// Rejects byte sequences of wrong length
        #[test]
        fn rejects_byte_sequences_of_wrong_length() {
            assert_de_tokens_error::<serde_test::Compact<Uuid>>(
                &[Token::Bytes(&[0u8; 15])],
                "invalid length: expected 16 bytes, found 15",
            );
        }
    }
}
