//! Well-known namespace UUIDs defined in RFC 4122 Appendix C
//!
//! These values are the conventional `namespace` arguments to [`uuid3`](crate::uuid3) and
//! [`uuid5`](crate::uuid5).

use crate::Uuid;

/// Namespace for fully-qualified domain names (6ba7b810-9dad-11d1-80b4-00c04fd430c8)
pub const DNS: Uuid = Uuid::from_u128(0x6ba7b810_9dad_11d1_80b4_00c04fd430c8);

/// Namespace for URLs (6ba7b811-9dad-11d1-80b4-00c04fd430c8)
pub const URL: Uuid = Uuid::from_u128(0x6ba7b811_9dad_11d1_80b4_00c04fd430c8);

/// Namespace for ISO OIDs (6ba7b812-9dad-11d1-80b4-00c04fd430c8)
pub const OID: Uuid = Uuid::from_u128(0x6ba7b812_9dad_11d1_80b4_00c04fd430c8);

/// Namespace for X.500 DNs in DER or text output format (6ba7b814-9dad-11d1-80b4-00c04fd430c8)
pub const X500: Uuid = Uuid::from_u128(0x6ba7b814_9dad_11d1_80b4_00c04fd430c8);

#[cfg(test)]
mod tests {
    use super::{DNS, OID, URL, X500};
    use crate::Variant;

    /// Encodes namespaces as RFC 4122 lists them
    #[test]
    fn encodes_namespaces_as_rfc_4122_lists_them() {
        let cases = [
            (DNS, "6ba7b810-9dad-11d1-80b4-00c04fd430c8"),
            (URL, "6ba7b811-9dad-11d1-80b4-00c04fd430c8"),
            (OID, "6ba7b812-9dad-11d1-80b4-00c04fd430c8"),
            (X500, "6ba7b814-9dad-11d1-80b4-00c04fd430c8"),
        ];

        for (ns, text) in cases {
            assert_eq!(&ns.encode() as &str, text);
            assert_eq!(ns.version(), Some(1));
            assert_eq!(ns.variant(), Variant::Var10);
        }
    }
}
