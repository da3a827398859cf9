//! Name-based UUIDs (versions 3 and 5)
//!
//! Both versions hash the 16 octets of a namespace UUID followed by the bytes of a name, keep the
//! first 128 bits of the digest, and then overwrite the version and variant fields. The result is
//! a pure function of `(namespace, name)`.

use crate::Uuid;
use md5::Md5;
use sha1::{Digest, Sha1};

/// Generates a UUIDv3 object from a namespace and a name using MD5.
///
/// Prefer [`uuid5`] unless compatibility with existing version 3 identifiers is required.
///
/// # Examples
///
/// ```rust
/// use uuidfunc::{namespace, uuid3};
///
/// let uuid = uuid3(&namespace::DNS, "example.org");
/// assert_eq!(uuid.to_string(), "04738bdf-b25a-3829-a801-b21a1d25095b");
/// ```
pub fn uuid3(namespace: &Uuid, name: impl AsRef<[u8]>) -> Uuid {
    let digest: [u8; 16] = Md5::new()
        .chain_update(namespace.as_bytes())
        .chain_update(name.as_ref())
        .finalize()
        .into();
    from_digest(digest, 3)
}

/// Generates a UUIDv5 object from a namespace and a name using SHA-1.
///
/// # Examples
///
/// ```rust
/// use uuidfunc::{namespace, uuid5};
///
/// let uuid = uuid5(&namespace::DNS, "example.org");
/// assert_eq!(uuid.to_string(), "aad03681-8b63-5304-89e0-8ca8f49461b5");
/// ```
pub fn uuid5(namespace: &Uuid, name: impl AsRef<[u8]>) -> Uuid {
    let digest = Sha1::new()
        .chain_update(namespace.as_bytes())
        .chain_update(name.as_ref())
        .finalize();

    // SHA-1 yields 160 bits; the trailing 32 are dropped
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    from_digest(bytes, 5)
}

fn from_digest(digest: [u8; 16], version: u8) -> Uuid {
    let mut uuid = Uuid::from(digest);
    uuid.set_version(version);
    uuid.set_variant();
    uuid
}
