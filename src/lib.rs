//! RFC 4122 UUID generation and conversion for SQL query engines
//!
//! ```rust
//! use uuidfunc::{namespace, uuid1, uuid3, uuid4, uuid5};
//!
//! println!("{}", uuid1()); // e.g. "5f2a4ba8-8ad6-11ef-a0ec-8b7e3c1c2f4d"
//! println!("{}", uuid4()); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//!
//! let uuid = uuid3(&namespace::DNS, "example.org");
//! assert_eq!(uuid.to_string(), "04738bdf-b25a-3829-a801-b21a1d25095b");
//! let uuid = uuid5(&namespace::DNS, "example.org");
//! assert_eq!(uuid.to_string(), "aad03681-8b63-5304-89e0-8ca8f49461b5");
//! ```
//!
//! The [`function`] module exposes the same operations as a table of SQL functions (`uuid1()`,
//! `uuid3(ns, name)`, `uuid_to_blob(text)`, and so on) for a host engine adapter to register.
//!
//! # Field and bit layout
//!
//! A time-based UUID (version 1) has the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          time_low                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |       time_mid                |  ver  |       time_high       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|         clock_seq         |             node              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                              node                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 60-bit timestamp counts 100-nanosecond intervals since 1582-10-15 00:00:00 UTC and is
//!   split into `time_low`, `time_mid`, and `time_high`, least significant part first.
//! - The 4-bit `ver` field is set at `0001`.
//! - The 2-bit `var` field is set at `10`.
//! - The 14-bit `clock_seq` field starts at a random value and is incremented whenever the
//!   timestamp does not advance past that of the preceding UUID, so two UUIDs generated in the
//!   same tick or across a clock rollback still differ.
//! - The 48-bit `node` field is a random value fixed per generator, with the multicast bit set to
//!   mark it as not being an IEEE 802 address.
//!
//! Versions 3, 4, and 5 fill everything but `ver` and `var` with an MD5 digest, random bits, and a
//! truncated SHA-1 digest, respectively.
//!
//! # Crate features
//!
//! - `global_gen` (default): the process-wide generator behind [`uuid1()`] and [`uuid4()`], and
//!   the [`function`] table.
//! - `serde`: `Serialize` and `Deserialize` for [`Uuid`].
//! - `uuid`: conversions from and into `uuid::Uuid`.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod id;
pub use id::{LengthError, ParseError, Uuid, Variant};

pub mod codec;
pub mod namespace;

mod name;
pub use name::{uuid3, uuid5};

pub mod generator;
#[doc(no_inline)]
pub use generator::V1Generator;

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{uuid1, uuid4};

pub mod function;
