//! Length-prefix value encoding for binary octet strings up to 256 pebibytes in size, with the
//! encoded value itself guaranteed not to exceed 72 octets. Values are self-parsing, with a
//! deterministic length in every case.
//!
//! Octet strings that are 64 octets or less are stored directly in the encoded value. These
//! values are said to be "inline". Longer octet strings are represented by the sakura-encoded
//! merkle tree root of the string. These values are said to be "referenced". The sakura tree
//! hashing mode, which specifies the actual hash function in use, is implementation dependent
//! and is not indicated in the encoding; this crate consumes the digest as opaque bytes of a
//! configured width and never computes it.
//!
//! Both inline and referenced values encode the length of the data they represent, which means:
//!
//! 1. References don't have to be resolved before the length of the data they refer to can be
//!    determined.
//! 2. Compression could be applied automatically for octet strings greater than some length.
//!
//! Values sort according to the length of the data they represent when compared as big-endian
//! octet strings, and encoding overhead is proportional to octet length, so small values carry
//! less overhead.
//!
//! ```text
//! Empty value        (1 byte):     00000000
//! 0-6 bit value      (1 byte):     01XXXXXX
//! 1-64 byte value    (2-65 bytes): 10LLLLLL XXXXXXXX [...]       L = length - 1
//! > 64 byte value    (2-72 bytes): 11CCCJJJ [prefix...] [digest] C = prefix count, J = carryover
//! ```
//!
//! Reference lengths are rebuilt as `offset(C) + (J << 8C | prefix)`, where `offset(C)` is the
//! smallest length needing `C` prefix bytes: 65, 73, 2121, 526409, and so on.
//!
//! # Examples
//!
//! ```
//! # fn main() -> lpve::Result<()> {
//! use lpve::{Codec, Content};
//!
//! // Short strings are stored inline
//! let value = Codec::HASH256.encode(5, b"hello")?;
//! assert_eq!(value.as_bytes(), &[0x84, b'h', b'e', b'l', b'l', b'o']);
//! assert!(value.is_inline());
//!
//! // Long strings are represented by an externally computed merkle root
//! let root = [0x5Au8; 32];
//! let value = Codec::HASH256.encode(1_000_000, &root)?;
//! assert_eq!(value.represented_len(), 1_000_000);
//!
//! let (length, content) = Codec::HASH256.decode(&value)?;
//! assert_eq!(length, 1_000_000);
//! assert_eq!(content, Content::Reference(root.to_vec()));
//! # Ok(())
//! # }
//! ```

mod codec;
mod error;
mod tier;
mod value;

pub use self::codec::{Codec, Content, MAX_DIGEST_WIDTH};
pub use self::error::{Error, Result};
pub use self::tier::Tier;
pub use self::value::{Value, MAX_VALUE_SIZE};

/// Maximum length of an encodable octet string: 2^59 - 1 bytes, just under 256 PiB.
pub const MAX_LENGTH: u64 = 0x07FF_FFFF_FFFF_FFFF;
