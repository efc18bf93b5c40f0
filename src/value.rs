use std::cmp::Ordering;
use std::fmt;
use std::hash;
use std::ops::Deref;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use byteorder::{BigEndian, ByteOrder};

use crate::tier::{
    Tier, INLINE_MASK, OFFSETS, REFERENCE_CARRYOVER_MASK,
};

/// An encoded value never exceeds 72 bytes: lead byte, up to 7 length-prefix bytes, and up to 64
/// bytes of inline content or digest.
pub const MAX_VALUE_SIZE: usize = 72;

/// A complete encoded value. Immutable once constructed; only the [`Codec`](crate::Codec)
/// produces these. Comparison and hashing operate on the raw encoded bytes, so sorting a
/// collection of values orders them by the length of the data they represent.
#[derive(Clone)]
pub struct Value {
    buf: [u8; MAX_VALUE_SIZE],
    size: u8,
}

impl Value {
    /// Wrap a complete encoding. Caller must have validated the layout.
    pub(crate) fn from_encoded(b: &[u8]) -> Value {
        debug_assert!(!b.is_empty() && b.len() <= MAX_VALUE_SIZE);
        let mut buf = [0u8; MAX_VALUE_SIZE];
        buf[..b.len()].copy_from_slice(b);
        Value {
            buf,
            size: b.len() as u8,
        }
    }

    /// The raw encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.size as usize]
    }

    /// The encoding tier this value uses.
    pub fn tier(&self) -> Tier {
        Tier::from_byte(self.buf[0])
    }

    /// True if the represented octet string is stored within the value itself.
    pub fn is_inline(&self) -> bool {
        !matches!(self.tier(), Tier::Reference { .. })
    }

    /// Length in bytes of the octet string this value represents, recovered from the length
    /// prefix alone. References never need to be resolved to learn the length of the data they
    /// refer to.
    pub fn represented_len(&self) -> u64 {
        let b = self.as_bytes();
        match self.tier() {
            Tier::Nil => 0,
            Tier::InlineByte => 1,
            Tier::InlineMultibyte => (b[0] & INLINE_MASK) as u64 + 1,
            Tier::Reference { count } => {
                let count = count as usize;
                let raw = if count > 0 {
                    BigEndian::read_uint(&b[1..1 + count], count)
                } else {
                    0
                };
                let carry = (b[0] & REFERENCE_CARRYOVER_MASK) as u64;
                OFFSETS[count] + ((carry << (8 * count)) | raw)
            }
        }
    }

    /// The represented bytes, when the value is inline. `None` for referenced values, whose
    /// content must be fetched through the digest.
    pub fn inline_bytes(&self) -> Option<Vec<u8>> {
        let b = self.as_bytes();
        match self.tier() {
            Tier::Nil => Some(Vec::new()),
            Tier::InlineByte => Some(vec![b[0] & INLINE_MASK]),
            Tier::InlineMultibyte => Some(b[1..].to_vec()),
            Tier::Reference { .. } => None,
        }
    }
}

impl Deref for Value {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for Value {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Value {}

// Slice comparison is already byte-lexicographic, which is exactly the encoding's sort order.
impl Ord for Value {
    fn cmp(&self, other: &Value) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Value) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl hash::Hash for Value {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&URL_SAFE_NO_PAD.encode(self.as_bytes()))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Value {{ len: {}, encoded: {} }}",
            self.represented_len(),
            self
        )
    }
}

#[cfg(test)]
mod test {
    use crate::Codec;

    #[test]
    fn represented_len_without_resolving() {
        let codec = Codec::HASH256;
        let digest = [0u8; 32];
        for length in [65u64, 72, 73, 201, 329, 2120, 2121, 526409, 134744137] {
            let value = codec.encode(length, &digest).unwrap();
            assert_eq!(value.represented_len(), length);
            assert!(!value.is_inline());
            assert!(value.inline_bytes().is_none());
        }
    }

    #[test]
    fn inline_bytes_recovered() {
        let codec = Codec::HASH256;

        let value = codec.encode(0, &[]).unwrap();
        assert_eq!(value.inline_bytes().unwrap(), Vec::<u8>::new());

        let value = codec.encode(1, &[5]).unwrap();
        assert_eq!(value.inline_bytes().unwrap(), vec![5]);

        let value = codec.encode(1, &[200]).unwrap();
        assert_eq!(value.inline_bytes().unwrap(), vec![200]);

        let data: Vec<u8> = (0..64).collect();
        let value = codec.encode(64, &data).unwrap();
        assert_eq!(value.inline_bytes().unwrap(), data);
    }

    #[test]
    fn ordering_follows_represented_len() {
        let codec = Codec::HASH128;
        let digest = [0xFFu8; 16];
        let mut prev = codec.encode(0, &[]).unwrap();
        let lengths = [1u64, 2, 5, 63, 64, 65, 72, 73, 2120, 2121, 526408, 526409];
        for length in lengths {
            let content: Vec<u8> = if length <= 64 {
                vec![0u8; length as usize]
            } else {
                digest.to_vec()
            };
            let value = codec.encode(length, &content).unwrap();
            assert!(
                prev < value,
                "encode({}) must sort before encode({})",
                prev.represented_len(),
                length
            );
            prev = value;
        }
    }

    #[test]
    fn display_is_base64() {
        let codec = Codec::HASH256;
        let value = codec.encode(0, &[]).unwrap();
        assert_eq!(value.to_string(), "AA");
    }
}
