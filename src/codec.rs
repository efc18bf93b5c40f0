use byteorder::{BigEndian, ByteOrder};

use crate::error::{Error, Result};
use crate::tier::{
    Tier, INLINE_MASK, OFFSETS, TYPE_INLINE_BYTE, TYPE_INLINE_MULTIBYTE, TYPE_NIL, TYPE_REFERENCE,
};
use crate::value::{Value, MAX_VALUE_SIZE};

/// Widest digest the encoding can carry while keeping values within 72 bytes.
pub const MAX_DIGEST_WIDTH: usize = 64;

/// Content recovered by decoding a value: either the represented bytes themselves, or the digest
/// identifying where they live. A decoded digest is always exactly the codec's digest width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    /// The represented octet string, stored directly in the value (length 0-64).
    Inline(Vec<u8>),
    /// The sakura merkle root of the represented octet string (length > 64).
    Reference(Vec<u8>),
}

impl Content {
    /// The carried bytes, whichever kind they are.
    pub fn bytes(&self) -> &[u8] {
        match self {
            Content::Inline(b) => b,
            Content::Reference(b) => b,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Content::Inline(b) => b,
            Content::Reference(b) => b,
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, Content::Inline(_))
    }
}

/// An lpve value encoder/decoder for a particular digest width.
///
/// The width only affects how many trailing bytes a reference-tier value carries; the length
/// arithmetic is identical for every codec. Both operations are pure: a codec can be shared
/// freely across threads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Codec {
    digest_width: usize,
}

impl Codec {
    /// Codec for 128-bit reference digests.
    pub const HASH128: Codec = Codec { digest_width: 16 };
    /// Codec for 256-bit reference digests.
    pub const HASH256: Codec = Codec { digest_width: 32 };
    /// Codec for 512-bit reference digests.
    pub const HASH512: Codec = Codec { digest_width: 64 };

    /// Construct a codec for an arbitrary digest width, 1-64 bytes.
    pub fn new(digest_width: usize) -> Result<Codec> {
        if digest_width == 0 || digest_width > MAX_DIGEST_WIDTH {
            return Err(Error::InvalidDigestWidth {
                width: digest_width,
            });
        }
        Ok(Codec { digest_width })
    }

    /// Digest width in bytes carried by reference-tier values of this codec.
    pub fn digest_width(&self) -> usize {
        self.digest_width
    }

    /// Encode an octet string of `length` bytes. For lengths of 64 or less, `content` is the
    /// octet string itself; for greater lengths it is the externally computed digest, exactly
    /// [`digest_width`](Self::digest_width) bytes. Encoding is deterministic: the same inputs
    /// always produce identical bytes.
    pub fn encode(&self, length: u64, content: &[u8]) -> Result<Value> {
        let tier = Tier::classify(length, content.first().copied())?;
        let mut buf = [0u8; MAX_VALUE_SIZE];
        let size = match tier {
            Tier::Nil => {
                if !content.is_empty() {
                    return Err(Error::ContentLengthMismatch {
                        expected: 0,
                        actual: content.len(),
                    });
                }
                buf[0] = TYPE_NIL;
                1
            }
            // classify() only picks InlineByte when content has a first byte of 63 or less
            Tier::InlineByte => {
                if content.len() != 1 {
                    return Err(Error::ContentLengthMismatch {
                        expected: 1,
                        actual: content.len(),
                    });
                }
                buf[0] = TYPE_INLINE_BYTE | content[0];
                1
            }
            Tier::InlineMultibyte => {
                if content.len() as u64 != length {
                    return Err(Error::ContentLengthMismatch {
                        expected: length as usize,
                        actual: content.len(),
                    });
                }
                buf[0] = TYPE_INLINE_MULTIBYTE | (length - 1) as u8;
                buf[1..1 + content.len()].copy_from_slice(content);
                1 + content.len()
            }
            Tier::Reference { count } => {
                if content.len() != self.digest_width {
                    return Err(Error::ContentLengthMismatch {
                        expected: self.digest_width,
                        actual: content.len(),
                    });
                }
                let count = count as usize;
                // Everything above the prefix bytes lands in the 3 carryover bits; count
                // selection guarantees it fits.
                let rel = length - OFFSETS[count];
                buf[0] = TYPE_REFERENCE | ((count as u8) << 3) | (rel >> (8 * count)) as u8;
                if count > 0 {
                    let mask = (1u64 << (8 * count)) - 1;
                    BigEndian::write_uint(&mut buf[1..1 + count], rel & mask, count);
                }
                buf[1 + count..1 + count + content.len()].copy_from_slice(content);
                1 + count + content.len()
            }
        };
        Ok(Value::from_encoded(&buf[..size]))
    }

    /// Decode the value at the start of `buf`, returning the represented length and the carried
    /// content. Values are self-terminating, so bytes past the end of the value are ignored.
    pub fn decode(&self, buf: &[u8]) -> Result<(u64, Content)> {
        let (value, _) = self.parse(buf)?;
        let b = value.as_bytes();
        let content = match value.tier() {
            Tier::Nil => Content::Inline(Vec::new()),
            Tier::InlineByte => Content::Inline(vec![b[0] & INLINE_MASK]),
            Tier::InlineMultibyte => Content::Inline(b[1..].to_vec()),
            Tier::Reference { count } => Content::Reference(b[1 + count as usize..].to_vec()),
        };
        Ok((value.represented_len(), content))
    }

    /// Split a validated [`Value`] off the front of `buf`, returning it along with the
    /// remaining bytes. This is the framing hook for stream adapters: values declare their own
    /// size, so no external length field is needed.
    pub fn parse<'a>(&self, buf: &'a [u8]) -> Result<(Value, &'a [u8])> {
        let size = self.value_size(buf)?;
        if buf.len() < size {
            return Err(Error::TruncatedInput {
                needed: size,
                actual: buf.len(),
            });
        }
        Ok((Value::from_encoded(&buf[..size]), &buf[size..]))
    }

    /// Total encoded size of the value at the start of `buf`, determined from the lead byte
    /// alone. Only the lead byte needs to be present.
    pub fn value_size(&self, buf: &[u8]) -> Result<usize> {
        let lead = *buf.first().ok_or(Error::TruncatedInput {
            needed: 1,
            actual: 0,
        })?;
        Ok(match Tier::from_byte(lead) {
            Tier::Nil | Tier::InlineByte => 1,
            Tier::InlineMultibyte => 2 + (lead & INLINE_MASK) as usize,
            Tier::Reference { count } => 1 + count as usize + self.digest_width,
        })
    }
}
