use crate::error::{Error, Result};
use crate::MAX_LENGTH;

/// Type bits in the lead byte of every encoded value.
pub(crate) const TYPE_MASK: u8 = 0xC0; // 1100 0000

/// Designates a zero-length octet string.
pub(crate) const TYPE_NIL: u8 = 0x00; // 0000 0000
/// Designates an octet string of length 1 with an unsigned value not exceeding 63.
pub(crate) const TYPE_INLINE_BYTE: u8 = 0x40; // 0100 0000
/// Designates an octet string of length 1-64, stored directly in the value.
pub(crate) const TYPE_INLINE_MULTIBYTE: u8 = 0x80; // 1000 0000
/// Designates an octet string of length greater than 64, represented by the digest of a sakura
/// merkle tree over its content.
pub(crate) const TYPE_REFERENCE: u8 = 0xC0; // 1100 0000

/// Low 6 bits of the lead byte: the inline value or length-minus-one.
pub(crate) const INLINE_MASK: u8 = 0x3F; // 0011 1111
/// Bits 5-3 of a reference lead byte: how many length-prefix bytes follow.
pub(crate) const REFERENCE_COUNT_MASK: u8 = 0x38; // 0011 1000
/// Bits 2-0 of a reference lead byte: length carryover above the prefix bytes.
pub(crate) const REFERENCE_CARRYOVER_MASK: u8 = 0x07; // 0000 0111

/// Largest octet string that can be stored inline.
pub(crate) const INLINE_MAX: u64 = 64;

/// Reference length offsets, indexed by prefix byte count. `OFFSETS[c]` is the smallest length
/// encodable with `c` prefix bytes: 65 plus the 8·256^k lengths covered by every smaller count.
/// Making each count's range start exactly where the previous one ends is what keeps encoded
/// values byte-lexicographically ordered by length across count boundaries.
pub(crate) const OFFSETS: [u64; 8] = offsets();

const fn offsets() -> [u64; 8] {
    let mut table = [0u64; 8];
    table[0] = INLINE_MAX + 1;
    let mut c = 1;
    while c < 8 {
        table[c] = table[c - 1] + (8u64 << (8 * (c - 1)));
        c += 1;
    }
    table
}

/// The four encoding shapes a value can take. Selected by the represented length, except that a
/// length-1 string is only `InlineByte` when its single byte fits in 6 bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    /// Zero-length octet string. One encoded byte.
    Nil,
    /// Single byte with value 0-63, packed into the lead byte itself.
    InlineByte,
    /// 1-64 bytes stored verbatim after the lead byte.
    InlineMultibyte,
    /// Length greater than 64; the value carries `count` length-prefix bytes and a digest.
    Reference { count: u8 },
}

impl Tier {
    /// Classify a represented length. `single` must be the byte value when `length` is 1; the
    /// choice between `InlineByte` and `InlineMultibyte` is data-dependent, not just
    /// length-dependent.
    pub fn classify(length: u64, single: Option<u8>) -> Result<Tier> {
        match length {
            0 => Ok(Tier::Nil),
            1 => match single {
                Some(v) if v <= INLINE_MASK => Ok(Tier::InlineByte),
                _ => Ok(Tier::InlineMultibyte),
            },
            2..=INLINE_MAX => Ok(Tier::InlineMultibyte),
            _ if length > MAX_LENGTH => Err(Error::LengthOutOfRange { length }),
            _ => {
                // Smallest count whose range reaches the length
                let mut count = 0u8;
                while count < 7 && length >= OFFSETS[count as usize + 1] {
                    count += 1;
                }
                Ok(Tier::Reference { count })
            }
        }
    }

    /// Recover the tier from a lead byte. Total: the two type bits cover all 256 byte values.
    pub fn from_byte(lead: u8) -> Tier {
        match lead & TYPE_MASK {
            TYPE_NIL => Tier::Nil,
            TYPE_INLINE_BYTE => Tier::InlineByte,
            TYPE_INLINE_MULTIBYTE => Tier::InlineMultibyte,
            _ => Tier::Reference {
                count: (lead & REFERENCE_COUNT_MASK) >> 3,
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn offsets_match_worked_examples() {
        // Lengths from the format documentation's length-encoding table
        assert_eq!(OFFSETS[0], 65);
        assert_eq!(OFFSETS[1], 73);
        assert_eq!(OFFSETS[2], 2121);
        assert_eq!(OFFSETS[3], 526409);
        assert_eq!(OFFSETS[4], 134744137);
    }

    #[test]
    fn offsets_are_adjacent() {
        for c in 0..7usize {
            let capacity = 8u64 << (8 * c);
            assert_eq!(
                OFFSETS[c] + capacity,
                OFFSETS[c + 1],
                "count {} range must end exactly where count {} begins",
                c,
                c + 1
            );
        }
    }

    #[test]
    fn classify_inline() {
        assert_eq!(Tier::classify(0, None).unwrap(), Tier::Nil);
        assert_eq!(Tier::classify(1, Some(0)).unwrap(), Tier::InlineByte);
        assert_eq!(Tier::classify(1, Some(63)).unwrap(), Tier::InlineByte);
        assert_eq!(Tier::classify(1, Some(64)).unwrap(), Tier::InlineMultibyte);
        assert_eq!(Tier::classify(1, Some(200)).unwrap(), Tier::InlineMultibyte);
        assert_eq!(Tier::classify(2, None).unwrap(), Tier::InlineMultibyte);
        assert_eq!(Tier::classify(64, None).unwrap(), Tier::InlineMultibyte);
    }

    #[test]
    fn classify_reference_counts() {
        let cases = [
            (65, 0),
            (72, 0),
            (73, 1),
            (2120, 1),
            (2121, 2),
            (526408, 2),
            (526409, 3),
            (134744136, 3),
            (134744137, 4),
            (crate::MAX_LENGTH, 7),
        ];
        for (length, count) in cases {
            assert_eq!(
                Tier::classify(length, None).unwrap(),
                Tier::Reference { count },
                "length {}",
                length
            );
        }
    }

    #[test]
    fn classify_out_of_range() {
        assert_eq!(
            Tier::classify(crate::MAX_LENGTH + 1, None),
            Err(Error::LengthOutOfRange {
                length: crate::MAX_LENGTH + 1
            })
        );
        assert_eq!(
            Tier::classify(u64::MAX, None),
            Err(Error::LengthOutOfRange { length: u64::MAX })
        );
    }

    #[test]
    fn lead_byte_tiers() {
        assert_eq!(Tier::from_byte(0x00), Tier::Nil);
        assert_eq!(Tier::from_byte(0x3F), Tier::Nil);
        assert_eq!(Tier::from_byte(0x40), Tier::InlineByte);
        assert_eq!(Tier::from_byte(0x7F), Tier::InlineByte);
        assert_eq!(Tier::from_byte(0x80), Tier::InlineMultibyte);
        assert_eq!(Tier::from_byte(0xBF), Tier::InlineMultibyte);
        assert_eq!(Tier::from_byte(0xC0), Tier::Reference { count: 0 });
        assert_eq!(Tier::from_byte(0xC8), Tier::Reference { count: 1 });
        assert_eq!(Tier::from_byte(0xFF), Tier::Reference { count: 7 });
    }
}
