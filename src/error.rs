use std::fmt;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// Occurs when a length to encode exceeds [`MAX_LENGTH`](crate::MAX_LENGTH), the largest
    /// octet-string length the reference tier can address.
    LengthOutOfRange { length: u64 },
    /// Occurs when the supplied content doesn't have the byte count the encoding calls for:
    /// exactly `length` bytes for an inline value, or exactly the codec's digest width for a
    /// referenced value.
    ContentLengthMismatch { expected: usize, actual: usize },
    /// Occurs when a buffer being decoded ends before the layout declared by its lead byte is
    /// complete. `needed` is the total encoded size the lead byte promised.
    TruncatedInput { needed: usize, actual: usize },
    /// Occurs when constructing a codec with a digest width the encoding cannot carry. Widths
    /// must be between 1 and 64 bytes, keeping every encoded value within 72 bytes.
    InvalidDigestWidth { width: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::LengthOutOfRange { length } => write!(
                f,
                "Length {} exceeds the maximum encodable length {}",
                length,
                crate::MAX_LENGTH
            ),
            Error::ContentLengthMismatch { expected, actual } => write!(
                f,
                "Content was {} bytes, but the encoding calls for exactly {}",
                actual, expected
            ),
            Error::TruncatedInput { needed, actual } => write!(
                f,
                "Value declares {} encoded bytes, but only {} were available",
                needed, actual
            ),
            Error::InvalidDigestWidth { width } => write!(
                f,
                "Digest width {} is outside the supported range of 1-64 bytes",
                width
            ),
        }
    }
}

impl std::error::Error for Error {}
