//! Error types for cursor reads.

use core::fmt;

/// Error from a cursor read or reposition.
///
/// Failed operations leave the cursor where it was; a reader is safe to
/// reuse after any error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError {
    /// Not enough bytes remain for a fixed-width read, or a reposition
    /// landed outside `[0, len]`.
    OutOfBounds {
        /// Bytes needed (or the requested offset).
        needed: usize,
        /// Bytes available (or the buffer length).
        available: usize,
    },

    /// A length-prefixed field declared more payload than remains.
    MalformedLength {
        /// Payload bytes the prefix declared.
        declared: usize,
        /// Payload bytes actually remaining.
        available: usize,
    },

    /// String payload is not valid UTF-8.
    InvalidEncoding {
        /// Length of the valid UTF-8 prefix of the payload.
        valid_up_to: usize,
    },
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { needed, available } => {
                write!(
                    f,
                    "read out of bounds: needed {needed} bytes, only {available} available"
                )
            }
            Self::MalformedLength { declared, available } => {
                write!(
                    f,
                    "malformed length prefix: declared {declared} bytes, only {available} available"
                )
            }
            Self::InvalidEncoding { valid_up_to } => {
                write!(
                    f,
                    "string payload is not valid UTF-8 (valid up to byte {valid_up_to})"
                )
            }
        }
    }
}

impl core::error::Error for ReadError {}

/// Result type for cursor reads.
pub type Result<T> = core::result::Result<T, ReadError>;
