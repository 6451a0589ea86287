//! Sequential little-endian decoding of wire messages.
//!
//! [`CursorReader`] wraps a borrowed, immutable byte buffer and a cursor.
//! Each typed read decodes a value at the cursor, advances it by the bytes
//! consumed, and optionally reports the read to an injected [`TraceSink`].
//! The buffer is never copied or mutated; independent readers over the same
//! buffer are created with [`CursorReader::fork`].
//!
//! # Example
//!
//! ```
//! use bytecursor::CursorReader;
//!
//! let frame = [0x2a, 0x01, 0x00, 0x01];
//! let mut reader = CursorReader::new(&frame);
//!
//! assert_eq!(reader.read_u8()?, 42);
//! assert_eq!(reader.read_u16()?, 1);
//! assert!(reader.read_bool()?);
//! assert!(reader.is_consumed());
//! # Ok::<(), bytecursor::ReadError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod error;
mod reader;
mod trace;

pub use error::{ReadError, Result};
pub use reader::CursorReader;
#[cfg(feature = "alloc")]
pub use trace::CollectTrace;
#[cfg(feature = "log")]
pub use trace::LogTrace;
pub use trace::{FnTrace, NullTrace, ReadOp, ReadTrace, TraceSink};
pub use uuid::Uuid;

#[cfg(test)]
mod tests;
