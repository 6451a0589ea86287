//! The cursor reader.

#[cfg(feature = "alloc")]
use alloc::{string::String, vec::Vec};

use uuid::Uuid;

use crate::error::{ReadError, Result};
use crate::trace::{NullTrace, ReadOp, ReadTrace, TraceSink};

/// Sequential little-endian reader over a borrowed byte buffer.
///
/// The buffer is fixed at construction and never mutated; the only mutable
/// state is the cursor. Every successful read advances the cursor by exactly
/// the bytes it consumed; failed reads leave it unchanged. An optional
/// [`TraceSink`] observes successful reads.
///
/// # Example
///
/// ```
/// use bytecursor::CursorReader;
///
/// let frame = [0xd2, 0x04, 0x00, 0x00];
/// let mut reader = CursorReader::new(&frame);
///
/// assert_eq!(reader.read_u32()?, 1234);
/// assert_eq!(reader.offset(), 4);
/// # Ok::<(), bytecursor::ReadError>(())
/// ```
#[derive(Debug)]
pub struct CursorReader<'a, S = NullTrace> {
    buf: &'a [u8],
    offset: usize,
    trace: S,
}

/// Assemble up to 8 little-endian bytes into their raw bit pattern.
fn raw_bits(bytes: &[u8]) -> u64 {
    let mut raw = 0u64;
    for (i, byte) in bytes.iter().enumerate() {
        raw |= u64::from(*byte) << (i * 8);
    }
    raw
}

macro_rules! impl_read_int {
    ($($(#[$meta:meta])* $name:ident => $ty:ty, $op:expr;)+) => {
        $(
            $(#[$meta])*
            #[inline]
            pub fn $name(&mut self) -> Result<$ty> {
                const WIDTH: usize = core::mem::size_of::<$ty>();
                let bytes = self.take(WIDTH)?;
                // take() returned exactly WIDTH bytes, so this cannot fail.
                let Ok(bytes) = <[u8; WIDTH]>::try_from(bytes) else {
                    unreachable!()
                };
                self.emit($op, raw_bits(&bytes), WIDTH);
                Ok(<$ty>::from_le_bytes(bytes))
            }
        )+
    };
}

impl<'a> CursorReader<'a> {
    /// Create a reader over `buf` with the cursor at 0 and no tracing.
    ///
    /// An empty buffer is legal and reports itself as consumed immediately.
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            offset: 0,
            trace: NullTrace,
        }
    }
}

impl<'a, S: TraceSink> CursorReader<'a, S> {
    /// Create a reader that reports each successful read to `trace`.
    pub fn with_trace(buf: &'a [u8], trace: S) -> Self {
        Self {
            buf,
            offset: 0,
            trace,
        }
    }

    /// Current cursor position in bytes.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes remaining between the cursor and the end of the buffer.
    ///
    /// Saturates at 0 when a bit-field skip has pushed the cursor past the
    /// end (see [`read_bit_field`](Self::read_bit_field)).
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.offset)
    }

    /// The backing buffer.
    #[inline]
    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    /// True iff the cursor sits exactly at the end of the buffer.
    ///
    /// False for any other position, including positions past the end.
    #[inline]
    pub fn is_consumed(&self) -> bool {
        self.offset == self.buf.len()
    }

    /// Reposition the cursor to `offset`.
    ///
    /// Any position in `[0, len]` is accepted, including mid-value; no
    /// alignment with prior read boundaries is checked.
    ///
    /// # Errors
    ///
    /// [`ReadError::OutOfBounds`] if `offset > len`.
    pub fn set_offset(&mut self, offset: usize) -> Result<()> {
        if offset > self.buf.len() {
            return Err(ReadError::OutOfBounds {
                needed: offset,
                available: self.buf.len(),
            });
        }
        self.offset = offset;
        Ok(())
    }

    /// New reader over the same buffer, without copying it.
    ///
    /// The clone starts at cursor 0, or at this reader's current cursor when
    /// `copy_offset` is true. The two cursors advance independently
    /// afterwards.
    pub fn fork(&self, copy_offset: bool) -> Self
    where
        S: Clone,
    {
        Self {
            buf: self.buf,
            offset: if copy_offset { self.offset } else { 0 },
            trace: self.trace.clone(),
        }
    }

    /// The trace sink.
    pub fn trace(&self) -> &S {
        &self.trace
    }

    /// Mutable access to the trace sink.
    pub fn trace_mut(&mut self) -> &mut S {
        &mut self.trace
    }

    /// Consume the reader and return its trace sink.
    pub fn into_trace(self) -> S {
        self.trace
    }

    /// Consume `needed` bytes at the cursor, or fail without moving it.
    #[inline]
    fn take(&mut self, needed: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if available < needed {
            return Err(ReadError::OutOfBounds { needed, available });
        }
        let bytes = &self.buf[self.offset..self.offset + needed];
        self.offset += needed;
        Ok(bytes)
    }

    #[inline]
    fn emit(&mut self, op: ReadOp, raw: u64, width: usize) {
        self.trace.record(ReadTrace {
            op,
            raw,
            width,
            offset: self.offset,
        });
    }

    impl_read_int! {
        /// Read an unsigned 8-bit integer and advance the cursor by 1.
        read_u8 => u8, ReadOp::U8;
        /// Read a signed 8-bit integer and advance the cursor by 1.
        read_i8 => i8, ReadOp::I8;
        /// Read an unsigned little-endian 16-bit integer and advance the
        /// cursor by 2.
        read_u16 => u16, ReadOp::U16;
        /// Read a signed little-endian 16-bit integer and advance the cursor
        /// by 2.
        read_i16 => i16, ReadOp::I16;
        /// Read an unsigned little-endian 32-bit integer and advance the
        /// cursor by 4.
        read_u32 => u32, ReadOp::U32;
        /// Read a signed little-endian 32-bit integer and advance the cursor
        /// by 4.
        read_i32 => i32, ReadOp::I32;
        /// Read an unsigned little-endian 64-bit integer and advance the
        /// cursor by 8.
        read_u64 => u64, ReadOp::U64;
        /// Read a signed little-endian 64-bit integer and advance the cursor
        /// by 8.
        read_i64 => i64, ReadOp::I64;
    }

    /// Read a little-endian IEEE-754 binary32 and advance the cursor by 4.
    #[inline]
    pub fn read_f32(&mut self) -> Result<f32> {
        const WIDTH: usize = core::mem::size_of::<f32>();
        let bytes = self.take(WIDTH)?;
        let Ok(bytes) = <[u8; WIDTH]>::try_from(bytes) else {
            unreachable!()
        };
        let bits = u32::from_le_bytes(bytes);
        self.emit(ReadOp::F32, u64::from(bits), WIDTH);
        Ok(f32::from_bits(bits))
    }

    /// Read a little-endian IEEE-754 binary64 and advance the cursor by 8.
    #[inline]
    pub fn read_f64(&mut self) -> Result<f64> {
        const WIDTH: usize = core::mem::size_of::<f64>();
        let bytes = self.take(WIDTH)?;
        let Ok(bytes) = <[u8; WIDTH]>::try_from(bytes) else {
            unreachable!()
        };
        let bits = u64::from_le_bytes(bytes);
        self.emit(ReadOp::F64, bits, WIDTH);
        Ok(f64::from_bits(bits))
    }

    /// Read one byte as a boolean and advance the cursor by 1.
    ///
    /// Decodes to `true` iff the byte is exactly 1; every other value,
    /// including nonzero values, decodes to `false`.
    #[inline]
    pub fn read_bool(&mut self) -> Result<bool> {
        let byte = self.take(1)?[0];
        self.emit(ReadOp::Bool, u64::from(byte), 1);
        Ok(byte == 1)
    }

    /// Read 16 raw bytes as a UUID and advance the cursor by 16.
    ///
    /// The returned [`Uuid`] displays in the canonical lowercase hyphenated
    /// 8-4-4-4-12 form.
    ///
    /// # Errors
    ///
    /// [`ReadError::MalformedLength`] if fewer than 16 bytes remain.
    pub fn read_uuid(&mut self) -> Result<Uuid> {
        const WIDTH: usize = 16;
        let available = self.remaining();
        if available < WIDTH {
            return Err(ReadError::MalformedLength {
                declared: WIDTH,
                available,
            });
        }
        let Ok(bytes) = <[u8; WIDTH]>::try_from(&self.buf[self.offset..self.offset + WIDTH])
        else {
            unreachable!()
        };
        self.offset += WIDTH;
        self.emit(ReadOp::Uuid, WIDTH as u64, WIDTH);
        Ok(Uuid::from_bytes(bytes))
    }

    /// Read a string with a u16 little-endian length prefix and advance the
    /// cursor by 2 plus the declared length.
    ///
    /// # Errors
    ///
    /// [`ReadError::OutOfBounds`] if the prefix itself does not fit;
    /// [`ReadError::MalformedLength`] if the declared payload exceeds the
    /// remainder; [`ReadError::InvalidEncoding`] if the payload is not valid
    /// UTF-8. The cursor does not move on any failure.
    #[cfg(feature = "alloc")]
    pub fn read_string(&mut self) -> Result<String> {
        let available = self.remaining();
        if available < 2 {
            return Err(ReadError::OutOfBounds {
                needed: 2,
                available,
            });
        }
        let Ok(prefix) = <[u8; 2]>::try_from(&self.buf[self.offset..self.offset + 2]) else {
            unreachable!()
        };
        let declared = usize::from(u16::from_le_bytes(prefix));
        if available - 2 < declared {
            return Err(ReadError::MalformedLength {
                declared,
                available: available - 2,
            });
        }
        let start = self.offset + 2;
        let text = core::str::from_utf8(&self.buf[start..start + declared]).map_err(|err| {
            ReadError::InvalidEncoding {
                valid_up_to: err.valid_up_to(),
            }
        })?;
        self.offset = start + declared;
        self.emit(ReadOp::Str, declared as u64, 2 + declared);
        Ok(text.into())
    }

    /// Read a bit field: a one-byte declared count `n`, then one payload
    /// byte per started group of 8, each contributing 8 flags in
    /// least-significant-bit-first order.
    ///
    /// The cursor advances by `1 + ceil(n / 8) + n`: the trailing `n`-byte
    /// skip is part of the wire format this reader consumes and can place
    /// the cursor past the end of the buffer. Subsequent reads then fail
    /// with [`ReadError::OutOfBounds`], [`remaining`](Self::remaining)
    /// reports 0, and [`is_consumed`](Self::is_consumed) reports false;
    /// [`set_offset`](Self::set_offset) restores an in-bounds position.
    ///
    /// # Errors
    ///
    /// [`ReadError::OutOfBounds`] on an empty remainder;
    /// [`ReadError::MalformedLength`] if the payload bytes to decode exceed
    /// the remainder. The cursor does not move on failure.
    #[cfg(feature = "alloc")]
    pub fn read_bit_field(&mut self) -> Result<Vec<bool>> {
        let available = self.remaining();
        if available < 1 {
            return Err(ReadError::OutOfBounds {
                needed: 1,
                available,
            });
        }
        let declared = usize::from(self.buf[self.offset]);
        let groups = declared.div_ceil(8);
        if available - 1 < groups {
            return Err(ReadError::MalformedLength {
                declared,
                available: available - 1,
            });
        }
        let mut flags = Vec::with_capacity(groups * 8);
        for group in 0..groups {
            let byte = self.buf[self.offset + 1 + group];
            for bit in 0..8 {
                flags.push(byte & (1 << bit) != 0);
            }
        }
        self.offset += 1 + groups + declared;
        self.emit(ReadOp::BitField, declared as u64, 1 + groups + declared);
        Ok(flags)
    }
}
