//! Trace sink traits and implementations.
//!
//! A [`TraceSink`] observes every successful read a
//! [`CursorReader`](crate::CursorReader) performs. It is a diagnostic
//! capability only: sinks never influence decoding, the cursor, or error
//! handling, and they are never invoked for failed reads.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;
use core::fmt;

/// Identifies the operation that produced a [`ReadTrace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ReadOp {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
    Bool,
    Uuid,
    BitField,
    Str,
}

impl ReadOp {
    /// Stable lowercase name of the operation.
    pub fn name(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::I8 => "i8",
            Self::U16 => "u16",
            Self::I16 => "i16",
            Self::U32 => "u32",
            Self::I32 => "i32",
            Self::U64 => "u64",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Bool => "bool",
            Self::Uuid => "uuid",
            Self::BitField => "bitfield",
            Self::Str => "string",
        }
    }
}

impl fmt::Display for ReadOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One successful read, as seen by a [`TraceSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTrace {
    /// Operation that produced the value.
    pub op: ReadOp,
    /// Raw little-endian bits of the value for fixed-width reads; the
    /// decoded length for UUID, bit-field and string reads.
    pub raw: u64,
    /// Bytes the cursor advanced.
    pub width: usize,
    /// Cursor position after the read.
    pub offset: usize,
}

/// Observes successful reads.
pub trait TraceSink {
    /// Record one read.
    fn record(&mut self, trace: ReadTrace);

    /// Flush buffered records.
    #[inline]
    fn flush(&mut self) {}
}

/// Drops all records. The default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    #[inline]
    fn record(&mut self, _trace: ReadTrace) {}
}

/// Collects records into a Vec.
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, Default)]
pub struct CollectTrace {
    events: Vec<ReadTrace>,
}

#[cfg(feature = "alloc")]
impl CollectTrace {
    /// Create a new collecting sink.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Get collected records.
    pub fn events(&self) -> &[ReadTrace] {
        &self.events
    }

    /// Take collected records, leaving an empty Vec.
    pub fn take(&mut self) -> Vec<ReadTrace> {
        core::mem::take(&mut self.events)
    }

    /// Consume sink and return collected records.
    pub fn into_events(self) -> Vec<ReadTrace> {
        self.events
    }
}

#[cfg(feature = "alloc")]
impl TraceSink for CollectTrace {
    #[inline]
    fn record(&mut self, trace: ReadTrace) {
        self.events.push(trace);
    }
}

/// Calls a closure for each record.
#[derive(Debug)]
pub struct FnTrace<F>(pub F);

impl<F: FnMut(ReadTrace)> TraceSink for FnTrace<F> {
    #[inline]
    fn record(&mut self, trace: ReadTrace) {
        (self.0)(trace);
    }
}

impl<F: Clone> Clone for FnTrace<F> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

/// Emits each record through [`log::debug!`] under the `bytecursor` target.
#[cfg(feature = "log")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrace;

#[cfg(feature = "log")]
impl TraceSink for LogTrace {
    fn record(&mut self, trace: ReadTrace) {
        log::debug!(
            target: "bytecursor",
            "read {}: raw {:#b}, width {}, offset {}",
            trace.op,
            trace.raw,
            trace.width,
            trace.offset
        );
    }
}
