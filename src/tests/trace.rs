extern crate std;

use core::cell::Cell;
use std::string::ToString;

use crate::{CursorReader, FnTrace, ReadOp, ReadTrace};

#[test]
fn sink_sees_each_successful_read() {
    let seen = Cell::new(0usize);
    let buf = [1u8, 2, 3, 4];
    let mut reader =
        CursorReader::with_trace(&buf[..], FnTrace(|_t: ReadTrace| seen.set(seen.get() + 1)));

    reader.read_u8().unwrap();
    reader.read_u16().unwrap();
    reader.read_bool().unwrap();

    assert_eq!(seen.get(), 3);
}

#[test]
fn failed_reads_are_not_traced() {
    let seen = Cell::new(0usize);
    let buf = [0xaau8, 0xbb];
    let mut reader =
        CursorReader::with_trace(&buf[..], FnTrace(|_t: ReadTrace| seen.set(seen.get() + 1)));

    assert!(reader.read_u32().is_err());
    assert_eq!(seen.get(), 0);
    assert_eq!(reader.offset(), 0);

    reader.read_u16().unwrap();
    assert_eq!(seen.get(), 1);
}

#[test]
fn records_carry_raw_bits_width_and_offset() {
    let last = Cell::new(None::<ReadTrace>);
    let buf = [0x34u8, 0x12];
    let mut reader = CursorReader::with_trace(&buf[..], FnTrace(|t: ReadTrace| last.set(Some(t))));

    reader.read_u16().unwrap();

    let trace = last.get().unwrap();
    assert_eq!(trace.op, ReadOp::U16);
    assert_eq!(trace.raw, 0x1234);
    assert_eq!(trace.width, 2);
    assert_eq!(trace.offset, 2);
}

#[test]
fn signed_records_carry_unsigned_bit_patterns() {
    let last = Cell::new(None::<ReadTrace>);
    let buf = [0xffu8];
    let mut reader = CursorReader::with_trace(&buf[..], FnTrace(|t: ReadTrace| last.set(Some(t))));

    assert_eq!(reader.read_i8().unwrap(), -1);

    let trace = last.get().unwrap();
    assert_eq!(trace.op, ReadOp::I8);
    assert_eq!(trace.raw, 0xff);
}

#[test]
fn op_names_are_stable() {
    assert_eq!(ReadOp::U8.name(), "u8");
    assert_eq!(ReadOp::BitField.name(), "bitfield");
    assert_eq!(ReadOp::Str.name(), "string");
    assert_eq!(ReadOp::F64.to_string(), "f64");
}
