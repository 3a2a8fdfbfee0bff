// Copyright 2017 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

extern crate bitstream_varint;

use std::io;

use bitstream_varint::{BitWrite, BitWriter, Error, Mode, Settings};

fn write_fields(settings: Settings) -> Vec<u8> {
    let mut output = Vec::new();
    {
        let mut w = BitWriter::with_settings(&mut output, settings);
        w.write_bits(2, 2).unwrap();
        w.write_bits(6, 3).unwrap();
        w.write_bits(7, 5).unwrap();
        w.write_bits(5, 3).unwrap();
        w.write_bits(0b101, 3).unwrap();
        w.write_bits(0x3B, 8).unwrap();
        w.write_bits(0xC1, 8).unwrap();
        w.flush().unwrap();
    }
    output
}

#[test]
fn test_writer_precise() {
    assert_eq!(write_fields(Settings::precise()), [0xB1, 0xED, 0x3B, 0xC1]);
}

#[test]
fn test_writer_lazy() {
    assert_eq!(
        write_fields(Settings::lazy()),
        [0xB0, 0x3D, 0xA0, 0x3B, 0xC1]
    );
}

#[test]
fn test_writer_single_bits() {
    let mut w = BitWriter::new(Vec::new());
    for bit in [true, false, true, true, false, false, false, true, true] {
        w.write_bit(bit).unwrap();
    }
    assert_eq!(w.free_bits(), 7);
    assert_eq!(w.bytes_written(), 1);
    w.flush().unwrap();
    assert_eq!(w.into_inner(), [0xB1, 0x80]);
}

#[test]
fn test_writer_on_off() {
    let mut w = BitWriter::new(Vec::new());
    w.write_bit_on().unwrap();
    w.write_bit_off().unwrap();
    w.write_bit_on().unwrap();
    w.flush().unwrap();
    assert_eq!(w.into_inner(), [0b1010_0000]);
}

#[test]
fn test_writer_zero_width() {
    let mut w = BitWriter::new(Vec::new());
    w.write_bits(0xFF, 0).unwrap();
    assert!(w.is_byte_aligned());
    w.write_bits(0xFF, 8).unwrap();
    w.write_bits(0xFF, 0).unwrap();
    assert_eq!(w.free_bits(), 0);
    assert!(w.get_ref().is_empty());
}

#[test]
fn test_flush_idempotent() {
    let mut w = BitWriter::new(Vec::new());
    w.flush().unwrap();
    assert!(w.get_ref().is_empty());

    w.write_bit_on().unwrap();
    w.flush().unwrap();
    w.flush().unwrap();
    assert_eq!(w.bytes_written(), 1);
    assert!(w.is_byte_aligned());
    assert_eq!(w.into_inner(), [0x80]);
}

#[test]
fn test_flush_full_byte() {
    let mut w = BitWriter::new(Vec::new());
    w.write_bits(0x5A, 8).unwrap();
    w.flush().unwrap();
    w.flush().unwrap();
    assert_eq!(w.into_inner(), [0x5A]);
}

#[test]
fn test_write_bytes_unaligned() {
    let mut w = BitWriter::new(Vec::new());
    w.write_bits(0b1111, 4).unwrap();
    w.write_bytes(&[0x12, 0x34]).unwrap();
    w.flush().unwrap();
    assert_eq!(w.into_inner(), [0xF1, 0x23, 0x40]);
}

#[test]
fn test_write_compressed_vectors() {
    let mut w = BitWriter::new(Vec::new());
    w.write_compressed(8u32, Mode::Precise).unwrap();
    assert!(w.is_byte_aligned());
    assert_eq!(w.get_ref().as_slice(), &[0b0000_1000]);

    let mut w = BitWriter::new(Vec::new());
    w.write_compressed(257u32, Mode::Precise).unwrap();
    w.flush().unwrap();
    assert_eq!(w.into_inner(), [0b1000_0001, 0b0000_0001]);
}

#[test]
fn test_write_compressed_extended() {
    // 5 bits used, 3 free: header "0", 2 spill bits, then a whole data byte
    let mut w = BitWriter::new(Vec::new());
    w.write_bits(0b11111, 5).unwrap();
    w.write_compressed(0u32, Mode::Precise).unwrap();
    assert_eq!(w.into_inner(), [0b1111_1000, 0b0000_0000]);

    let mut w = BitWriter::new(Vec::new());
    w.write_bits(0b11111, 5).unwrap();
    w.write_compressed(0x3FFu32, Mode::Precise).unwrap();
    assert_eq!(w.into_inner(), [0b1111_1011, 0b1111_1111]);
}

#[test]
fn test_write_compressed_max() {
    let mut w = BitWriter::new(Vec::new());
    w.write_compressed(u64::MAX, Mode::Precise).unwrap();
    w.flush().unwrap();
    assert_eq!(w.into_inner(), [0xFF; 9]);
}

#[test]
fn test_write_compressed_lazy() {
    let mut w = BitWriter::new(Vec::new());
    w.write_compressed(5u32, Mode::Lazy).unwrap();
    w.flush().unwrap();
    assert_eq!(w.into_inner(), [0b1000_0010, 0b1000_0000]);

    let mut w = BitWriter::new(Vec::new());
    w.write_compressed(255u32, Mode::Lazy).unwrap();
    w.flush().unwrap();
    assert_eq!(w.into_inner(), [0x00, 0x00, 0x00, 0x7F, 0x80]);

    let mut w = BitWriter::new(Vec::new());
    w.write_compressed(0x1234u16, Mode::Lazy).unwrap();
    w.flush().unwrap();
    assert_eq!(w.into_inner(), [0x09, 0x1A, 0x00]);
}

#[test]
fn test_write_int_uses_session_mode() {
    let mut precise = BitWriter::new(Vec::new());
    precise.write_int(5u32).unwrap();
    precise.flush().unwrap();

    let mut lazy = BitWriter::with_settings(Vec::new(), Settings::new().with_int_mode(Mode::Lazy));
    lazy.write_int(5u32).unwrap();
    lazy.flush().unwrap();

    assert_eq!(precise.into_inner(), [0x05]);
    assert_eq!(lazy.into_inner(), [0b1000_0010, 0b1000_0000]);
}

#[test]
fn test_write_signed() {
    let mut w = BitWriter::new(Vec::new());
    w.write_compressed_signed(-1i32, Mode::Precise).unwrap();
    w.write_signed_int(1i64).unwrap();
    w.flush().unwrap();
    assert_eq!(w.into_inner(), [0x01, 0x02]);
}

struct FailingSink;

impl io::Write for FailingSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_sink_failure_propagates() {
    let mut w = BitWriter::new(FailingSink);
    w.write_bit_on().unwrap();
    match w.flush() {
        Err(Error::Io { position, source }) => {
            assert_eq!(position, 0);
            assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
        }
        other => panic!("unexpected result {other:?}"),
    }
}
