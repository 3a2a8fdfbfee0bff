// Copyright 2017 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The bit-packed variable-length integer code.
//!
//! A compressed integer starts with a unary header announcing
//! `k` continuation bytes:
//!
//! | k | header     |
//! |---|------------|
//! | 0 | `0`        |
//! | 1 | `10`       |
//! | 2 | `110`      |
//! | … | …          |
//! | 7 | `11111110` |
//! | 8 | `11111111` |
//!
//! The high bits of the value fill whatever is left of the
//! byte(s) holding the header; the low `8 * k` bits follow as
//! whole continuation bytes, most-significant byte first.
//!
//! When fewer than [`EXTENDED_THRESHOLD`] bits are free before the
//! header, one extra byte is reserved for data so that short values
//! still fit without another header step.
//!
//! The lazy code instead writes a flag bit followed by either
//! one raw byte (values below 255) or the value at full width.

use super::read::BitRead;
use super::write::BitWrite;
use super::{Error, Result};

/// Headers starting with fewer free bits than this use the
/// extended layout.
pub const EXTENDED_THRESHOLD: u32 = 4;

/// The largest continuation-byte count, marked by an all-ones header.
pub const MAX_CONTINUATION_BYTES: u32 = 8;

/// Length in bits of the header announcing `k` continuation bytes.
#[inline]
pub const fn header_len(k: u32) -> u32 {
    if k >= 7 {
        8
    } else {
        k + 1
    }
}

/// Picks the number of continuation bytes used to encode `value`
/// when `bits_free` bits are free before the header.
///
/// `bits_free` is what [`BitWrite::free_bits`] reports. 0 (a full
/// byte pending) is treated as 8, since the encoder flushes first.
///
/// Encoder and decoder both depend on this table; changing it
/// changes the wire format.
pub fn continuation_bytes(value: u64, bits_free: u32) -> u32 {
    debug_assert!(bits_free <= 8);

    let bits_free = if bits_free == 0 { 8 } else { bits_free };
    let spill = if bits_free < EXTENDED_THRESHOLD { 8 } else { 0 };
    (0..MAX_CONTINUATION_BYTES)
        .find(|k| {
            let capacity = bits_free - 1 + 7 * k + spill;
            value.checked_shr(capacity).map_or(true, |high| high == 0)
        })
        .unwrap_or(MAX_CONTINUATION_BYTES)
}

#[inline(always)]
fn shr(value: u64, shift: u32) -> u64 {
    value.checked_shr(shift).unwrap_or(0)
}

fn write_header<W>(writer: &mut W, k: u32) -> Result<()>
where
    W: BitWrite + ?Sized,
{
    for _ in 0..k {
        writer.write_bit_on()?;
    }
    if k < MAX_CONTINUATION_BYTES {
        writer.write_bit_off()?;
    }
    Ok(())
}

fn read_header<R>(reader: &mut R) -> Result<u32>
where
    R: BitRead + ?Sized,
{
    let mut ones = 0;
    while ones < MAX_CONTINUATION_BYTES && reader.read_bit()? {
        ones += 1;
    }
    Ok(ones)
}

/// Writes `value` with the unary-headed variable-length code.
///
/// The writer is left byte-aligned: either flushed, or with a
/// full continuation byte pending.
pub fn write_precise<W>(writer: &mut W, value: u64) -> Result<()>
where
    W: BitWrite + ?Sized,
{
    // a full pending byte is the same boundary as an empty one
    if writer.free_bits() == 0 {
        writer.flush()?;
    }

    let bits_free = writer.free_bits();
    let k = continuation_bytes(value, bits_free);
    let mut bits_to_go = 8 * k;
    log::trace!("compressing {value}: k={k}, {bits_free} bits free");

    write_header(writer, k)?;

    let high = shr(value, bits_to_go);
    if bits_free < EXTENDED_THRESHOLD {
        if header_len(k) < bits_free {
            let width = writer.free_bits();
            writer.write_bits(shr(high, 8) as u8, width)?;
        }
        if writer.free_bits() == 0 {
            writer.flush()?;
        }
    }
    let width = writer.free_bits();
    writer.write_bits(high as u8, width)?;
    writer.flush()?;

    while bits_to_go > 0 {
        bits_to_go -= 8;
        writer.write_bits((value >> bits_to_go) as u8, 8)?;
    }
    Ok(())
}

/// Reads a value written by [`write_precise`].
pub fn read_precise<R>(reader: &mut R) -> Result<u64>
where
    R: BitRead + ?Sized,
{
    if reader.free_bits() == 0 {
        reader.move_to_new_byte()?;
    }

    let bits_free = reader.free_bits();
    let k = read_header(reader)?;
    let mut bits_to_go = 8 * k;
    log::trace!("decompressing: k={k}, {bits_free} bits free");

    // wide enough for any header and data bits, so that malformed
    // input overflows the target type instead of the shifts
    let mut value: u128 = 0;
    if bits_free < EXTENDED_THRESHOLD {
        if header_len(k) < bits_free {
            let width = reader.free_bits();
            value |= u128::from(reader.read_bits(width)?) << (bits_to_go + 8);
        }
        if reader.free_bits() == 0 {
            reader.move_to_new_byte()?;
        }
    }
    let width = reader.free_bits();
    value |= u128::from(reader.read_bits(width)?) << bits_to_go;

    while bits_to_go > 0 {
        bits_to_go -= 8;
        value |= u128::from(reader.read_bits(8)?) << bits_to_go;
    }

    u64::try_from(value).map_err(|_| Error::Overflow { bits: u64::BITS })
}

/// Writes `value` with the lazy code, falling back to
/// `bits` (a whole number of bytes) for large values.
pub fn write_lazy<W>(writer: &mut W, value: u64, bits: u32) -> Result<()>
where
    W: BitWrite + ?Sized,
{
    debug_assert!(bits % 8 == 0 && bits <= u64::BITS);

    if value < 0xFF {
        writer.write_bit_on()?;
        writer.write_bits(value as u8, 8)
    } else {
        writer.write_bit_off()?;
        (0..bits / 8)
            .rev()
            .try_for_each(|i| writer.write_bits((value >> (8 * i)) as u8, 8))
    }
}

/// Reads a value written by [`write_lazy`] with the same `bits`.
pub fn read_lazy<R>(reader: &mut R, bits: u32) -> Result<u64>
where
    R: BitRead + ?Sized,
{
    debug_assert!(bits % 8 == 0 && bits <= u64::BITS);

    if reader.read_bit()? {
        reader.read_bits(8).map(u64::from)
    } else {
        let mut value = 0;
        for _ in 0..bits / 8 {
            value = (value << 8) | u64::from(reader.read_bits(8)?);
        }
        Ok(value)
    }
}
