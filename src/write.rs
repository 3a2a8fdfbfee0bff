// Copyright 2017 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Traits and implementations for writing bits to a stream.
//!
//! ## Example
//! ```
//! use bitstream_varint::{BitWrite, BitWriter, Mode};
//!
//! let mut data = Vec::new();
//! {
//!     let mut writer = BitWriter::new(&mut data);
//!     writer.write_compressed(8u32, Mode::Precise).unwrap();
//!     writer.write_compressed(257u32, Mode::Precise).unwrap();
//!     writer.flush().unwrap();
//! }
//! assert_eq!(data, [0b0000_1000, 0b1000_0001, 0b0000_0001]);
//! ```

use super::byte_io::ByteSink;
use super::compressed;
use super::{low_mask, CompressedInt, Error, Mode, Result, Settings, SignedCompressedInt};

/// For writing bit values to an underlying byte sink.
pub trait BitWrite {
    /// Writes a single bit.
    fn write_bit(&mut self, bit: bool) -> Result<()>;

    /// Writes the low `width` bits of `value`, most-significant first.
    ///
    /// # Panics
    ///
    /// Panics if `width` is greater than 8.
    fn write_bits(&mut self, value: u8, width: u32) -> Result<()>;

    /// Pads a partially filled byte with 0 bits and emits it.
    /// Does nothing if no bits are pending.
    fn flush(&mut self) -> Result<()>;

    /// Returns the number of unused low-order bit positions
    /// in the pending byte.
    ///
    /// 0 means the byte is full and is emitted by the next write.
    fn free_bits(&self) -> u32;

    /// Returns the settings the writer was built with.
    fn settings(&self) -> Settings;

    /// Writes a single 1 bit.
    #[inline]
    fn write_bit_on(&mut self) -> Result<()> {
        self.write_bit(true)
    }

    /// Writes a single 0 bit.
    #[inline]
    fn write_bit_off(&mut self) -> Result<()> {
        self.write_bit(false)
    }

    /// Writes the entirety of a byte buffer to the stream
    /// in 8-bit increments.
    fn write_bytes(&mut self, buf: &[u8]) -> Result<()> {
        buf.iter().try_for_each(|b| self.write_bits(*b, 8))
    }

    /// Writes an unsigned value as a compressed integer
    /// using the given strategy.
    fn write_compressed<U>(&mut self, value: U, mode: Mode) -> Result<()>
    where
        U: CompressedInt,
    {
        match mode {
            Mode::Precise => compressed::write_precise(self, value.to_u64()),
            Mode::Lazy => compressed::write_lazy(self, value.to_u64(), U::BITS),
        }
    }

    /// Writes an unsigned value as a compressed integer
    /// using the session's integer strategy.
    #[inline]
    fn write_int<U>(&mut self, value: U) -> Result<()>
    where
        U: CompressedInt,
    {
        let mode = self.settings().int_mode;
        self.write_compressed(value, mode)
    }

    /// Writes a signed value as a zigzag-mapped compressed integer.
    #[inline]
    fn write_compressed_signed<S>(&mut self, value: S, mode: Mode) -> Result<()>
    where
        S: SignedCompressedInt,
    {
        self.write_compressed(value.zigzag(), mode)
    }

    /// Writes a signed value as a zigzag-mapped compressed integer
    /// using the session's integer strategy.
    #[inline]
    fn write_signed_int<S>(&mut self, value: S) -> Result<()>
    where
        S: SignedCompressedInt,
    {
        self.write_int(value.zigzag())
    }
}

/// Packs bits into a one-byte accumulator, most-significant
/// first, and hands completed bytes to a [`ByteSink`].
///
/// Pending bits are not emitted when the writer is dropped;
/// call [`BitWrite::flush`] at the end of each header group.
#[derive(Debug)]
pub struct BitWriter<W: ByteSink> {
    sink: W,
    buffer: u8,
    free_bits: u32,
    settings: Settings,
    written: u64,
}

impl<W: ByteSink> BitWriter<W> {
    /// Wraps a writer around a sink with default settings.
    pub fn new(sink: W) -> BitWriter<W> {
        Self::with_settings(sink, Settings::default())
    }

    /// Wraps a writer around a sink with the given settings.
    pub fn with_settings(sink: W, settings: Settings) -> BitWriter<W> {
        BitWriter {
            sink,
            buffer: 0,
            free_bits: 8,
            settings,
            written: 0,
        }
    }

    /// Returns true if no bits are pending in the accumulator.
    #[inline]
    pub fn is_byte_aligned(&self) -> bool {
        self.free_bits == 8
    }

    /// Number of whole bytes handed to the sink so far.
    #[inline]
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    #[inline]
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Unwraps the sink. Pending bits are discarded.
    #[inline]
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn emit(&mut self) -> Result<()> {
        self.sink
            .write_byte(self.buffer)
            .map_err(|e| Error::from_io(e, self.written))?;
        self.written += 1;
        self.buffer = 0;
        self.free_bits = 8;
        Ok(())
    }
}

impl<W: ByteSink> BitWrite for BitWriter<W> {
    fn write_bit(&mut self, bit: bool) -> Result<()> {
        if self.free_bits == 0 {
            self.emit()?;
        }
        self.free_bits -= 1;
        if bit {
            self.buffer |= 1 << self.free_bits;
        }
        Ok(())
    }

    fn write_bits(&mut self, value: u8, width: u32) -> Result<()> {
        assert!(width <= 8, "cannot write {width} bits at once");

        if width == 0 {
            return Ok(());
        }
        if self.free_bits == 0 {
            self.emit()?;
        }

        let value = value & low_mask(width);
        if width > self.free_bits {
            match self.settings.bit_mode {
                Mode::Precise => {
                    let remaining = width - self.free_bits;
                    self.buffer |= value >> remaining;
                    self.emit()?;
                    self.free_bits = 8 - remaining;
                    self.buffer = value << self.free_bits;
                    return Ok(());
                }
                Mode::Lazy => self.emit()?,
            }
        }

        self.free_bits -= width;
        self.buffer |= value << self.free_bits;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.free_bits < 8 {
            self.emit()
        } else {
            Ok(())
        }
    }

    #[inline]
    fn free_bits(&self) -> u32 {
        self.free_bits
    }

    #[inline]
    fn settings(&self) -> Settings {
        self.settings
    }
}
