// Copyright 2017 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Traits and implementations for reading bits from a stream.
//!
//! ## Example
//! ```
//! use bitstream_varint::{BitRead, BitReader, Mode};
//!
//! let data: [u8; 2] = [0b1100_0001, 0b0000_0000];
//! let mut reader = BitReader::new(&data[..]);
//!
//! assert!(reader.read_bit().unwrap());
//! assert_eq!(reader.read_compressed::<u32>(Mode::Precise).unwrap(), 256);
//! assert!(reader.read_bit().is_err());
//! ```

use super::byte_io::ByteSource;
use super::compressed;
use super::{low_mask, CompressedInt, Error, Mode, Result, Settings, SignedCompressedInt};

/// For reading bit values from an underlying byte source.
pub trait BitRead {
    /// Reads a single bit.
    fn read_bit(&mut self) -> Result<bool>;

    /// Reads `width` bits, most-significant first, into the
    /// low bits of the result.
    ///
    /// # Panics
    ///
    /// Panics if `width` is greater than 8.
    fn read_bits(&mut self, width: u32) -> Result<u8>;

    /// Discards all unread bits of the current byte and
    /// pulls the next one from the source.
    fn move_to_new_byte(&mut self) -> Result<()>;

    /// Returns the number of unread low-order bits
    /// in the current byte.
    ///
    /// 0 means the next read pulls a new byte.
    fn free_bits(&self) -> u32;

    /// Returns the settings the reader was built with.
    fn settings(&self) -> Settings;

    /// Completely fills the given buffer with whole bytes
    /// read in 8-bit increments.
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        for b in buf.iter_mut() {
            *b = self.read_bits(8)?;
        }
        Ok(())
    }

    /// Reads a compressed unsigned integer written with the given strategy.
    fn read_compressed<U>(&mut self, mode: Mode) -> Result<U>
    where
        U: CompressedInt,
    {
        let value = match mode {
            Mode::Precise => compressed::read_precise(self)?,
            Mode::Lazy => compressed::read_lazy(self, U::BITS)?,
        };
        U::from_u64(value).ok_or(Error::Overflow { bits: U::BITS })
    }

    /// Reads a compressed unsigned integer using the
    /// session's integer strategy.
    #[inline]
    fn read_int<U>(&mut self) -> Result<U>
    where
        U: CompressedInt,
    {
        let mode = self.settings().int_mode;
        self.read_compressed(mode)
    }

    /// Reads a zigzag-mapped compressed signed integer.
    #[inline]
    fn read_compressed_signed<S>(&mut self, mode: Mode) -> Result<S>
    where
        S: SignedCompressedInt,
    {
        self.read_compressed(mode).map(S::unzigzag)
    }

    /// Reads a zigzag-mapped compressed signed integer using
    /// the session's integer strategy.
    #[inline]
    fn read_signed_int<S>(&mut self) -> Result<S>
    where
        S: SignedCompressedInt,
    {
        self.read_int().map(S::unzigzag)
    }
}

/// Serves bits, most-significant first, from bytes pulled
/// on demand from a [`ByteSource`].
#[derive(Debug)]
pub struct BitReader<R: ByteSource> {
    source: R,
    current: u8,
    free_bits: u32,
    settings: Settings,
    read: u64,
}

impl<R: ByteSource> BitReader<R> {
    /// Wraps a reader around a source with default settings.
    pub fn new(source: R) -> BitReader<R> {
        Self::with_settings(source, Settings::default())
    }

    /// Wraps a reader around a source with the given settings.
    pub fn with_settings(source: R, settings: Settings) -> BitReader<R> {
        BitReader {
            source,
            current: 0,
            free_bits: 0,
            settings,
            read: 0,
        }
    }

    /// Number of bytes pulled from the source so far.
    #[inline]
    pub fn bytes_read(&self) -> u64 {
        self.read
    }

    #[inline]
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Unwraps the source, positioned after the last pulled byte.
    #[inline]
    pub fn into_inner(self) -> R {
        self.source
    }

    fn pull(&mut self) -> Result<()> {
        self.current = self
            .source
            .read_byte()
            .map_err(|e| Error::from_io(e, self.read))?;
        self.read += 1;
        self.free_bits = 8;
        Ok(())
    }
}

impl<R: ByteSource> BitRead for BitReader<R> {
    fn read_bit(&mut self) -> Result<bool> {
        if self.free_bits == 0 {
            self.pull()?;
        }
        self.free_bits -= 1;
        Ok((self.current >> self.free_bits) & 1 == 1)
    }

    fn read_bits(&mut self, width: u32) -> Result<u8> {
        assert!(width <= 8, "cannot read {width} bits at once");

        if width == 0 {
            return Ok(0);
        }
        if self.free_bits == 0 {
            self.pull()?;
        }

        if width > self.free_bits {
            match self.settings.bit_mode {
                Mode::Precise => {
                    let remaining = width - self.free_bits;
                    let high = self.current & low_mask(self.free_bits);
                    self.pull()?;
                    self.free_bits = 8 - remaining;
                    return Ok((high << remaining) | (self.current >> self.free_bits));
                }
                Mode::Lazy => self.pull()?,
            }
        }

        self.free_bits -= width;
        Ok((self.current >> self.free_bits) & low_mask(width))
    }

    #[inline]
    fn move_to_new_byte(&mut self) -> Result<()> {
        self.pull()
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
