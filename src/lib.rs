// Copyright 2017 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Traits and helpers for packing flags, raw bit fields and
//! variable-length integers into a compact byte stream.
//!
//! Bits are packed most-significant first within each byte.
//! Flags and compressed integers written through the same
//! [`BitWriter`] share byte boundaries, so a group of null flags
//! followed by a length costs as few bytes as possible.
//!
//! ## Example
//! ```
//! use bitstream_varint::{BitRead, BitReader, BitWrite, BitWriter, Mode};
//!
//! let mut data = Vec::new();
//! {
//!     let mut writer = BitWriter::new(&mut data);
//!     writer.write_bit_on().unwrap();
//!     writer.write_compressed(257u32, Mode::Precise).unwrap();
//!     writer.write_bit_off().unwrap();
//!     writer.flush().unwrap();
//! }
//!
//! let mut reader = BitReader::new(data.as_slice());
//! assert!(reader.read_bit().unwrap());
//! assert_eq!(reader.read_compressed::<u32>(Mode::Precise).unwrap(), 257);
//! assert!(!reader.read_bit().unwrap());
//! ```

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]

use std::fmt::Debug;

pub mod byte_io;
pub mod compressed;
mod error;
pub mod read;
mod settings;
pub mod write;

pub use byte_io::{ByteSink, ByteSource};
pub use error::{Error, Result};
pub use settings::{Mode, Settings};

pub use read::BitRead;
pub use read::BitReader;

pub use write::BitWrite;
pub use write::BitWriter;

/// An unsigned integer which may be written as a compressed value.
///
/// The codec itself works on 64-bit values, so implementors
/// only need to widen and narrow themselves.
pub trait CompressedInt: Sized + Copy + Debug {
    /// The type's width in bits, used for the fixed-width
    /// fallback of [`Mode::Lazy`].
    const BITS: u32;

    fn to_u64(self) -> u64;

    /// Narrows a decoded value, returning `None` if it
    /// does not fit into this type.
    fn from_u64(value: u64) -> Option<Self>;
}

/// A signed integer which may be written as a compressed value
/// by zigzag-mapping it onto its unsigned counterpart.
pub trait SignedCompressedInt: Sized + Copy + Debug {
    type Unsigned: CompressedInt;

    fn zigzag(self) -> Self::Unsigned;

    fn unzigzag(value: Self::Unsigned) -> Self;
}

macro_rules! define_compressed_int {
    ($t:ty) => {
        impl CompressedInt for $t {
            const BITS: u32 = <$t>::BITS;

            #[inline(always)]
            fn to_u64(self) -> u64 {
                self as u64
            }

            #[inline(always)]
            fn from_u64(value: u64) -> Option<Self> {
                Self::try_from(value).ok()
            }
        }
    };
}

define_compressed_int!(u8);
define_compressed_int!(u16);
define_compressed_int!(u32);
define_compressed_int!(u64);

macro_rules! define_signed_compressed_int {
    ($t:ty, $u:ty) => {
        impl SignedCompressedInt for $t {
            type Unsigned = $u;

            #[inline(always)]
            fn zigzag(self) -> $u {
                ((self << 1) ^ (self >> (<$t>::BITS - 1))) as $u
            }

            #[inline(always)]
            fn unzigzag(value: $u) -> Self {
                ((value >> 1) as $t) ^ -((value & 1) as $t)
            }
        }
    };
}

define_signed_compressed_int!(i8, u8);
define_signed_compressed_int!(i16, u16);
define_signed_compressed_int!(i32, u32);
define_signed_compressed_int!(i64, u64);

/// Returns a byte with the low `width` bits set.
#[inline(always)]
pub(crate) fn low_mask(width: u32) -> u8 {
    debug_assert!(width <= 8);
    ((1u16 << width) - 1) as u8
}
