// Copyright 2017 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Forward-only byte endpoints underneath the bit cursors.
//!
//! Any [`std::io::Write`] is a [`ByteSink`] and any
//! [`std::io::Read`] is a [`ByteSource`].

use std::io;

/// A sequential destination for whole bytes.
pub trait ByteSink {
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;

    #[inline]
    fn write_bytes(&mut self, buf: &[u8]) -> io::Result<()> {
        buf.iter().try_for_each(|b| self.write_byte(*b))
    }
}

/// A sequential origin of whole bytes.
///
/// Running out of data must be reported as an error of kind
/// [`io::ErrorKind::UnexpectedEof`].
pub trait ByteSource {
    #[inline(always)]
    fn read_byte(&mut self) -> io::Result<u8> {
        let mut byte = 0;
        self.read_bytes(core::slice::from_mut(&mut byte))
            .map(|()| byte)
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<()>;
}

impl<W: io::Write + ?Sized> ByteSink for W {
    #[inline]
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.write_all(core::slice::from_ref(&byte))
    }

    #[inline]
    fn write_bytes(&mut self, buf: &[u8]) -> io::Result<()> {
        self.write_all(buf)
    }
}

impl<R: io::Read + ?Sized> ByteSource for R {
    #[inline]
    fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.read_exact(buf)
    }
}
