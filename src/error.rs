// Copyright 2017 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::io;

use thiserror::Error;

/// Errors that may occur while packing or unpacking bits.
///
/// A failed write or read leaves the cursor in an unspecified
/// state; the whole serialization operation must be abandoned.
#[derive(Debug, Error)]
pub enum Error {
    /// The byte source ran out of data while bits were still expected.
    #[error("unexpected end of stream after {position} bytes")]
    UnexpectedEof { position: u64 },

    /// The byte sink or source failed.
    #[error("I/O error at byte {position}: {source}")]
    Io {
        position: u64,
        #[source]
        source: io::Error,
    },

    /// A decoded compressed integer does not fit into the requested type.
    #[error("compressed integer does not fit into {bits} bits")]
    Overflow { bits: u32 },
}

impl Error {
    /// Wraps an error from the underlying byte endpoint, keeping
    /// end-of-data distinct from other failures.
    pub(crate) fn from_io(source: io::Error, position: u64) -> Self {
        if source.kind() == io::ErrorKind::UnexpectedEof {
            Self::UnexpectedEof { position }
        } else {
            Self::Io { position, source }
        }
    }
}

/// Result type returned by every fallible bit operation.
pub type Result<T> = std::result::Result<T, Error>;
