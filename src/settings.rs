// Copyright 2017 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// Trades wire size against encoding work.
///
/// As a bit policy, it decides what happens when a bit field
/// does not fit into the current byte: [`Mode::Precise`] splits it
/// across the boundary, [`Mode::Lazy`] pads the current byte and
/// starts the field on a fresh one.
///
/// As an integer strategy, [`Mode::Precise`] selects the
/// unary-headed variable-length code, while [`Mode::Lazy`] writes
/// a flag followed by either one byte or the full fixed width.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Lazy,
    #[default]
    Precise,
}

/// Options shared by a writer and the reader decoding its output.
///
/// The stream carries no framing, so both sides must be built
/// from equal settings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Settings {
    /// Policy for bit fields spanning a byte boundary.
    pub bit_mode: Mode,
    /// Strategy used by `write_int` and `read_int`.
    pub int_mode: Mode,
}

impl Settings {
    pub const fn new() -> Self {
        Self {
            bit_mode: Mode::Precise,
            int_mode: Mode::Precise,
        }
    }

    /// Smallest output; the default.
    pub const fn precise() -> Self {
        Self::new()
    }

    /// Fastest encoding at the cost of padding and wider integers.
    pub const fn lazy() -> Self {
        Self {
            bit_mode: Mode::Lazy,
            int_mode: Mode::Lazy,
        }
    }

    pub const fn with_bit_mode(mut self, mode: Mode) -> Self {
        self.bit_mode = mode;
        self
    }

    pub const fn with_int_mode(mut self, mode: Mode) -> Self {
        self.int_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_precise() {
        assert_eq!(Settings::default(), Settings::precise());
        assert_eq!(Mode::default(), Mode::Precise);
    }

    #[test]
    fn builder() {
        let settings = Settings::new().with_int_mode(Mode::Lazy);
        assert_eq!(settings.bit_mode, Mode::Precise);
        assert_eq!(settings.int_mode, Mode::Lazy);
        assert_eq!(
            Settings::precise()
                .with_bit_mode(Mode::Lazy)
                .with_int_mode(Mode::Lazy),
            Settings::lazy()
        );
    }
}
