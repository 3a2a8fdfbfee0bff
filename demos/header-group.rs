// Copyright 2017 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Packs a string member the way an object serializer would:
//! a null flag, a "same type as declared" flag and the length
//! share one header group, followed by the raw bytes.
//!
//! Lengths are 16-bit, which also bounds what a reader allocates.

use bitstream_varint::{BitRead, BitReader, BitWrite, BitWriter, Error, Settings};

type DemoResult<T> = Result<T, Box<dyn std::error::Error>>;

fn write_member<W: BitWrite>(writer: &mut W, member: Option<&str>) -> DemoResult<()> {
    match member {
        None => writer.write_bit_off()?,
        Some(text) => {
            writer.write_bit_on()?;
            writer.write_bit_on()?;
            writer.write_int(u16::try_from(text.len())?)?;
            writer.write_bytes(text.as_bytes())?;
        }
    }
    Ok(())
}

fn read_member<R: BitRead>(reader: &mut R) -> Result<Option<String>, Error> {
    if !reader.read_bit()? {
        return Ok(None);
    }
    let _declared_type = reader.read_bit()?;
    let len = reader.read_int::<u16>()?;
    let mut buf = vec![0; usize::from(len)];
    reader.read_bytes(&mut buf)?;
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

fn main() -> DemoResult<()> {
    let members = [
        Some("fLaC"),
        None,
        Some("a rather longer member value"),
        None,
    ];

    for settings in [Settings::precise(), Settings::lazy()] {
        let mut data = Vec::new();
        {
            let mut writer = BitWriter::with_settings(&mut data, settings);
            for member in members {
                write_member(&mut writer, member)?;
            }
            writer.flush()?;
        }
        println!("{settings:?}: {} bytes {:02X?}", data.len(), data);

        let mut reader = BitReader::with_settings(data.as_slice(), settings);
        for member in members {
            let decoded = read_member(&mut reader)?;
            assert_eq!(decoded.as_deref(), member);
        }
    }

    Ok(())
}
