pub mod backref_codec;
pub mod flag_codec;
pub mod lz_stream_codec;

use std::io::{self, Read};

use byteorder::ReadBytesExt;

use crate::error::{ArcError, Result, StreamUnit};

/// Read one byte of a compressed stream, reporting running out of input as
/// truncation of `unit`.
pub(crate) fn read_stream_byte(input: &mut impl Read, unit: StreamUnit) -> Result<u8> {
    input.read_u8().map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => ArcError::TruncatedInput(unit),
        _ => ArcError::Io(e),
    })
}
