//! The bit-packed LZ77 variant used for `.arc` file data.
//!
//! The stream is a sequence of packets. Each packet starts with a flag byte
//! whose bits (least significant first) say whether the matching unit is a
//! literal byte (`1`) or a two byte back-reference (`0`). A back-reference
//! with distance 0 marks the end of the stream; there is no length field.

pub mod codecs;

use std::io::Cursor;

use crate::error::Result;

use self::codecs::lz_stream_codec::{ArcLzDecoder, ArcLzEncoder};

pub const WINDOW_SIZE: usize = 0x1000;
pub const WINDOW_MASK: u16 = (WINDOW_SIZE - 1) as u16;

/// Shortest match worth a back-reference. A back-reference costs two bytes
/// plus a flag bit, so shorter matches go out as literals.
pub const MATCH_LEN_MIN: usize = 3;
pub const MATCH_LEN_MAX: usize = MATCH_LEN_MIN + 15;

pub const DISTANCE_MAX: u16 = WINDOW_MASK;

pub const UNITS_PER_PACKET: u32 = 8;
pub const PACKET_PAYLOAD_MAX: usize = UNITS_PER_PACKET as usize * 2;

/// Upper bound on decompressed bytes per compressed byte. A packet of eight
/// maximum length back-references is 17 bytes and expands to 144.
pub const MAX_EXPANSION: usize = 9;

/// Compress a whole buffer with a fresh encoder.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ArcLzEncoder::new(Vec::with_capacity(data.len() / 2 + 16));
    encoder.feed(data)?;
    encoder.finish()
}

/// Decompress a whole stream with a fresh decoder.
///
/// Bytes after the end-of-stream marker are ignored.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    ArcLzDecoder::new(Cursor::new(data)).decode_to_end()
}

/// Decompress a stream whose decompressed size is declared up front.
///
/// Decoding stops one byte past `decompressed_size`, so a stream that
/// decodes to more than declared is cut off early; the caller sees the
/// length differ either way. The declared size is only trusted as far as
/// the stream could actually expand.
pub fn decompress_with_capacity(data: &[u8], decompressed_size: usize) -> Result<Vec<u8>> {
    let mut decoder = ArcLzDecoder::new(Cursor::new(data));
    let capacity = decompressed_size.min(data.len().saturating_mul(MAX_EXPANSION));
    let mut output = Vec::with_capacity(capacity);
    decoder.decode_up_to(&mut output, decompressed_size.saturating_add(1))?;
    Ok(output)
}
