//! Two byte back-reference headers.
//!
//! ```text
//!   hi                lo
//! [dddd dddd]     [dddd llll]
//! ```
//!
//! The twelve `d` bits are the distance back from the current window
//! position, the four `l` bits are the match length minus three.

use crate::error::{ArcError, Result};

use super::super::{DISTANCE_MAX, MATCH_LEN_MAX, MATCH_LEN_MIN};

/// The header of the end-of-stream back-reference.
pub const END_OF_STREAM: [u8; 2] = [0, 0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackRef {
    distance: u16,
    len: u8,
}

impl BackRef {
    /// Validates a genuine match. Distance 0 is reserved for the end of
    /// stream, so it is rejected along with anything outside the window.
    pub fn new(distance: u16, len: usize) -> Result<Self> {
        if distance == 0 || distance > DISTANCE_MAX {
            return Err(ArcError::InvalidSentinelPlacement(distance));
        }

        if len > MATCH_LEN_MAX {
            return Err(ArcError::MatchLengthOverflow(len));
        }

        debug_assert!(len >= MATCH_LEN_MIN, "len: {}", len);

        Ok(Self {
            distance,
            len: len as u8,
        })
    }

    pub fn distance(&self) -> u16 {
        self.distance
    }

    pub fn match_len(&self) -> usize {
        self.len as usize
    }

    pub fn to_bytes(self) -> [u8; 2] {
        let hi = (self.distance >> 4) as u8;
        let lo = ((self.distance & 0xF) as u8) << 4 | (self.len - MATCH_LEN_MIN as u8);
        [hi, lo]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackRefHeader {
    EndOfStream,
    Match(BackRef),
}

pub fn decode_header(hi: u8, lo: u8) -> BackRefHeader {
    let distance = (hi as u16) << 4 | (lo >> 4) as u16;

    if distance == 0 {
        BackRefHeader::EndOfStream
    } else {
        BackRefHeader::Match(BackRef {
            distance,
            len: (lo & 0xF) + MATCH_LEN_MIN as u8,
        })
    }
}
