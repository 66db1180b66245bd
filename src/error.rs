//! Error types for arcpack

use std::fmt;
use std::io;
use thiserror::Error;

/// The part of a compressed stream that was being read when input ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamUnit {
    FlagByte,
    Literal,
    BackRefHeader,
}

impl fmt::Display for StreamUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamUnit::FlagByte => write!(f, "flag byte"),
            StreamUnit::Literal => write!(f, "literal"),
            StreamUnit::BackRefHeader => write!(f, "back-reference header"),
        }
    }
}

/// Main error type for arcpack operations
#[derive(Debug, Error)]
pub enum ArcError {
    /// The compressed stream ended before its end-of-stream marker
    #[error("Compressed stream truncated inside a {0}")]
    TruncatedInput(StreamUnit),

    /// A back-reference longer than the format can express was requested
    #[error("Match length {0} exceeds the maximum of 18")]
    MatchLengthOverflow(usize),

    /// A genuine back-reference would have used the reserved distance 0 or
    /// left the window
    #[error("Invalid back-reference distance {0}")]
    InvalidSentinelPlacement(u16),

    /// An earlier error left the encoder or decoder mid-unit; it cannot go on
    #[error("Codec stream is unusable after an earlier error")]
    StreamFailed,

    /// IO error from the underlying source or sink
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The archive does not start with the expected magic bytes
    #[error("Invalid archive magic: {0:02X?}")]
    InvalidMagic([u8; 4]),

    /// A table of contents entry is inconsistent with the archive
    #[error("Invalid archive entry {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },

    /// An entry name would escape the extraction directory
    #[error("Unsafe entry name: {0:?}")]
    UnsafeEntryName(String),

    /// A decompressed entry does not match its declared size. Decoding stops
    /// one byte past `expected`, so a larger `actual` is a lower bound
    #[error("Entry {name:?} decoded to {actual} bytes, expected {expected}")]
    SizeMismatch {
        name: String,
        expected: u64,
        actual: u64,
    },

    /// A value does not fit in the archive's 32-bit fields
    #[error("{what} too large for the archive format: {value}")]
    TooLarge { what: &'static str, value: u64 },
}

/// Result type alias for arcpack operations
pub type Result<T> = std::result::Result<T, ArcError>;

impl From<ArcError> for io::Error {
    fn from(err: ArcError) -> Self {
        match err {
            ArcError::Io(e) => e,
            ArcError::TruncatedInput(_) => io::Error::new(io::ErrorKind::UnexpectedEof, err),
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}
