//! # arcpack
//!
//! Reading and writing `.arc` game archives, and the bit-packed LZ77 codec
//! their file data is stored with.
//!
//! The codec lives in [`compressors::arc_lz`]. It uses a 4096 byte sliding
//! window and packs literals and back-references behind flag bytes, eight
//! units per flag byte. The archive container in [`container`] is a thin
//! layer on top that stores each file either raw or compressed.
//!
//! ```rust
//! use arcpack::compressors::arc_lz::{compress, decompress};
//!
//! let data = b"the quick brown fox jumps over the quick brown dog";
//! let packed = compress(data)?;
//! assert_eq!(decompress(&packed)?, data);
//! # Ok::<(), arcpack::ArcError>(())
//! ```

pub mod compressors;
pub mod container;
pub mod error;
pub mod utils;

pub use error::{ArcError, Result, StreamUnit};
