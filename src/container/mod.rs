//! The `.arc` archive container.
//!
//! An archive is a 16 byte header, a table of contents with one 16 byte
//! record per file, the NUL terminated file names, and then the file data.
//! All integers are little endian. Each file is stored either raw or
//! compressed with [`crate::compressors::arc_lz`].

pub mod header;
pub mod reader;
pub mod walk;
pub mod writer;

pub use header::{ArcHeader, TocEntry, ARC_MAGIC};
pub use reader::{safe_relative_path, ArcEntry, ArcReader};
pub use walk::collect_files;
pub use writer::{ArcWriter, PackOptions};
