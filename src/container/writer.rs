use std::fs;
use std::io::Write;
use std::path::Path;

use crate::compressors::arc_lz::compress;
use crate::error::{ArcError, Result};

use super::header::{ArcHeader, TocEntry, TOC_ENTRY_SIZE};
use super::walk::collect_files;

pub const MIN_COMPRESS_SIZE_DEFAULT: usize = 1000;

/// Controls which files get compressed when packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackOptions {
    pub compression: bool,

    /// Files of at most this many bytes are always stored raw.
    pub min_compress_size: usize,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            compression: true,
            min_compress_size: MIN_COMPRESS_SIZE_DEFAULT,
        }
    }
}

impl PackOptions {
    pub fn should_try_compression(&self, len: usize) -> bool {
        self.compression && len > self.min_compress_size
    }
}

#[derive(Debug, Clone)]
struct PendingEntry {
    name: String,
    decompressed_size: u32,
    stored: Vec<u8>,
}

/// Collects files in memory, then writes them out as one archive.
#[derive(Debug, Clone, Default)]
pub struct ArcWriter {
    options: PackOptions,
    entries: Vec<PendingEntry>,
}

impl ArcWriter {
    pub fn new(options: PackOptions) -> Self {
        Self {
            options,
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a file under `name`. Backslashes in the name become `/`.
    ///
    /// Returns whether the data was stored compressed. Compressed output is
    /// only kept when it is strictly smaller than the input, since an entry
    /// whose sizes are equal reads back as raw.
    pub fn add_file(&mut self, name: &str, data: &[u8]) -> Result<bool> {
        let name = name.replace('\\', "/");
        if name.contains('\0') {
            return Err(ArcError::InvalidEntry {
                index: self.entries.len(),
                reason: format!("name {:?} contains a NUL byte", name),
            });
        }

        let decompressed_size = u32::try_from(data.len()).map_err(|_| ArcError::TooLarge {
            what: "file size",
            value: data.len() as u64,
        })?;

        let mut stored = None;
        if self.options.should_try_compression(data.len()) {
            let packed = compress(data)?;
            if packed.len() < data.len() {
                stored = Some(packed);
            }
        }

        let compressed = stored.is_some();
        let stored = stored.unwrap_or_else(|| data.to_vec());

        log::debug!(
            "{} {}: {} -> {} bytes",
            if compressed { "compressed" } else { "stored" },
            name,
            data.len(),
            stored.len()
        );

        self.entries.push(PendingEntry {
            name,
            decompressed_size,
            stored,
        });

        Ok(compressed)
    }

    /// Add every file below `root`, named `<root>/<relative path>`.
    /// Returns the number of files added.
    pub fn add_directory(&mut self, root: &Path) -> Result<usize> {
        let files = collect_files(root)?;

        for (name, path) in &files {
            let data = fs::read(path)?;
            self.add_file(name, &data)?;
        }

        Ok(files.len())
    }

    /// Write the archive: header, table of contents, names, then data.
    /// Returns the number of bytes written.
    pub fn write_to(&self, mut output: impl Write) -> Result<u64> {
        let file_count = to_u32("file count", self.entries.len() as u64)?;
        let header = ArcHeader::new(file_count);

        let mut tocs = Vec::with_capacity(self.entries.len());
        let mut name_offset = header.toc_end();
        let mut data_offset =
            name_offset + self.entries.iter().map(|e| e.name.len() as u64 + 1).sum::<u64>();

        for entry in &self.entries {
            tocs.push(TocEntry {
                name_offset: to_u32("archive size", name_offset)?,
                data_offset: to_u32("archive size", data_offset)?,
                decompressed_size: entry.decompressed_size,
                stored_size: to_u32("file size", entry.stored.len() as u64)?,
            });

            name_offset += entry.name.len() as u64 + 1;
            data_offset += entry.stored.len() as u64;
        }
        to_u32("archive size", data_offset)?;

        header.write(&mut output)?;
        for toc in &tocs {
            toc.write(&mut output)?;
        }
        for entry in &self.entries {
            output.write_all(entry.name.as_bytes())?;
            output.write_all(&[0])?;
        }
        for entry in &self.entries {
            output.write_all(&entry.stored)?;
        }
        output.flush()?;

        log::debug!(
            "wrote archive: {} files, {} table bytes, {} bytes total",
            file_count,
            file_count as u64 * TOC_ENTRY_SIZE,
            data_offset
        );

        Ok(data_offset)
    }
}

fn to_u32(what: &'static str, value: u64) -> Result<u32> {
    u32::try_from(value).map_err(|_| ArcError::TooLarge { what, value })
}
