use std::fs;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Component, Path, PathBuf};

use byteorder::ReadBytesExt;

use crate::compressors::arc_lz::decompress_with_capacity;
use crate::error::{ArcError, Result};

use super::header::{ArcHeader, TocEntry, HEADER_SIZE, TOC_ENTRY_SIZE};

/// A file stored in an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcEntry {
    pub name: String,
    pub toc: TocEntry,
}

impl ArcEntry {
    pub fn is_compressed(&self) -> bool {
        self.toc.is_compressed()
    }

    pub fn decompressed_size(&self) -> u64 {
        self.toc.decompressed_size as u64
    }

    pub fn stored_size(&self) -> u64 {
        self.toc.stored_size as u64
    }
}

/// Reads an archive's table of contents up front, and entry data on demand.
pub struct ArcReader<R: Read + Seek> {
    reader: R,
    header: ArcHeader,
    entries: Vec<ArcEntry>,
}

impl<R: Read + Seek> ArcReader<R> {
    pub fn open(mut reader: R) -> Result<Self> {
        let archive_len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        let header = ArcHeader::read(&mut reader)?;
        log::debug!(
            "archive header: {} files, unk1 {}, unk2 {}",
            header.file_count,
            header.unk1,
            header.unk2
        );

        if header.toc_end() > archive_len {
            return Err(ArcError::InvalidEntry {
                index: ((archive_len - HEADER_SIZE.min(archive_len)) / TOC_ENTRY_SIZE) as usize,
                reason: format!(
                    "table of contents for {} files runs past the end of the archive",
                    header.file_count
                ),
            });
        }

        let mut tocs = Vec::with_capacity(header.file_count as usize);
        for _ in 0..header.file_count {
            tocs.push(TocEntry::read(&mut reader)?);
        }

        let mut entries = Vec::with_capacity(tocs.len());
        for (index, toc) in tocs.into_iter().enumerate() {
            if toc.data_end() > archive_len {
                return Err(ArcError::InvalidEntry {
                    index,
                    reason: format!(
                        "data at {:#x}+{} runs past the end of the archive",
                        toc.data_offset, toc.stored_size
                    ),
                });
            }

            let name = read_name(&mut reader, index, toc.name_offset as u64, archive_len)?;
            log::debug!(
                "entry {}: {:?}, {} bytes stored, {} bytes decompressed",
                index,
                name,
                toc.stored_size,
                toc.decompressed_size
            );

            entries.push(ArcEntry { name, toc });
        }

        Ok(Self {
            reader,
            header,
            entries,
        })
    }

    pub fn header(&self) -> &ArcHeader {
        &self.header
    }

    pub fn entries(&self) -> &[ArcEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read an entry's data, decompressing it if needed. The result always
    /// has the entry's declared decompressed size.
    pub fn read_entry(&mut self, entry: &ArcEntry) -> Result<Vec<u8>> {
        self.reader.seek(SeekFrom::Start(entry.toc.data_offset as u64))?;

        let mut stored = Vec::with_capacity(entry.toc.stored_size as usize);
        (&mut self.reader)
            .take(entry.stored_size())
            .read_to_end(&mut stored)?;

        let data = if entry.is_compressed() {
            decompress_with_capacity(&stored, entry.toc.decompressed_size as usize)?
        } else {
            stored
        };

        if data.len() as u64 != entry.decompressed_size() {
            return Err(ArcError::SizeMismatch {
                name: entry.name.clone(),
                expected: entry.decompressed_size(),
                actual: data.len() as u64,
            });
        }

        Ok(data)
    }

    /// Write every entry below `dest`, creating directories as needed.
    /// Returns the paths written, in archive order.
    pub fn extract_to(&mut self, dest: &Path) -> Result<Vec<PathBuf>> {
        let entries = self.entries.clone();
        let mut written = Vec::with_capacity(entries.len());

        for entry in &entries {
            let path = dest.join(safe_relative_path(&entry.name)?);
            let data = self.read_entry(entry)?;

            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &data)?;

            log::info!(
                "extracted {} ({} bytes{})",
                entry.name,
                data.len(),
                if entry.is_compressed() { ", compressed" } else { "" }
            );
            written.push(path);
        }

        Ok(written)
    }
}

fn read_name(
    reader: &mut (impl Read + Seek),
    index: usize,
    offset: u64,
    archive_len: u64,
) -> Result<String> {
    if offset >= archive_len {
        return Err(ArcError::InvalidEntry {
            index,
            reason: format!("name offset {:#x} is past the end of the archive", offset),
        });
    }

    let resume = reader.stream_position()?;
    reader.seek(SeekFrom::Start(offset))?;

    let mut bytes = Vec::new();
    loop {
        match reader.read_u8() {
            Ok(0) => break,
            Ok(b) => bytes.push(b),
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                return Err(ArcError::InvalidEntry {
                    index,
                    reason: "name is not NUL terminated".to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        }
    }

    reader.seek(SeekFrom::Start(resume))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Turn an entry name into a relative path that stays inside the
/// extraction directory.
pub fn safe_relative_path(name: &str) -> Result<PathBuf> {
    let mut path = PathBuf::new();

    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ArcError::UnsafeEntryName(name.to_string()));
            }
        }
    }

    if path.as_os_str().is_empty() {
        return Err(ArcError::UnsafeEntryName(name.to_string()));
    }

    Ok(path)
}
