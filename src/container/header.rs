use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{ArcError, Result};

pub const ARC_MAGIC: [u8; 4] = [0x20, 0x11, 0x75, 0x19];

pub const HEADER_SIZE: u64 = 16;
pub const TOC_ENTRY_SIZE: u64 = 16;

/// Values of the two header fields with unknown meaning, as found in
/// existing archives.
pub const UNK1_DEFAULT: u32 = 1;
pub const UNK2_DEFAULT: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcHeader {
    pub unk1: u32,
    pub file_count: u32,
    pub unk2: u32,
}

impl ArcHeader {
    pub fn new(file_count: u32) -> Self {
        Self {
            unk1: UNK1_DEFAULT,
            file_count,
            unk2: UNK2_DEFAULT,
        }
    }

    pub fn read(mut reader: impl Read) -> Result<Self> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if magic != ARC_MAGIC {
            return Err(ArcError::InvalidMagic(magic));
        }

        let unk1 = reader.read_u32::<LittleEndian>()?;
        let file_count = reader.read_u32::<LittleEndian>()?;
        let unk2 = reader.read_u32::<LittleEndian>()?;

        Ok(Self {
            unk1,
            file_count,
            unk2,
        })
    }

    pub fn write(&self, mut writer: impl Write) -> Result<()> {
        writer.write_all(&ARC_MAGIC)?;
        writer.write_u32::<LittleEndian>(self.unk1)?;
        writer.write_u32::<LittleEndian>(self.file_count)?;
        writer.write_u32::<LittleEndian>(self.unk2)?;
        Ok(())
    }

    /// Offset of the first byte after the table of contents.
    pub fn toc_end(&self) -> u64 {
        HEADER_SIZE + self.file_count as u64 * TOC_ENTRY_SIZE
    }
}

/// One table of contents record. Offsets are absolute within the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TocEntry {
    pub name_offset: u32,
    pub data_offset: u32,
    pub decompressed_size: u32,
    pub stored_size: u32,
}

impl TocEntry {
    pub fn read(mut reader: impl Read) -> Result<Self> {
        Ok(Self {
            name_offset: reader.read_u32::<LittleEndian>()?,
            data_offset: reader.read_u32::<LittleEndian>()?,
            decompressed_size: reader.read_u32::<LittleEndian>()?,
            stored_size: reader.read_u32::<LittleEndian>()?,
        })
    }

    pub fn write(&self, mut writer: impl Write) -> Result<()> {
        writer.write_u32::<LittleEndian>(self.name_offset)?;
        writer.write_u32::<LittleEndian>(self.data_offset)?;
        writer.write_u32::<LittleEndian>(self.decompressed_size)?;
        writer.write_u32::<LittleEndian>(self.stored_size)?;
        Ok(())
    }

    /// The format has no compression flag; an entry is compressed exactly
    /// when its stored size differs from its decompressed size.
    pub fn is_compressed(&self) -> bool {
        self.stored_size != self.decompressed_size
    }

    pub fn data_end(&self) -> u64 {
        self.data_offset as u64 + self.stored_size as u64
    }
}
