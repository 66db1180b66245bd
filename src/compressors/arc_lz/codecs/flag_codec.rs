//! # Flag bytes and packets
//!
//! Every unit in the stream is announced by one bit of a flag byte. The
//! bits are consumed least significant first; a set bit announces a literal,
//! a clear bit a back-reference. A flag byte followed by the payload of its
//! (up to) eight units forms a packet.
//!
//! The reading side keeps the flag byte in a 9 bit register whose top bit is
//! a marker. Once the marker has been shifted all the way down, the eight
//! decisions are used up and the next flag byte is due.

use std::io::{Read, Write};

use byteorder::WriteBytesExt;

use crate::error::{Result, StreamUnit};
use crate::utils::const_variable_arr::ConstVariableArr;

use super::super::{PACKET_PAYLOAD_MAX, UNITS_PER_PACKET};
use super::read_stream_byte;

const FLAGS_EMPTY: u16 = 1;
const FLAGS_PRIMED: u16 = 0x100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Literal,
    BackRef,
}

impl UnitKind {
    fn from_bit(bit: u16) -> Self {
        if bit == 1 {
            UnitKind::Literal
        } else {
            UnitKind::BackRef
        }
    }
}

#[derive(Debug, Clone)]
pub struct FlagReader {
    flags: u16,
}

impl FlagReader {
    pub fn new() -> Self {
        Self { flags: FLAGS_EMPTY }
    }

    /// Pull the next decision, reading a fresh flag byte from `input` when
    /// the current one is used up.
    pub fn next_unit(&mut self, input: &mut impl Read) -> Result<UnitKind> {
        if self.flags == FLAGS_EMPTY {
            let byte = read_stream_byte(input, StreamUnit::FlagByte)?;
            self.flags = FLAGS_PRIMED | byte as u16;
        }

        let bit = self.flags & 1;
        self.flags >>= 1;

        Ok(UnitKind::from_bit(bit))
    }
}

impl Default for FlagReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects units into packets and writes each packet once its eight flag
/// bits are used.
#[derive(Debug, Clone)]
pub struct PacketWriter {
    flags: u8,
    units: u32,
    payload: ConstVariableArr<u8, PACKET_PAYLOAD_MAX>,
    packets_written: u64,
}

impl PacketWriter {
    pub fn new() -> Self {
        Self {
            flags: 0,
            units: 0,
            payload: ConstVariableArr::new(0, 0),
            packets_written: 0,
        }
    }

    pub fn push_literal(&mut self, output: &mut impl Write, byte: u8) -> Result<()> {
        self.flags |= 1 << self.units;
        self.payload.push(byte);
        self.end_unit(output)
    }

    pub fn push_backref(&mut self, output: &mut impl Write, header: [u8; 2]) -> Result<()> {
        self.payload.extend_from_slice(&header);
        self.end_unit(output)
    }

    /// Write out the current packet even if not all of its units are used.
    /// The unused flag bits stay clear.
    pub fn flush(&mut self, output: &mut impl Write) -> Result<()> {
        if self.units == 0 {
            return Ok(());
        }

        log::trace!(
            "packet {}: flags {:#010b}, {} payload bytes",
            self.packets_written,
            self.flags,
            self.payload.len()
        );

        output.write_u8(self.flags)?;
        output.write_all(&self.payload)?;

        self.flags = 0;
        self.units = 0;
        self.payload.clear();
        self.packets_written += 1;

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.units == 0
    }

    pub fn packets_written(&self) -> u64 {
        self.packets_written
    }

    fn end_unit(&mut self, output: &mut impl Write) -> Result<()> {
        self.units += 1;

        if self.units == UNITS_PER_PACKET {
            self.flush(output)?;
        }

        Ok(())
    }
}

impl Default for PacketWriter {
    fn default() -> Self {
        Self::new()
    }
}
