pub mod data_buffers;
pub mod match_finding;
mod state;

use std::io::{self, Read, Write};

use crate::error::{ArcError, Result, StreamUnit};

use self::{
    data_buffers::{cyclic_buffer::CyclicBuffer, IndexedWindow},
    match_finding::PendingMatch,
    state::{DecodeState, EncodeState},
};

use super::{
    backref_codec::{decode_header, BackRef, BackRefHeader, END_OF_STREAM},
    flag_codec::{FlagReader, PacketWriter, UnitKind},
    read_stream_byte,
};

use super::super::{MATCH_LEN_MIN, WINDOW_MASK};

/// Pull decoder. Produces the uncompressed stream one byte at a time,
/// reading from `input` only as far as it needs to.
pub struct ArcLzDecoder<R: Read> {
    input: R,
    window: CyclicBuffer,
    flags: FlagReader,
    state: DecodeState,

    /// An error held back by `read` so the bytes decoded before it could be
    /// returned first.
    deferred: Option<ArcError>,
}

impl<R: Read> ArcLzDecoder<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            window: CyclicBuffer::new(),
            flags: FlagReader::new(),
            state: DecodeState::Idle,
            deferred: None,
        }
    }

    /// Whether the end-of-stream marker has been reached.
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Number of bytes produced so far.
    pub fn position(&self) -> u64 {
        self.window.written()
    }

    /// The next decompressed byte, or `None` once the end-of-stream marker
    /// has been read. Input that runs out before the marker is an error.
    ///
    /// Any error leaves the decoder failed: the unit it was reading is lost,
    /// so every later call returns [`ArcError::StreamFailed`].
    pub fn next_byte(&mut self) -> Result<Option<u8>> {
        if self.state == DecodeState::Failed {
            return Err(ArcError::StreamFailed);
        }

        let result = self.decode_byte();
        if result.is_err() {
            self.state = DecodeState::Failed;
        }
        result
    }

    fn decode_byte(&mut self) -> Result<Option<u8>> {
        let byte = match self.state {
            DecodeState::Finished => return Ok(None),
            DecodeState::Failed => return Err(ArcError::StreamFailed),
            DecodeState::Copying { pos, remaining } => {
                let byte = self.window.get(pos);
                self.state = DecodeState::copying(pos + 1, remaining - 1);
                byte
            }
            DecodeState::Idle => match self.flags.next_unit(&mut self.input)? {
                UnitKind::Literal => read_stream_byte(&mut self.input, StreamUnit::Literal)?,
                UnitKind::BackRef => match self.start_backref()? {
                    Some(byte) => byte,
                    None => {
                        self.state = DecodeState::Finished;
                        return Ok(None);
                    }
                },
            },
        };

        self.window.push(byte);
        Ok(Some(byte))
    }

    /// Read a back-reference header and return the first byte it copies,
    /// or `None` for the end-of-stream marker.
    fn start_backref(&mut self) -> Result<Option<u8>> {
        let hi = read_stream_byte(&mut self.input, StreamUnit::BackRefHeader)?;
        let lo = read_stream_byte(&mut self.input, StreamUnit::BackRefHeader)?;

        match decode_header(hi, lo) {
            BackRefHeader::EndOfStream => Ok(None),
            BackRefHeader::Match(backref) => {
                let start = self.window.pos().wrapping_sub(backref.distance()) & WINDOW_MASK;
                let byte = self.window.get(start);
                self.state = DecodeState::copying(start + 1, backref.match_len() - 1);
                Ok(Some(byte))
            }
        }
    }

    /// Append the rest of the stream to `output`, returning how many bytes
    /// were added.
    pub fn decode_into(&mut self, output: &mut Vec<u8>) -> Result<usize> {
        let start = output.len();
        while let Some(byte) = self.next_byte()? {
            output.push(byte);
        }
        Ok(output.len() - start)
    }

    /// Like [`ArcLzDecoder::decode_into`], but stops once `limit` bytes
    /// have been added.
    pub fn decode_up_to(&mut self, output: &mut Vec<u8>, limit: usize) -> Result<usize> {
        let start = output.len();
        while output.len() - start < limit {
            match self.next_byte()? {
                Some(byte) => output.push(byte),
                None => break,
            }
        }
        Ok(output.len() - start)
    }

    pub fn decode_to_end(&mut self) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.decode_into(&mut output)?;
        Ok(output)
    }

    /// Discard up to `n` bytes, returning how many were skipped before the
    /// end of the stream.
    pub fn skip(&mut self, n: u64) -> Result<u64> {
        let mut skipped = 0;
        while skipped < n {
            if self.next_byte()?.is_none() {
                break;
            }
            skipped += 1;
        }
        Ok(skipped)
    }
}

impl<R: Read> Read for ArcLzDecoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(e) = self.deferred.take() {
            return Err(e.into());
        }

        let mut read = 0;
        while read < buf.len() {
            match self.next_byte() {
                Ok(Some(byte)) => {
                    buf[read] = byte;
                    read += 1;
                }
                Ok(None) => break,
                Err(e) if read > 0 => {
                    self.deferred = Some(e);
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(read)
    }
}

/// Push encoder. Bytes are fed in order; [`ArcLzEncoder::finish`] closes the
/// stream and hands back the sink.
pub struct ArcLzEncoder<W: Write> {
    output: W,
    window: IndexedWindow,
    packet: PacketWriter,
    state: EncodeState,
    backrefs: u64,
    failed: bool,

    /// An error held back by `write` so the bytes taken before it could be
    /// reported first.
    deferred: Option<ArcError>,
}

impl<W: Write> ArcLzEncoder<W> {
    pub fn new(output: W) -> Self {
        Self {
            output,
            window: IndexedWindow::new(),
            packet: PacketWriter::new(),
            state: EncodeState::Idle,
            backrefs: 0,
            failed: false,
            deferred: None,
        }
    }

    /// Number of bytes fed so far.
    pub fn position(&self) -> u64 {
        self.window.buffer().written()
    }

    pub fn feed(&mut self, data: &[u8]) -> Result<()> {
        for &byte in data {
            self.feed_byte(byte)?;
        }
        Ok(())
    }

    /// Feed one byte.
    ///
    /// A sink error can strike in the middle of a packet, so after any error
    /// the encoder is failed and every later call returns
    /// [`ArcError::StreamFailed`].
    pub fn feed_byte(&mut self, byte: u8) -> Result<()> {
        if self.failed {
            return Err(ArcError::StreamFailed);
        }

        let result = self.encode_byte(byte);
        if result.is_err() {
            self.failed = true;
        }
        result
    }

    fn encode_byte(&mut self, byte: u8) -> Result<()> {
        match std::mem::take(&mut self.state) {
            EncodeState::Idle => self.start_match(byte)?,
            EncodeState::Accumulating(mut pending) => {
                if pending.extend(&self.window, byte) {
                    self.state = EncodeState::Accumulating(pending);
                } else {
                    self.emit_match(&pending)?;
                    self.start_match(byte)?;
                }
            }
        }

        self.window.advance(byte);

        if matches!(&self.state, EncodeState::Accumulating(pending) if pending.is_full()) {
            if let EncodeState::Accumulating(pending) = std::mem::take(&mut self.state) {
                self.emit_match(&pending)?;
            }
        }

        Ok(())
    }

    /// Flush the open match, write the end-of-stream marker and the last
    /// packet, and return the sink.
    pub fn finish(mut self) -> Result<W> {
        if self.failed {
            return Err(ArcError::StreamFailed);
        }

        if let EncodeState::Accumulating(pending) = std::mem::take(&mut self.state) {
            self.emit_match(&pending)?;
        }

        self.packet.push_backref(&mut self.output, END_OF_STREAM)?;
        self.packet.flush(&mut self.output)?;
        self.output.flush()?;

        log::debug!(
            "encoded {} bytes in {} packets, {} back-references",
            self.position(),
            self.packet.packets_written(),
            self.backrefs
        );

        Ok(self.output)
    }

    /// Look `byte` up in the window. With no earlier occurrence it goes out
    /// as a literal, otherwise a match starts.
    fn start_match(&mut self, byte: u8) -> Result<()> {
        let cursors: Vec<u16> = self.window.candidates(byte).collect();

        match PendingMatch::start(cursors) {
            Some(pending) => self.state = EncodeState::Accumulating(pending),
            None => self.packet.push_literal(&mut self.output, byte)?,
        }

        Ok(())
    }

    /// Write a finished match. The matched bytes are the last `len` bytes of
    /// the window at this point.
    fn emit_match(&mut self, pending: &PendingMatch) -> Result<()> {
        let len = pending.len();

        if len < MATCH_LEN_MIN {
            for back in (1..=len).rev() {
                let byte = self.window.get_relative(back);
                self.packet.push_literal(&mut self.output, byte)?;
            }
            return Ok(());
        }

        let start = self.window.pos().wrapping_sub(len as u16) & WINDOW_MASK;
        let distance = start.wrapping_sub(pending.source()) & WINDOW_MASK;

        let backref = BackRef::new(distance, len)?;
        self.packet.push_backref(&mut self.output, backref.to_bytes())?;
        self.backrefs += 1;

        Ok(())
    }
}

impl<W: Write> Write for ArcLzEncoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(e) = self.deferred.take() {
            return Err(e.into());
        }

        for (taken, &byte) in buf.iter().enumerate() {
            if let Err(e) = self.feed_byte(byte) {
                if taken == 0 {
                    return Err(e.into());
                }
                self.deferred = Some(e);
                return Ok(taken);
            }
        }

        Ok(buf.len())
    }

    /// Packets can only be written whole, so this is a no-op until `finish`.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
