use super::super::super::super::{WINDOW_MASK, WINDOW_SIZE};

/// The sliding window: the last 4096 bytes of the uncompressed stream, kept
/// in a ring that the writer overwrites in place.
///
/// Slots are addressed with 12 bit positions. Slots that were never written
/// read as zero, the same as on the other side of the stream.
#[derive(Clone)]
pub struct CyclicBuffer {
    buf: Vec<u8>,

    /// The slot the next byte is written to.
    pos: u16,

    /// Total number of bytes ever pushed.
    written: u64,
}

impl CyclicBuffer {
    pub fn new() -> Self {
        Self {
            buf: vec![0; WINDOW_SIZE],
            pos: 0,
            written: 0,
        }
    }

    pub fn pos(&self) -> u16 {
        self.pos
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    /// The number of slots holding real history.
    pub fn len(&self) -> usize {
        self.written.min(WINDOW_SIZE as u64) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    pub fn get(&self, slot: u16) -> u8 {
        self.buf[(slot & WINDOW_MASK) as usize]
    }

    /// Get a byte counting back from the write position, 1 being the last
    /// byte pushed.
    pub fn get_relative(&self, backwards_offset: usize) -> u8 {
        if backwards_offset == 0 || backwards_offset > WINDOW_SIZE {
            panic!(
                "backwards_offset: {}, window size: {}",
                backwards_offset, WINDOW_SIZE
            );
        }

        self.get(self.pos.wrapping_sub(backwards_offset as u16))
    }

    /// The byte the next push overwrites, if that slot holds history.
    pub fn evicted(&self) -> Option<u8> {
        if self.written >= WINDOW_SIZE as u64 {
            Some(self.get(self.pos))
        } else {
            None
        }
    }

    pub fn push(&mut self, val: u8) {
        self.buf[self.pos as usize] = val;
        self.pos = (self.pos + 1) & WINDOW_MASK;
        self.written += 1;
    }
}

impl Default for CyclicBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CyclicBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CyclicBuffer")
            .field("pos", &self.pos)
            .field("written", &self.written)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_get_relative() {
        let mut buf = CyclicBuffer::new();
        assert!(buf.is_empty());

        for i in 0..10u8 {
            buf.push(i);
        }

        assert_eq!(buf.pos(), 10);
        assert_eq!(buf.len(), 10);
        assert_eq!(buf.get_relative(1), 9);
        assert_eq!(buf.get_relative(10), 0);

        // Never written, reads as zero
        assert_eq!(buf.get(100), 0);
    }

    #[test]
    fn test_wraps_after_window_size() {
        let mut buf = CyclicBuffer::new();

        for i in 0..WINDOW_SIZE {
            assert_eq!(buf.evicted(), None);
            buf.push((i % 251) as u8);
        }

        assert_eq!(buf.pos(), 0);
        assert_eq!(buf.len(), WINDOW_SIZE);
        assert_eq!(buf.evicted(), Some(0));

        buf.push(0xAA);
        assert_eq!(buf.pos(), 1);
        assert_eq!(buf.get(0), 0xAA);
        assert_eq!(buf.get_relative(1), 0xAA);
        assert_eq!(buf.get_relative(WINDOW_SIZE), 1);
        assert_eq!(buf.evicted(), Some(1));
    }

    #[test]
    fn test_slot_addressing_masks() {
        let mut buf = CyclicBuffer::new();
        buf.push(42);

        assert_eq!(buf.get(0x1000), 42);
        assert_eq!(buf.get(0xF000), 42);
    }

    #[test]
    #[should_panic]
    fn test_get_relative_zero() {
        let mut buf = CyclicBuffer::new();
        buf.push(1);
        buf.get_relative(0);
    }
}
