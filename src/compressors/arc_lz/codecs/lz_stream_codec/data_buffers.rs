pub mod cyclic_buffer;

use self::cyclic_buffer::CyclicBuffer;
use super::match_finding::occurrence_index::OccurrenceIndex;

/// The encoder's view of the window: the ring itself plus the occurrence
/// index over it.
///
/// Both are only ever changed together through [`IndexedWindow::advance`],
/// so the index always lists exactly the slots that hold history.
#[derive(Debug, Clone, Default)]
pub struct IndexedWindow {
    window: CyclicBuffer,
    index: OccurrenceIndex,
}

impl IndexedWindow {
    pub fn new() -> Self {
        Self {
            window: CyclicBuffer::new(),
            index: OccurrenceIndex::new(),
        }
    }

    pub fn pos(&self) -> u16 {
        self.window.pos()
    }

    pub fn get(&self, slot: u16) -> u8 {
        self.window.get(slot)
    }

    pub fn get_relative(&self, backwards_offset: usize) -> u8 {
        self.window.get_relative(backwards_offset)
    }

    pub fn buffer(&self) -> &CyclicBuffer {
        &self.window
    }

    /// The slots a match starting with `byte` could copy from, oldest first.
    ///
    /// The write slot is left out even when it still holds `byte`: copying
    /// from it would need distance 0, which marks the end of the stream.
    pub fn candidates(&self, byte: u8) -> impl Iterator<Item = u16> + '_ {
        let pos = self.window.pos();
        self.index
            .occurrences(byte)
            .filter(move |&slot| slot != pos)
    }

    /// Push `byte` into the window, replacing the oldest byte in both the
    /// ring and the index.
    pub fn advance(&mut self, byte: u8) {
        let pos = self.window.pos();

        if let Some(old) = self.window.evicted() {
            self.index.remove_oldest(old, pos);
        }

        self.index.insert(byte, pos);
        self.window.push(byte);
    }
}

#[cfg(test)]
mod tests {
    use super::super::match_finding::brute_force;
    use super::*;

    use crate::compressors::arc_lz::WINDOW_SIZE;

    #[test]
    fn test_candidates_exclude_write_slot() {
        let mut window = IndexedWindow::new();
        for _ in 0..WINDOW_SIZE {
            window.advance(9);
        }

        // Every slot holds 9, including the one about to be overwritten
        assert_eq!(window.pos(), 0);
        let candidates: Vec<u16> = window.candidates(9).collect();
        assert_eq!(candidates.len(), WINDOW_SIZE - 1);
        assert!(!candidates.contains(&0));
        assert_eq!(candidates[0], 1);
    }

    #[test]
    fn test_unwritten_slots_are_not_candidates() {
        let mut window = IndexedWindow::new();
        window.advance(1);
        window.advance(2);

        assert_eq!(window.candidates(0).count(), 0);
        assert_eq!(window.candidates(2).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_index_matches_brute_force_across_wraps() {
        let mut window = IndexedWindow::new();

        // A cheap deterministic sequence with a small alphabet, so lists get long
        let mut state = 0x2545_F491u32;
        for i in 0..(WINDOW_SIZE * 3 + 123) {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            window.advance((state % 7) as u8);

            if i % 509 == 0 || i > WINDOW_SIZE * 3 {
                for value in 0..8u8 {
                    let indexed: Vec<u16> = window.candidates(value).collect();
                    let scanned = brute_force::find_candidates(window.buffer(), value);
                    assert_eq!(indexed, scanned, "value {} after {} bytes", value, i + 1);
                }
            }
        }
    }
}
