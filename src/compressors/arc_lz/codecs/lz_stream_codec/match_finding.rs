#[cfg(test)]
pub mod brute_force;
pub mod occurrence_index;

use super::super::super::{MATCH_LEN_MAX, WINDOW_MASK};
use super::data_buffers::IndexedWindow;

/// A match being grown one input byte at a time.
///
/// Every cursor is a window slot where the bytes matched so far also start.
/// Cursors that stop matching are dropped; the match ends when the last one
/// does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMatch {
    cursors: Vec<u16>,
    len: usize,
}

impl PendingMatch {
    /// Start a match of length 1 from the slots holding its first byte.
    /// Returns `None` when there are none.
    pub fn start(cursors: Vec<u16>) -> Option<Self> {
        if cursors.is_empty() {
            None
        } else {
            Some(Self { cursors, len: 1 })
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_full(&self) -> bool {
        self.len == MATCH_LEN_MAX
    }

    #[cfg(test)]
    pub fn cursors(&self) -> &[u16] {
        &self.cursors
    }

    /// The slot the back-reference copies from. All surviving cursors match
    /// equally far, so the first one is as good as any.
    pub fn source(&self) -> u16 {
        self.cursors[0]
    }

    /// Try to grow the match by `byte`.
    ///
    /// Returns false without touching the match when no cursor continues
    /// with `byte`. The last cursor is never dropped, so `source` stays valid
    /// for flushing.
    pub fn extend(&mut self, window: &IndexedWindow, byte: u8) -> bool {
        debug_assert!(self.len < MATCH_LEN_MAX, "len: {}", self.len);

        let mut i = 0;
        while i < self.cursors.len() {
            let slot = self.cursors[i].wrapping_add(self.len as u16) & WINDOW_MASK;

            if window.get(slot) == byte {
                i += 1;
            } else if self.cursors.len() > 1 {
                // The cursor swapped into this index is checked next
                self.cursors.swap_remove(i);
            } else {
                return false;
            }
        }

        self.len += 1;
        true
    }
}
