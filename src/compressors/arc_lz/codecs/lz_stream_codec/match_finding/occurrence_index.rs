use super::super::super::super::WINDOW_SIZE;

/// Marks the end of a list. Window slots only go up to 0xFFF.
const NIL: u16 = u16::MAX;

/// For each byte value, a linked list of the window slots currently holding
/// it, oldest first.
///
/// The lists are threaded through `links`, which is indexed by slot, so the
/// whole index is three flat arrays of slot numbers.
#[derive(Debug, Clone)]
pub struct OccurrenceIndex {
    heads: [u16; 256],
    tails: [u16; 256],
    links: Vec<u16>,
}

impl OccurrenceIndex {
    pub fn new() -> Self {
        Self {
            heads: [NIL; 256],
            tails: [NIL; 256],
            links: vec![NIL; WINDOW_SIZE],
        }
    }

    /// Append `slot` to the end of the list for `value`.
    pub fn insert(&mut self, value: u8, slot: u16) {
        let old_tail = self.tails[value as usize];

        if old_tail == NIL {
            self.heads[value as usize] = slot;
        } else {
            self.links[old_tail as usize] = slot;
        }

        self.tails[value as usize] = slot;
        self.links[slot as usize] = NIL;
    }

    /// Drop the oldest occurrence of `value`, which must be `slot`.
    ///
    /// The window is overwritten oldest slot first, so the slot being
    /// overwritten is always at the head of its value's list.
    pub fn remove_oldest(&mut self, value: u8, slot: u16) {
        let head = self.heads[value as usize];

        debug_assert_eq!(head, slot, "value: {}", value);
        if head == NIL {
            return;
        }

        let next = self.links[head as usize];
        if next == NIL {
            self.tails[value as usize] = NIL;
        }

        self.heads[value as usize] = next;
    }

    pub fn occurrences(&self, value: u8) -> Occurrences<'_> {
        Occurrences {
            links: &self.links,
            next: self.heads[value as usize],
        }
    }
}

impl Default for OccurrenceIndex {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Occurrences<'a> {
    links: &'a [u16],
    next: u16,
}

impl<'a> Iterator for Occurrences<'a> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        if self.next == NIL {
            return None;
        }

        let slot = self.next;
        self.next = self.links[slot as usize];
        Some(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_keep_insertion_order() {
        let mut index = OccurrenceIndex::new();
        index.insert(b'a', 0);
        index.insert(b'b', 1);
        index.insert(b'a', 2);
        index.insert(b'a', 5);

        assert_eq!(index.occurrences(b'a').collect::<Vec<_>>(), vec![0, 2, 5]);
        assert_eq!(index.occurrences(b'b').collect::<Vec<_>>(), vec![1]);
        assert_eq!(index.occurrences(b'c').count(), 0);
    }

    #[test]
    fn test_remove_oldest() {
        let mut index = OccurrenceIndex::new();
        index.insert(7, 10);
        index.insert(7, 11);

        index.remove_oldest(7, 10);
        assert_eq!(index.occurrences(7).collect::<Vec<_>>(), vec![11]);

        index.remove_oldest(7, 11);
        assert_eq!(index.occurrences(7).count(), 0);

        // The list must be reusable once drained
        index.insert(7, 3);
        assert_eq!(index.occurrences(7).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_slot_reused_for_same_value() {
        let mut index = OccurrenceIndex::new();
        index.insert(1, 0);
        index.insert(1, 1);

        index.remove_oldest(1, 0);
        index.insert(1, 0);

        assert_eq!(index.occurrences(1).collect::<Vec<_>>(), vec![1, 0]);
    }
}
