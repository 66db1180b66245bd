//! A brute force candidate finder, which scans every slot of the window.
//!
//! This is only used by tests to check that the occurrence index returns
//! exactly the slots it should, in the same order.

use super::super::super::super::WINDOW_MASK;
use super::super::data_buffers::cyclic_buffer::CyclicBuffer;

/// All slots holding `byte`, oldest first, excluding the slot the next push
/// overwrites.
pub fn find_candidates(window: &CyclicBuffer, byte: u8) -> Vec<u16> {
    let mut candidates = Vec::new();

    for back in (1..=window.len()).rev() {
        let slot = window.pos().wrapping_sub(back as u16) & WINDOW_MASK;
        if slot != window.pos() && window.get(slot) == byte {
            candidates.push(slot);
        }
    }

    candidates
}
