use super::super::super::WINDOW_MASK;
use super::match_finding::PendingMatch;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeState {
    /// The next output byte starts a new unit.
    #[default]
    Idle,

    /// A back-reference is being copied out of the window.
    Copying { pos: u16, remaining: usize },

    /// The end-of-stream marker was read.
    Finished,

    /// Reading failed part way through a unit.
    Failed,
}

impl DecodeState {
    /// The state after copying a byte from `pos - 1`, with `remaining` bytes
    /// of the back-reference left.
    pub fn copying(pos: u16, remaining: usize) -> Self {
        if remaining == 0 {
            DecodeState::Idle
        } else {
            DecodeState::Copying {
                pos: pos & WINDOW_MASK,
                remaining,
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, DecodeState::Finished)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum EncodeState {
    /// No match is open; the next byte starts a lookup.
    #[default]
    Idle,

    Accumulating(PendingMatch),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copying_ends_in_idle() {
        assert_eq!(DecodeState::copying(5, 0), DecodeState::Idle);
        assert_eq!(
            DecodeState::copying(0x1000, 2),
            DecodeState::Copying {
                pos: 0,
                remaining: 2
            }
        );
    }

    #[test]
    fn test_defaults() {
        assert_eq!(DecodeState::default(), DecodeState::Idle);
        assert_eq!(EncodeState::default(), EncodeState::Idle);
        assert!(!DecodeState::Idle.is_finished());
        assert!(DecodeState::Finished.is_finished());
    }
}
