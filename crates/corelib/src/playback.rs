//! Ping-pong keyframe playback.
//!
//! The index sweeps forward to the last frame, then backward to the first,
//! and so on, instead of wrapping around. When to tick is up to the caller.

use crate::error::{CoreError, CoreResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PingPong {
    len: usize,
    index: usize,
    reverse: bool,
}

impl PingPong {
    /// Playback over `len` frames starting at frame 0, moving forward.
    pub fn new(len: usize) -> CoreResult<Self> {
        if len == 0 {
            return Err(CoreError::EmptyPlayback);
        }
        Ok(Self {
            len,
            index: 0,
            reverse: false,
        })
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.reverse
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Companion to [`PingPong::len`]; construction rejects zero-length playback.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the frame to show for this tick, then advances.
    pub fn tick(&mut self) -> usize {
        let shown = self.index;
        self.advance();
        shown
    }

    fn advance(&mut self) {
        if self.len == 1 {
            return;
        }
        let last = self.len - 1;
        if self.reverse {
            if self.index == 0 {
                // Would go below 0: step forward instead and flip.
                self.index = 1;
                self.reverse = false;
            } else {
                self.index -= 1;
            }
        } else if self.index + 1 > last {
            // Would run past the end: step back instead and flip.
            self.index = last - 1;
            self.reverse = true;
        } else {
            self.index += 1;
        }
    }
}
