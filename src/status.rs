/// A timed boolean status: active while frames remain on the clock.
///
/// Re-starting an active countdown refreshes it to the new duration; effects
/// never stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn start(&mut self, frames: u32) {
        self.remaining = frames;
    }

    pub fn clear(&mut self) {
        self.remaining = 0;
    }

    /// Advance one frame. Returns true on the frame the effect runs out.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }
}
