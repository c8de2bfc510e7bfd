//! Monotonic time sources for enemy cooldowns.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Millisecond clock sampled once per enemy phase. Samples never decrease.
pub trait Clock {
    fn now_ms(&mut self) -> u64;
}

/// Real elapsed time since the clock was created.
pub struct WallClock {
    origin: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn now_ms(&mut self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Logical clock that moves forward a fixed step every time it is sampled,
/// so each turn is worth `step_ms` of cooldown.
#[derive(Clone, Debug)]
pub struct TurnClock {
    now: u64,
    step_ms: u64,
}

impl TurnClock {
    pub fn new(step_ms: u64) -> Self {
        Self { now: 0, step_ms }
    }
}

impl Clock for TurnClock {
    fn now_ms(&mut self) -> u64 {
        self.now = self.now.saturating_add(self.step_ms);
        self.now
    }
}

/// Externally driven clock. Clones share the same time, so a test can keep
/// one handle and give the other to the game.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, now_ms: u64) {
        self.now.set(now_ms.max(self.now.get()));
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now.set(self.now.get().saturating_add(delta_ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&mut self) -> u64 {
        self.now.get()
    }
}
