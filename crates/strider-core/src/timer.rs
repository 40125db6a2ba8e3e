/// Countdown accumulated from per-tick deltas.
///
/// Replaces engine-side "wait N seconds" coroutines: the countdown is plain
/// state advanced by the caller's fixed step, so delays replay identically
/// for identical delta sequences.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Countdown {
    remaining: Option<f32>,
}

impl Countdown {
    /// A countdown that is not running.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Start (or restart) with `duration` seconds remaining.
    ///
    /// Negative durations are clamped to zero and fire on the next tick.
    pub fn start(&mut self, duration: f32) {
        self.remaining = Some(duration.max(0.0));
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_running(&self) -> bool {
        self.remaining.is_some()
    }

    /// Advance by `dt` seconds. Returns `true` exactly once, on the tick the
    /// countdown reaches zero; afterwards the countdown is idle.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };
        let left = remaining - dt.max(0.0);
        if left <= 0.0 {
            self.remaining = None;
            return true;
        }
        self.remaining = Some(left);
        false
    }
}
