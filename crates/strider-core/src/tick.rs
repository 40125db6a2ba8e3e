/// Per-step simulation context.
///
/// Time progression is supplied externally: identical `(tick, dt_seconds)`
/// sequences over identical worlds replay identically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
}

impl TickContext {
    /// Delta time clamped to be non-negative, for accumulation.
    pub fn dt(&self) -> f32 {
        self.dt_seconds.max(0.0)
    }
}
