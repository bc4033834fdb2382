//! Mission clock trait

/// Monotonic clock started at boot
///
/// All mission waits are expressed as deadlines on this clock, so a test
/// can substitute a virtual clock that jumps straight to each deadline.
#[allow(async_fn_in_trait)]
pub trait MissionClock {
    /// Milliseconds since mission start
    fn now_ms(&self) -> u32;

    /// Suspend until `deadline_ms` (returns immediately if already past)
    async fn wait_until(&mut self, deadline_ms: u32);

    /// Suspend for `duration_ms` from now
    async fn wait_ms(&mut self, duration_ms: u32) {
        let deadline = self.now_ms().saturating_add(duration_ms);
        self.wait_until(deadline).await;
    }
}
