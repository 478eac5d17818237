//! Clock module - millisecond time sources and a pausable stopwatch
//!
//! The session never schedules itself. It reads a [`Clock`] when it needs the
//! time, and derives elapsed play time from a [`Stopwatch`] that leaves out paused
//! intervals.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Monotonic millisecond clock
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Synthetic clock; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Elapsed-time accounting that excludes paused intervals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stopwatch {
    started_at: Option<u64>,
    paused_at: Option<u64>,
    stopped_at: Option<u64>,
    paused_total: u64,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from zero at `now`
    pub fn start(&mut self, now: u64) {
        *self = Self {
            started_at: Some(now),
            ..Self::default()
        };
    }

    pub fn pause(&mut self, now: u64) {
        if self.is_running() {
            self.paused_at = Some(now);
        }
    }

    /// Resume, pushing the baseline forward by the paused duration
    pub fn resume(&mut self, now: u64) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += now.saturating_sub(paused_at);
        }
    }

    /// Freeze elapsed time
    pub fn stop(&mut self, now: u64) {
        if self.started_at.is_some() && self.stopped_at.is_none() {
            self.stopped_at = Some(self.paused_at.unwrap_or(now));
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.paused_at.is_none() && self.stopped_at.is_none()
    }

    /// Milliseconds of unpaused time between start and `now` (or stop)
    pub fn elapsed(&self, now: u64) -> u64 {
        let Some(started_at) = self.started_at else {
            return 0;
        };
        let end = self.stopped_at.or(self.paused_at).unwrap_or(now);
        end.saturating_sub(started_at)
            .saturating_sub(self.paused_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(10);
        let other = clock.clone();
        clock.advance(5);
        assert_eq!(other.now_ms(), 15);
        other.set(100);
        assert_eq!(clock.now_ms(), 100);
    }

    #[test]
    fn unstarted_stopwatch_reads_zero() {
        let sw = Stopwatch::new();
        assert_eq!(sw.elapsed(5_000), 0);
        assert!(!sw.is_running());
    }

    #[test]
    fn pause_excludes_interval() {
        let mut sw = Stopwatch::new();
        sw.start(1_000);
        sw.pause(4_000);
        // Frozen while paused.
        assert_eq!(sw.elapsed(6_000), 3_000);
        sw.resume(9_000);
        assert_eq!(sw.elapsed(10_000), 4_000);
    }

    #[test]
    fn repeated_pauses_accumulate() {
        let mut sw = Stopwatch::new();
        sw.start(0);
        sw.pause(100);
        sw.resume(200);
        sw.pause(300);
        sw.resume(1_300);
        assert_eq!(sw.elapsed(1_500), 400);
    }

    #[test]
    fn stop_freezes_elapsed() {
        let mut sw = Stopwatch::new();
        sw.start(0);
        sw.stop(2_500);
        assert_eq!(sw.elapsed(9_999), 2_500);
        assert!(!sw.is_running());
    }

    #[test]
    fn restart_clears_pause_history() {
        let mut sw = Stopwatch::new();
        sw.start(0);
        sw.pause(10);
        sw.resume(510);
        sw.start(1_000);
        assert_eq!(sw.elapsed(1_200), 200);
    }
}
