//! Fixed-rate tick scheduler for FlowWords.
//!
//! While a login transaction is outstanding the client re-renders a small
//! "still working" animation. The animation must run on its own steady
//! schedule so that it never gates (or is gated by) the real completion
//! check. [`TickScheduler`] provides that schedule.
//!
//! # Disabled mode
//!
//! When `tick_rate_hz` is 0, [`TickScheduler::wait_for_tick`] pends
//! forever. Hosts that don't want an animation (headless runs, tests)
//! simply configure a rate of 0.
//!
//! # Integration
//!
//! The scheduler is designed to sit next to the awaited work in a
//! `tokio::select!` loop:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         outcome = &mut pending => break outcome,
//!         _ = ticker.wait_for_tick() => status.set(progress.advance()),
//!     }
//! }
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::{self, Instant};
use tracing::{debug, trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the tick scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Tick rate in Hz. 0 = disabled (tick never fires).
    pub tick_rate_hz: u32,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self { tick_rate_hz: 0 }
    }
}

impl TickConfig {
    /// Maximum supported tick rate.
    pub const MAX_TICK_RATE_HZ: u32 = 128;

    /// Create a config for a specific tick rate.
    pub fn with_rate(tick_rate_hz: u32) -> Self {
        Self { tick_rate_hz }
    }

    /// Clamp out-of-range values so the config is safe to use.
    ///
    /// Called automatically by [`TickScheduler::new`].
    pub fn validated(mut self) -> Self {
        if self.tick_rate_hz > Self::MAX_TICK_RATE_HZ {
            warn!(
                rate = self.tick_rate_hz,
                max = Self::MAX_TICK_RATE_HZ,
                "tick_rate_hz exceeds maximum, clamping"
            );
            self.tick_rate_hz = Self::MAX_TICK_RATE_HZ;
        }
        self
    }

    /// Duration of a single tick. Returns `None` when disabled.
    pub fn tick_duration(&self) -> Option<Duration> {
        if self.tick_rate_hz == 0 {
            None
        } else {
            Some(Duration::from_secs_f64(1.0 / self.tick_rate_hz as f64))
        }
    }
}

// ---------------------------------------------------------------------------
// Tick info
// ---------------------------------------------------------------------------

/// Information about a fired tick, returned by [`TickScheduler::wait_for_tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickInfo {
    /// Monotonically increasing tick number (starts at 1).
    pub tick: u64,
    /// Fixed interval between ticks.
    pub dt: Duration,
    /// Whole ticks that elapsed while the caller was busy and were not
    /// delivered. 0 in normal operation.
    pub ticks_skipped: u64,
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Fixed-rate tick scheduler.
///
/// Late ticks are never replayed in a burst: if the caller falls behind,
/// the next tick is scheduled one interval from *now* and the missed ones
/// are reported in [`TickInfo::ticks_skipped`]. An animation driven by
/// the scheduler therefore advances exactly one frame per delivered tick.
#[derive(Debug)]
pub struct TickScheduler {
    config: TickConfig,
    tick_duration: Option<Duration>,
    tick_count: u64,
    next_tick: Option<Instant>,
}

impl TickScheduler {
    /// Create a new scheduler. The first tick fires one interval from now.
    pub fn new(config: TickConfig) -> Self {
        let config = config.validated();
        let tick_duration = config.tick_duration();
        let next_tick = tick_duration.map(|d| Instant::now() + d);

        match tick_duration {
            Some(d) => debug!(
                rate_hz = config.tick_rate_hz,
                interval_ms = d.as_secs_f64() * 1000.0,
                "tick scheduler created"
            ),
            None => debug!("tick scheduler created in disabled mode"),
        }

        Self {
            config,
            tick_duration,
            tick_count: 0,
            next_tick,
        }
    }

    /// Create a scheduler for a specific tick rate.
    pub fn with_rate(tick_rate_hz: u32) -> Self {
        Self::new(TickConfig::with_rate(tick_rate_hz))
    }

    /// Wait until the next tick is due.
    ///
    /// In disabled mode this future never resolves, but `tokio::select!`
    /// still processes its other branches. Cancel-safe: dropping the future
    /// before it fires leaves the schedule untouched.
    pub async fn wait_for_tick(&mut self) -> TickInfo {
        let (next, tick_dur) = match (self.next_tick, self.tick_duration) {
            (Some(next), Some(dur)) => (next, dur),
            _ => std::future::pending().await,
        };

        time::sleep_until(next).await;

        let now = Instant::now();
        self.tick_count += 1;

        let late_by = now.saturating_duration_since(next);
        let ticks_skipped = (late_by.as_nanos() / tick_dur.as_nanos()) as u64;
        if ticks_skipped > 0 {
            warn!(
                tick = self.tick_count,
                skipped = ticks_skipped,
                late_ms = late_by.as_secs_f64() * 1000.0,
                "tick fired late, skipping ahead"
            );
            self.next_tick = Some(now + tick_dur);
        } else {
            self.next_tick = Some(next + tick_dur);
        }

        trace!(tick = self.tick_count, "tick fired");

        TickInfo {
            tick: self.tick_count,
            dt: tick_dur,
            ticks_skipped,
        }
    }

    /// Whether this scheduler is disabled (tick rate = 0).
    pub fn is_disabled(&self) -> bool {
        self.tick_duration.is_none()
    }

    /// Ticks delivered so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// The configured tick rate in Hz.
    pub fn tick_rate_hz(&self) -> u32 {
        self.config.tick_rate_hz
    }

    /// The fixed tick interval, or `None` when disabled.
    pub fn tick_duration(&self) -> Option<Duration> {
        self.tick_duration
    }
}
