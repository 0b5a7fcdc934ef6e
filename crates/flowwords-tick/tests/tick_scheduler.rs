//! Integration tests for the fixed-rate tick scheduler.
//!
//! Uses `tokio::time::pause()` (via `start_paused`) to control time
//! deterministically: `sleep_until` resolves as soon as the runtime is
//! idle and the clock auto-advances.

use std::time::Duration;

use flowwords_tick::{TickConfig, TickScheduler};
use tokio::time::Instant;

// =========================================================================
// TickConfig
// =========================================================================

#[test]
fn test_default_config_is_disabled() {
    let cfg = TickConfig::default();
    assert_eq!(cfg.tick_rate_hz, 0);
    assert_eq!(cfg.tick_duration(), None);
}

#[test]
fn test_with_rate_sets_duration() {
    let cfg = TickConfig::with_rate(2);
    assert_eq!(cfg.tick_duration(), Some(Duration::from_millis(500)));
}

#[test]
fn test_validated_clamps_rate_to_maximum() {
    let cfg = TickConfig::with_rate(1_000).validated();
    assert_eq!(cfg.tick_rate_hz, TickConfig::MAX_TICK_RATE_HZ);
}

#[test]
fn test_config_deserializes_with_defaults() {
    let cfg: TickConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg, TickConfig::default());

    let cfg: TickConfig = serde_json::from_str(r#"{ "tick_rate_hz": 4 }"#).unwrap();
    assert_eq!(cfg.tick_rate_hz, 4);
}

// =========================================================================
// Scheduler creation and accessors
// =========================================================================

#[test]
fn test_scheduler_initial_state() {
    let s = TickScheduler::with_rate(20);
    assert_eq!(s.tick_count(), 0);
    assert_eq!(s.tick_rate_hz(), 20);
    assert!(!s.is_disabled());
    assert_eq!(s.tick_duration(), Some(Duration::from_millis(50)));
}

#[test]
fn test_scheduler_disabled() {
    let s = TickScheduler::new(TickConfig::default());
    assert!(s.is_disabled());
    assert_eq!(s.tick_duration(), None);
}

// =========================================================================
// Tick firing
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_wait_for_tick_fires_after_one_interval() {
    let start = Instant::now();
    let mut s = TickScheduler::with_rate(2);

    let info = s.wait_for_tick().await;

    assert_eq!(info.tick, 1);
    assert_eq!(info.dt, Duration::from_millis(500));
    assert_eq!(info.ticks_skipped, 0);
    assert_eq!(start.elapsed().as_millis(), 500);
}

#[tokio::test(start_paused = true)]
async fn test_ticks_increment_monotonically_on_steady_cadence() {
    let start = Instant::now();
    let mut s = TickScheduler::with_rate(10);

    for expected in 1..=5 {
        let info = s.wait_for_tick().await;
        assert_eq!(info.tick, expected);
    }

    assert_eq!(s.tick_count(), 5);
    assert_eq!(start.elapsed().as_millis(), 500);
}

#[tokio::test(start_paused = true)]
async fn test_late_caller_skips_ahead_instead_of_bursting() {
    let mut s = TickScheduler::with_rate(10);

    // Caller is busy for 350ms before it first waits. The 100ms tick is
    // delivered late and the 200ms/300ms ticks are reported as skipped.
    tokio::time::advance(Duration::from_millis(350)).await;
    let info = s.wait_for_tick().await;
    assert_eq!(info.tick, 1);
    assert_eq!(info.ticks_skipped, 2);

    // Next tick is a full interval after the late one, not immediate.
    let before = Instant::now();
    let info = s.wait_for_tick().await;
    assert_eq!(info.tick, 2);
    assert_eq!(info.ticks_skipped, 0);
    assert_eq!(before.elapsed().as_millis(), 100);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_wait_does_not_consume_tick() {
    let mut s = TickScheduler::with_rate(10);

    let cut_short = tokio::time::timeout(Duration::from_millis(50), s.wait_for_tick()).await;
    assert!(cut_short.is_err());
    assert_eq!(s.tick_count(), 0);

    let info = s.wait_for_tick().await;
    assert_eq!(info.tick, 1);
}

// =========================================================================
// Disabled mode pends forever
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_disabled_never_fires() {
    let mut s = TickScheduler::new(TickConfig::default());

    let result = tokio::time::timeout(Duration::from_secs(5), s.wait_for_tick()).await;
    assert!(result.is_err(), "disabled scheduler should pend forever");
    assert_eq!(s.tick_count(), 0);
}
