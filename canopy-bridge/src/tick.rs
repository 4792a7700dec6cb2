//! Timestamps for frame ticks.
//!
//! The controller never reads the clock itself; a [`TickSource`] is injected
//! at construction. Hosts use [`InstantTickSource`], tests drive
//! [`ManualTickSource`] to get reproducible frame times.

use std::time::Instant;

/// Supplies the timestamp handed to the renderer on each tick.
pub trait TickSource {
    /// Seconds since an arbitrary fixed origin; never decreases.
    fn next_timestamp(&mut self) -> f64;

    /// Expected seconds until the next tick.
    fn predicted_interval(&self) -> f64;
}

/// Monotonic wall-clock tick source.
#[derive(Debug, Clone)]
pub struct InstantTickSource {
    origin: Instant,
    predicted_interval: f64,
}

impl InstantTickSource {
    /// Creates a source whose origin is now.
    ///
    /// `max_refresh_rate` is the display rate in Hz; a non-positive value
    /// falls back to 60 Hz.
    pub fn new(max_refresh_rate: f32) -> Self {
        let rate = if max_refresh_rate.is_finite() && max_refresh_rate > 0.0 {
            f64::from(max_refresh_rate)
        } else {
            60.0
        };
        Self {
            origin: Instant::now(),
            predicted_interval: 1.0 / rate,
        }
    }
}

impl TickSource for InstantTickSource {
    fn next_timestamp(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn predicted_interval(&self) -> f64 {
        self.predicted_interval
    }
}

/// Tick source that advances by a fixed step on every tick.
#[derive(Debug, Clone)]
pub struct ManualTickSource {
    now: f64,
    step: f64,
}

impl ManualTickSource {
    /// Starts at `start` seconds and advances by `step` seconds per tick.
    pub fn new(start: f64, step: f64) -> Self {
        Self { now: start, step }
    }

    /// Jumps to `time` for the next tick.
    pub fn set_time(&mut self, time: f64) {
        self.now = time;
    }

    /// Time the next tick will report.
    pub fn peek(&self) -> f64 {
        self.now
    }
}

impl Default for ManualTickSource {
    fn default() -> Self {
        Self::new(0.0, 1.0 / 60.0)
    }
}

impl TickSource for ManualTickSource {
    fn next_timestamp(&mut self) -> f64 {
        let now = self.now;
        self.now += self.step;
        now
    }

    fn predicted_interval(&self) -> f64 {
        self.step
    }
}
