//! Clocks and the fixed cadence tick loop
//!
//! The loop is cooperative: each iteration runs one whole tick, then
//! sleeps the nominal interval. dt is the plain `now - last_update` delta;
//! no jitter compensation beyond the cap.

use std::cell::Cell;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Monotonic time source
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin
    fn now_ms(&self) -> u64;
    /// Block (or pretend to) for `duration`
    fn sleep(&self, duration: Duration);
}

/// Wall clock backed by `Instant`
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

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Deterministic clock that only moves when slept or advanced
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: Cell<u64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.now_ms.set(self.now_ms.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration.as_millis() as u64);
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// Shared flag that stops a [`FixedTicker`] before its next tick
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Runs a callback at a fixed nominal cadence
pub struct FixedTicker<C: Clock> {
    clock: C,
    interval: Duration,
    /// Upper bound on dt handed to the callback (seconds)
    max_dt: f32,
    stop: StopHandle,
}

impl<C: Clock> FixedTicker<C> {
    pub fn new(clock: C, interval: Duration) -> Self {
        Self {
            clock,
            interval,
            max_dt: 0.1,
            stop: StopHandle::new(),
        }
    }

    pub fn with_max_dt(mut self, max_dt: f32) -> Self {
        self.max_dt = max_dt.max(0.0);
        self
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Handle that can stop this ticker from the callback or another thread
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Run until stopped or the callback breaks. Returns ticks executed.
    ///
    /// A stop request takes effect before the next tick; a tick in progress
    /// always completes.
    pub fn run<F>(&mut self, mut on_tick: F) -> u64
    where
        F: FnMut(f32) -> ControlFlow<()>,
    {
        let mut ticks = 0;
        let mut last_update = self.clock.now_ms();
        log::debug!("Tick loop started ({} ms)", self.interval.as_millis());

        while !self.stop.is_stopped() {
            let now = self.clock.now_ms();
            let dt = (now.saturating_sub(last_update) as f32 / 1000.0).min(self.max_dt);
            last_update = now;

            ticks += 1;
            if on_tick(dt).is_break() || self.stop.is_stopped() {
                break;
            }
            self.clock.sleep(self.interval);
        }

        log::debug!("Tick loop stopped after {} ticks", ticks);
        ticks
    }
}
