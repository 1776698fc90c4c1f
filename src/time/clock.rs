use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::{Instant, SystemTime, UNIX_EPOCH},
};

/// Monotonic time source owned by an [`crate::Animation`].
///
/// `now()` returns milliseconds since the last `reset()` and records frame timing as a side
/// effect. Values from distinct clocks are never comparable.
pub trait Clock: Send + fmt::Debug {
    /// Elapsed milliseconds since the last reset.
    fn now(&mut self) -> u64;

    /// Move the origin to the current time and zero the frame delta.
    fn reset(&mut self);

    /// Time of the last `now()` call, in the clock's own time base.
    fn last_frame_time(&self) -> u64;

    /// Milliseconds between the last two `now()` calls.
    fn last_frame_delta(&self) -> u64;

    /// Independent copy with identical origin and frame state.
    fn box_clone(&self) -> Box<dyn Clock>;
}

impl Clone for Box<dyn Clock> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// Wall clock backed by [`Instant`]; frame times are reported as Unix epoch milliseconds.
#[derive(Clone, Debug)]
pub struct StandardClock {
    origin: Instant,
    last_elapsed: u64,
    last_frame_time: u64,
    last_frame_delta: u64,
}

impl StandardClock {
    /// Clock whose origin is the moment of construction.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            last_elapsed: 0,
            last_frame_time: epoch_millis(),
            last_frame_delta: 0,
        }
    }
}

impl Default for StandardClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for StandardClock {
    fn now(&mut self) -> u64 {
        let elapsed = u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.last_frame_delta = elapsed.saturating_sub(self.last_elapsed);
        self.last_elapsed = elapsed;
        self.last_frame_time = epoch_millis();
        elapsed
    }

    fn reset(&mut self) {
        self.origin = Instant::now();
        self.last_elapsed = 0;
        self.last_frame_delta = 0;
        self.last_frame_time = epoch_millis();
    }

    fn last_frame_time(&self) -> u64 {
        self.last_frame_time
    }

    fn last_frame_delta(&self) -> u64 {
        self.last_frame_delta
    }

    fn box_clone(&self) -> Box<dyn Clock> {
        Box::new(self.clone())
    }
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// Externally driven time base shared between a [`ManualClock`] and its clones.
///
/// Time never moves backwards: `set` ignores values lower than the current time.
#[derive(Clone, Debug, Default)]
pub struct ManualTime {
    now_ms: Arc<AtomicU64>,
}

impl ManualTime {
    /// Current driven time in milliseconds.
    pub fn get(&self) -> u64 {
        self.now_ms.load(Ordering::Acquire)
    }

    /// Jump to `ms`, returning the resulting time.
    pub fn set(&self, ms: u64) -> u64 {
        let prev = self.now_ms.fetch_max(ms, Ordering::AcqRel);
        prev.max(ms)
    }

    /// Move forward by `delta_ms`, returning the resulting time.
    pub fn advance(&self, delta_ms: u64) -> u64 {
        let prev = self
            .now_ms
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |t| {
                Some(t.saturating_add(delta_ms))
            })
            .unwrap_or_else(|t| t);
        prev.saturating_add(delta_ms)
    }
}

/// Deterministic clock reading a [`ManualTime`] instead of the wall clock.
///
/// Clones share the time base (like wall clocks share real time) but keep their own origin.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    time: ManualTime,
    origin: u64,
    last_elapsed: u64,
    last_frame_time: u64,
    last_frame_delta: u64,
}

impl ManualClock {
    /// Clock over a fresh time base starting at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock over an existing time base; its origin is the current driven time.
    pub fn with_time(time: ManualTime) -> Self {
        let origin = time.get();
        Self {
            time,
            origin,
            last_elapsed: 0,
            last_frame_time: origin,
            last_frame_delta: 0,
        }
    }

    /// Handle used to drive this clock.
    pub fn handle(&self) -> ManualTime {
        self.time.clone()
    }
}

impl Clock for ManualClock {
    fn now(&mut self) -> u64 {
        let t = self.time.get();
        let elapsed = t.saturating_sub(self.origin);
        self.last_frame_delta = elapsed.saturating_sub(self.last_elapsed);
        self.last_elapsed = elapsed;
        self.last_frame_time = t;
        elapsed
    }

    fn reset(&mut self) {
        self.origin = self.time.get();
        self.last_elapsed = 0;
        self.last_frame_delta = 0;
        self.last_frame_time = self.origin;
    }

    fn last_frame_time(&self) -> u64 {
        self.last_frame_time
    }

    fn last_frame_delta(&self) -> u64 {
        self.last_frame_delta
    }

    fn box_clone(&self) -> Box<dyn Clock> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/time/clock.rs"]
mod tests;
