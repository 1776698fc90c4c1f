//! Deterministic fixed-step playback of an [`Animation`].

use crate::animation::Animation;
use crate::foundation::error::{JaoError, JaoResult};
use crate::time::clock::ManualClock;

/// Options for [`play`].
#[derive(Clone, Debug)]
pub struct PlaybackOpts {
    /// Milliseconds between ticks. Must be > 0.
    pub tick_ms: u64,
    /// Stop (unfinished) once elapsed time passes this bound.
    pub max_ms: u64,
    /// Call [`Animation::prepare_to_finish`] once elapsed time reaches this value.
    pub finish_at_ms: Option<u64>,
    /// Event to switch every layer to before starting.
    pub event: Option<String>,
}

impl Default for PlaybackOpts {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            max_ms: 60_000,
            finish_at_ms: None,
            event: None,
        }
    }
}

/// Outcome of a [`play`] run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PlaybackStats {
    /// Number of `render()` calls.
    pub ticks: u64,
    /// Elapsed time at the last tick.
    pub elapsed_ms: u64,
    /// Whether the animation reported done before `max_ms`.
    pub finished: bool,
}

/// Drive `animation` on a [`ManualClock`] in steps of `tick_ms` until it is done or
/// `max_ms` has passed.
///
/// The animation's clock is replaced and the animation is reset before the first tick.
#[tracing::instrument(skip_all, fields(tick_ms = opts.tick_ms, max_ms = opts.max_ms))]
pub fn play(animation: &mut Animation, opts: &PlaybackOpts) -> JaoResult<PlaybackStats> {
    if opts.tick_ms == 0 {
        return Err(JaoError::validation("tick_ms must be > 0"));
    }

    let clock = ManualClock::new();
    let time = clock.handle();
    animation.set_clock(Box::new(clock));
    if let Some(event) = &opts.event {
        animation.set_event(event);
    }
    animation.reset()?;

    let mut stats = PlaybackStats::default();
    let mut finishing = false;
    loop {
        let now = time.get();
        if !finishing && opts.finish_at_ms.is_some_and(|at| now >= at) {
            animation.prepare_to_finish();
            finishing = true;
        }

        animation.render()?;
        stats.ticks += 1;
        stats.elapsed_ms = animation.elapsed();

        if animation.is_done() {
            stats.finished = true;
            break;
        }
        if stats.elapsed_ms >= opts.max_ms {
            break;
        }
        time.advance(opts.tick_ms);
    }

    tracing::info!(
        ticks = stats.ticks,
        elapsed_ms = stats.elapsed_ms,
        finished = stats.finished,
        "playback stopped"
    );
    Ok(stats)
}

#[cfg(test)]
#[path = "../tests/unit/playback.rs"]
mod tests;
