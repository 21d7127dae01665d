use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::event::TuiEvent;

/// Default minimum time between two frames (60 fps).
pub(super) const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// Scheduler for the merged event stream.
///
/// Ticks come at a fixed period while a tick interval is set and ticks are not
/// paused. Frames are drawn only after a tick or a terminal event, at most once
/// per frame interval. Terminal events are returned in arrival order.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    ticks_paused: bool,
    frame_interval: Duration,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl EventLoop {
    /// Creates a loop without ticks; the first frame is due immediately.
    pub(super) fn new(now: Instant) -> Self {
        let long_ago = now.checked_sub(Duration::from_secs(3600)).unwrap_or(now);
        Self {
            tick_interval: None,
            ticks_paused: false,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            last_tick: now,
            last_render: long_ago,
            dirty: true,
        }
    }

    /// Sets the tick period; `None` stops ticks. The first tick comes one full
    /// period after this call.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>, now: Instant) {
        self.tick_interval = interval;
        self.last_tick = now;
    }

    pub(super) fn tick_interval(&self) -> Option<Duration> {
        self.tick_interval
    }

    /// Suspends or resumes ticks. Resuming restarts the period from `now`.
    pub(super) fn set_ticks_paused(&mut self, paused: bool, now: Instant) {
        if self.ticks_paused && !paused {
            self.last_tick = now;
        }
        self.ticks_paused = paused;
        self.dirty = true;
    }

    pub(super) fn ticks_paused(&self) -> bool {
        self.ticks_paused
    }

    pub(super) fn set_frame_interval(&mut self, interval: Duration) {
        self.frame_interval = interval;
    }

    /// Blocks until the next event.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due(now) {
                return Ok(event);
            }
            if let Some(timeout) = self.timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }
            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    /// Returns the timer-driven event due at `now`, ticks first.
    fn due(&mut self, now: Instant) -> Option<TuiEvent> {
        if let Some(interval) = self.active_tick_interval()
            && now.duration_since(self.last_tick) >= interval
        {
            self.last_tick = now;
            self.dirty = true;
            return Some(TuiEvent::Tick);
        }
        if self.dirty && now.duration_since(self.last_render) >= self.frame_interval {
            self.last_render = now;
            self.dirty = false;
            return Some(TuiEvent::Render);
        }
        None
    }

    /// Time left until the next timer-driven event, `None` when only terminal
    /// input can wake the loop.
    fn timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self
            .active_tick_interval()
            .map(|interval| self.last_tick + interval);
        let next_render_at = self.dirty.then(|| self.last_render + self.frame_interval);
        let at = [next_tick_at, next_render_at].into_iter().flatten().min()?;
        Some(at.saturating_duration_since(now))
    }

    fn active_tick_interval(&self) -> Option<Duration> {
        self.tick_interval.filter(|_| !self.ticks_paused)
    }
}
