use std::{
    io,
    time::{Duration, Instant},
};

use crate::{App, event::TuiEvent, event_loop::EventLoop};

/// Owner of the terminal and the event loop.
///
/// Applications reach the runtime from their [`App`] callbacks to change the
/// tick interval or pause ticks.
#[derive(Debug, Default)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fixed period between two [`App::update`] calls; `None` disables ticks.
    pub fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.events.set_tick_interval(interval, Instant::now());
    }

    #[must_use]
    pub fn tick_interval(&self) -> Option<Duration> {
        self.events.tick_interval()
    }

    /// Stops or restarts ticks without touching the tick interval.
    pub fn set_ticks_paused(&mut self, paused: bool) {
        self.events.set_ticks_paused(paused, Instant::now());
    }

    #[must_use]
    pub fn ticks_paused(&self) -> bool {
        self.events.ticks_paused()
    }

    /// Sets the minimum time between two frames.
    pub fn set_frame_interval(&mut self, interval: Duration) {
        self.events.set_frame_interval(interval);
    }

    /// Runs `app` until [`App::should_exit`] returns true.
    ///
    /// The terminal is switched to raw mode and the alternate screen for the
    /// duration of the call and restored afterwards, also on error.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick => app.update(&mut self),
                    TuiEvent::Render => {
                        terminal.draw(|frame| app.draw(frame))?;
                    }
                    TuiEvent::Terminal(event) => app.handle_event(&mut self, event),
                }
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_keeps_interval() {
        let mut runtime = Runtime::new();
        runtime.set_tick_interval(Some(Duration::from_millis(250)));
        runtime.set_ticks_paused(true);

        assert!(runtime.ticks_paused());
        assert_eq!(runtime.tick_interval(), Some(Duration::from_millis(250)));

        runtime.set_ticks_paused(false);
        assert!(!runtime.ticks_paused());
    }
}
