use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// A terminal application driven by [`Runtime::run`].
pub trait App {
    /// Called once before the first event. Configure the tick interval here.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Handles one terminal event (key press, resize, ...).
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    /// Advances the application by one timer tick.
    fn update(&mut self, runtime: &mut Runtime);

    fn draw(&self, frame: &mut Frame);
}
