use std::time::Duration;

use blockfall_engine::{Action, GameSession};
use blockfall_runtime::{App, Runtime};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Text,
};

use crate::view::widgets::{GameDisplay, style};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play(Action),
    TogglePause,
    Quit,
}

impl Command {
    fn from_key(code: KeyCode) -> Option<Self> {
        let command = match code {
            KeyCode::Left => Self::Play(Action::Left),
            KeyCode::Right => Self::Play(Action::Right),
            KeyCode::Down => Self::Play(Action::Down),
            KeyCode::Up => Self::Play(Action::Rotate),
            KeyCode::Char(' ') => Self::Play(Action::Drop),
            KeyCode::Char('p' | 'P') => Self::TogglePause,
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => Self::Quit,
            _ => return None,
        };
        Some(command)
    }
}

/// Terminal game: turns key presses and timer ticks into actions for one session.
#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    tick_interval: Duration,
    paused: bool,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession, tick_interval: Duration) -> Self {
        Self {
            session,
            tick_interval,
            paused: false,
            is_exiting: false,
        }
    }

    pub fn into_session(self) -> GameSession {
        self.session
    }

    fn is_playing(&self) -> bool {
        !self.paused && !self.session.is_over()
    }

    fn apply(&mut self, runtime: &mut Runtime, action: Action) {
        if self.session.apply(action).is_break() {
            // The stream ends with the game; only quitting is left
            runtime.set_tick_interval(None);
        }
    }

    fn execute(&mut self, runtime: &mut Runtime, command: Command) {
        match command {
            Command::Play(action) if self.is_playing() => self.apply(runtime, action),
            Command::Play(_) => {}
            Command::TogglePause if !self.session.is_over() => {
                self.paused = !self.paused;
                runtime.set_ticks_paused(self.paused);
                tracing::debug!(paused = self.paused, "pause toggled");
            }
            Command::TogglePause => {}
            Command::Quit => self.is_exiting = true,
        }
    }

    fn help_text(&self) -> &'static str {
        if self.session.is_over() {
            "Q (Quit)"
        } else if self.paused {
            "P (Resume) | Q (Quit)"
        } else {
            "← → (Move) | ↓ (Soft Drop) | ↑ (Rotate) | Space (Hard Drop) | P (Pause) | Q (Quit)"
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_interval(Some(self.tick_interval));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        if let Some(key) = event.as_key_event()
            && key.kind == KeyEventKind::Press
            && let Some(command) = Command::from_key(key.code)
        {
            self.execute(runtime, command);
        }
    }

    fn update(&mut self, runtime: &mut Runtime) {
        if self.is_playing() {
            self.apply(runtime, Action::Tick);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let game = GameDisplay::new(self.session.state()).paused(self.paused);
        let help = Text::from(self.help_text()).style(style::HELP).centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(22), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(game, main_area);
        frame.render_widget(help, help_area);
    }
}
