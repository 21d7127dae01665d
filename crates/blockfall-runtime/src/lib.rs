//! Terminal event loop merging a fixed-period timer with terminal input.
//!
//! [`Runtime::run`] drives an [`App`]: timer ticks call [`App::update`],
//! terminal events call [`App::handle_event`] in arrival order, and the screen
//! is redrawn after anything changed.

pub use self::{app::App, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
