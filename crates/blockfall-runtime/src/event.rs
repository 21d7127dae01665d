use crossterm::event::Event as CrosstermEvent;

/// One item of the merged event stream.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// The tick interval elapsed.
    Tick,
    /// Something changed since the last frame and the frame interval elapsed.
    Render,
    /// Terminal input, forwarded as is.
    Terminal(CrosstermEvent),
}
