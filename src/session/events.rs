// src/session/events.rs — One-shot events for the presentation layer

/// Things that happen once rather than persist in `ChatState`.
/// Each event is delivered to exactly one consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ShowToast(String),
    /// Input is no longer being edited (submit or fetch started).
    DismissKeyboard,
    /// New bubbles were appended.
    ScrollToBottom,
}
