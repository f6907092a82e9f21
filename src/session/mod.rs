// src/session/mod.rs — Interactive practice session: state, events, controller

pub mod controller;
pub mod events;
pub mod messages;
pub mod state;

pub use controller::SessionController;
pub use events::UiEvent;
pub use state::{ChatBubble, ChatPhase, ChatState, Sender, SessionStats};
