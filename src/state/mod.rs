//! UI state machine.
//!
//! State transitions are plain functions testable without a terminal.

pub mod app_state;
pub mod scroll_handler;

// Re-export for convenience
pub use app_state::{AppState, ExitAnimation};
pub use scroll_handler::{handle_conversation_action, handle_scroll_action};
