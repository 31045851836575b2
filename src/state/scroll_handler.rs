//! Keyboard action handlers.
//!
//! Functions that update AppState in place in response to key actions.
//! Scroll actions only change the scroll target; the depth follows on
//! subsequent ticks.

use crate::model::{ItemKey, KeyAction, Section};
use crate::state::AppState;
use crate::view_state::ScrollPosition;

/// Fraction of an item height moved by a single line scroll.
pub const SCROLL_STEP_FRACTION: f64 = 0.25;

/// Handle a depth-scrolling or mode action.
///
/// Steps are measured from the current target rather than the animated
/// depth, so repeated key presses accumulate while the view is still moving.
/// Non-scroll actions leave the state unchanged.
pub fn handle_scroll_action(state: &mut AppState, action: KeyAction) {
    let item_height = state.layout().params().item_height();
    let base = state.target_depth();

    let target = match action {
        KeyAction::ScrollUp => ScrollPosition::AtDepth(base.offset_by(-item_height * SCROLL_STEP_FRACTION)),
        KeyAction::ScrollDown => ScrollPosition::AtDepth(base.offset_by(item_height * SCROLL_STEP_FRACTION)),
        KeyAction::PageUp => {
            ScrollPosition::AtDepth(state.layout().snap_target(base.offset_by(-item_height)))
        }
        KeyAction::PageDown => {
            ScrollPosition::AtDepth(state.layout().snap_target(base.offset_by(item_height)))
        }
        KeyAction::ScrollToTop => ScrollPosition::Oldest,
        KeyAction::ScrollToBottom => ScrollPosition::Newest,
        KeyAction::Snap => ScrollPosition::AtDepth(state.layout().snap_target(state.depth())),
        KeyAction::ToggleUiMode => {
            state.toggle_ui_mode();
            return;
        }
        _ => return,
    };

    // Scrolling onto the newest item resumes following it.
    let target = match target {
        ScrollPosition::AtDepth(depth) if depth >= state.layout().max_depth() => {
            ScrollPosition::Newest
        }
        other => other,
    };

    state.scroll_to(target);
}

/// Handle an action that mutates the conversation.
///
/// Non-conversation actions leave the state unchanged.
pub fn handle_conversation_action(state: &mut AppState, action: KeyAction) {
    match action {
        KeyAction::SendMessage => {
            let message = state.compose_message(Section::Outgoing);
            state.insert_message(message);
        }
        KeyAction::ReceiveMessage => {
            let message = state.compose_message(Section::Incoming);
            state.insert_message(message);
        }
        KeyAction::DeleteFocused => {
            if let Some(key) = latest_focused(state) {
                state.remove_message(&key);
            }
        }
        _ => {}
    }
}

/// The focused message with the latest focus position, from either section.
fn latest_focused(state: &AppState) -> Option<ItemKey> {
    Section::ALL
        .iter()
        .filter_map(|&section| state.focused_key(section))
        .filter_map(|key| Some((state.layout().focus_position(&key)?, key)))
        .max_by(|(a, _), (b, _)| a.get().total_cmp(&b.get()))
        .map(|(_, key)| key)
}

#[cfg(test)]
#[path = "scroll_handler_tests.rs"]
mod tests;
