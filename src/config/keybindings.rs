//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only code and modifiers are compared; key kind and state are ignored.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }

    /// Bind (or rebind) a key.
    pub fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };

        // Depth scrolling
        bindings.bind(KeyCode::Char('k'), KeyModifiers::NONE, KeyAction::ScrollUp);
        bindings.bind(KeyCode::Char('j'), KeyModifiers::NONE, KeyAction::ScrollDown);
        bindings.bind(KeyCode::Up, KeyModifiers::NONE, KeyAction::ScrollUp);
        bindings.bind(KeyCode::Down, KeyModifiers::NONE, KeyAction::ScrollDown);
        bindings.bind(KeyCode::Char('g'), KeyModifiers::NONE, KeyAction::ScrollToTop);
        bindings.bind(KeyCode::Home, KeyModifiers::NONE, KeyAction::ScrollToTop);
        bindings.bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::ScrollToBottom);
        bindings.bind(KeyCode::End, KeyModifiers::NONE, KeyAction::ScrollToBottom);
        bindings.bind(KeyCode::Char(' '), KeyModifiers::NONE, KeyAction::Snap);

        // Page navigation
        bindings.bind(KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::PageUp);
        bindings.bind(KeyCode::Char('d'), KeyModifiers::CONTROL, KeyAction::PageDown);
        bindings.bind(KeyCode::PageUp, KeyModifiers::NONE, KeyAction::PageUp);
        bindings.bind(KeyCode::PageDown, KeyModifiers::NONE, KeyAction::PageDown);

        // Mode
        bindings.bind(KeyCode::Tab, KeyModifiers::NONE, KeyAction::ToggleUiMode);

        // Conversation
        bindings.bind(KeyCode::Char('s'), KeyModifiers::NONE, KeyAction::SendMessage);
        bindings.bind(KeyCode::Char('r'), KeyModifiers::NONE, KeyAction::ReceiveMessage);
        bindings.bind(KeyCode::Char('x'), KeyModifiers::NONE, KeyAction::DeleteFocused);

        // Application controls
        bindings.bind(KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Quit);
        bindings.bind(KeyCode::Esc, KeyModifiers::NONE, KeyAction::Quit);
        bindings.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        bindings
    }
}
