//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
///
/// "Up" moves the depth position toward older items, "down" toward newer ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Depth scrolling
    /// Drag the depth position a fraction of an item toward older items. Default: k/↑
    ScrollUp,
    /// Drag the depth position a fraction of an item toward newer items. Default: j/↓
    ScrollDown,
    /// Move one whole item toward older items. Default: Ctrl+u/Page Up
    PageUp,
    /// Move one whole item toward newer items. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the oldest item. Default: g/Home
    ScrollToTop,
    /// Jump to the newest item. Default: G/End
    ScrollToBottom,
    /// Settle on the nearest snap target. Default: Space
    Snap,

    // Mode
    /// Switch between compact "read" and expanded "write" spacing. Default: Tab
    ToggleUiMode,

    // Conversation mutation (exercise insert/delete transitions)
    /// Append a new outgoing message. Default: s
    SendMessage,
    /// Append a new incoming message. Default: r
    ReceiveMessage,
    /// Remove the newer of the two focused messages. Default: x
    DeleteFocused,

    // Application
    /// Quit the application. Default: q/Esc/Ctrl+c
    Quit,
}
