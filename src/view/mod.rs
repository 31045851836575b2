//! TUI rendering and terminal management (impure shell)

pub mod layout;
pub mod stack;
mod styles;

pub use layout::{render_layout, status_line};
pub use stack::{truncate_to_width, StackWidget};

use crate::config::keybindings::KeyBindings;
use crate::model::{AppError, KeyAction};
use crate::source::{Conversation, InputSource};
use crate::state::{handle_conversation_action, handle_scroll_action, AppState};
use crate::view_state::{LayoutParams, ScrollPosition};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Frame interval while something is animating.
const ANIMATION_INTERVAL: Duration = Duration::from_millis(33);

/// Poll interval while idle.
const IDLE_INTERVAL: Duration = Duration::from_millis(250);

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Input source error
    #[error("Input error: {0}")]
    Input(#[from] crate::model::InputError),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    source_label: String,
    /// True while the last tick reported motion.
    animating: bool,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(app_state: AppState, source_label: String) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self::with_terminal(terminal, app_state, source_label))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q, Esc or Ctrl+C). Polls at frame rate only
    /// while the depth or an exit animation is still moving.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            let interval = if self.animating {
                ANIMATION_INTERVAL
            } else {
                IDLE_INTERVAL
            };

            if event::poll(interval)? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Resize(width, height) => {
                        self.handle_resize(width, height);
                    }
                    _ => continue,
                }
            }

            self.animating = self.app_state.tick();
            self.draw()?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Wrap an existing terminal. The viewport is sized from the terminal.
    pub fn with_terminal(terminal: Terminal<B>, app_state: AppState, source_label: String) -> Self {
        let mut app = Self {
            terminal,
            app_state,
            key_bindings: KeyBindings::default(),
            source_label,
            animating: false,
        };
        let (width, height) = match app.terminal.size() {
            Ok(size) if size.width > 0 => (size.width, size.height),
            _ => (80, 24),
        };
        app.handle_resize(width, height);
        app
    }

    pub fn app_state(&self) -> &AppState {
        &self.app_state
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, even if rebound
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        debug!(?action, "key action");

        match action {
            KeyAction::Quit => return true,
            KeyAction::SendMessage | KeyAction::ReceiveMessage | KeyAction::DeleteFocused => {
                handle_conversation_action(&mut self.app_state, action);
            }
            _ => handle_scroll_action(&mut self.app_state, action),
        }
        self.animating = true;
        false
    }

    /// Resize the viewport to the stack area of a `width` x `height` terminal.
    fn handle_resize(&mut self, width: u16, height: u16) {
        let (stack_area, _) = layout::split_frame(Rect::new(0, 0, width.max(1), height));
        let (section_area, _) = layout::split_sections(stack_area);
        let item_height = self.app_state.layout().params().item_height();
        let viewport = stack::viewport_for(section_area, item_height);
        self.app_state.set_viewport(viewport.width, viewport.height);
    }

    /// Run a layout pass and render the frame
    pub fn draw(&mut self) -> Result<(), TuiError> {
        self.app_state.layout_pass();

        let state = &self.app_state;
        let label = self.source_label.as_str();
        self.terminal.draw(|frame| render_layout(frame, state, label))?;
        Ok(())
    }
}

/// Initialize and run the TUI application with input source and layout parameters
///
/// This is the main entry point for the TUI. It handles terminal
/// setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source(
    mut input_source: InputSource,
    params: LayoutParams,
    start: ScrollPosition,
) -> Result<(), TuiError> {
    let messages = input_source.poll();
    info!(messages = messages.len(), source = %input_source.label(), "starting stack view");

    let mut state = AppState::new(Conversation::from_messages(messages), params);
    state.jump_to(start);
    let mut app = TuiApp::new(state, input_source.label())?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
