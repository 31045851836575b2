//! Screen layout: two side-by-side stacks above a status bar.
//!
//! Incoming messages stack on the left half, outgoing on the right.

use crate::model::Section;
use crate::state::AppState;
use crate::view::stack::StackWidget;
use crate::view::styles::status_style;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};

/// Split the frame into the stack area and the one-line status bar.
pub fn split_frame(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Split the stack area into (incoming, outgoing) halves.
pub fn split_sections(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Render both stacks and the status bar from the last layout pass.
pub fn render_layout(frame: &mut Frame, state: &AppState, source_label: &str) {
    let (stack_area, status_area) = split_frame(frame.area());
    let (incoming_area, outgoing_area) = split_sections(stack_area);

    frame.render_widget(StackWidget::new(state, Section::Incoming), incoming_area);
    frame.render_widget(StackWidget::new(state, Section::Outgoing), outgoing_area);

    let status = Paragraph::new(status_line(state, source_label)).style(status_style());
    frame.render_widget(status, status_area);
}

/// Status bar text: depth, target, mode, focused ids and input label.
pub fn status_line(state: &AppState, source_label: &str) -> Line<'static> {
    let focused = |section| {
        state
            .focused_key(section)
            .map(|key| key.id.to_string())
            .unwrap_or_else(|| "-".to_string())
    };

    Line::from(format!(
        " depth {:.0} -> {:.0} | {} | out: {} | in: {} | {} ",
        state.depth().get(),
        state.target_depth().get(),
        state.ui_mode(),
        focused(Section::Outgoing),
        focused(Section::Incoming),
        source_label,
    ))
}
