//! Box styling for the depth stack.
//!
//! Opacity from the layout engine maps onto a gray ramp; terminals have no
//! alpha channel.

use ratatui::style::{Color, Modifier, Style};

/// Darkest shade used for a box that is still visible.
const MIN_SHADE: f64 = 60.0;

/// Brightest shade, used at full opacity.
const MAX_SHADE: f64 = 255.0;

/// Gray for an opacity in `[0, 1]`.
pub fn shade(opacity: f64) -> Color {
    let t = if opacity.is_finite() { opacity.clamp(0.0, 1.0) } else { 0.0 };
    let v = (MIN_SHADE + (MAX_SHADE - MIN_SHADE) * t).round() as u8;
    Color::Rgb(v, v, v)
}

/// Border of a box. The in-focus box is drawn bold in the accent color.
pub fn box_border_style(opacity: f64, focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(shade(opacity))
    }
}

pub fn box_text_style(opacity: f64) -> Style {
    Style::default().fg(shade(opacity))
}

/// Status bar background.
pub fn status_style() -> Style {
    Style::default().fg(Color::Black).bg(Color::Gray)
}
