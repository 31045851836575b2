//! Depth-stack widget.
//!
//! Draws one section of the conversation as a stack of bordered boxes. The
//! resting (focused) box sits near the bottom of the area; receding boxes
//! shrink, fade and move up behind it.

use crate::model::{ItemKey, Section};
use crate::state::AppState;
use crate::view::styles::{box_border_style, box_text_style};
use crate::view_state::{VisualTransform, ViewportDimensions};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Height in rows of a box at scale 1.
pub const BASE_BOX_ROWS: u16 = 5;

/// Width of a box at scale 1, as a fraction of its section's area.
const BOX_WIDTH_FRACTION: f64 = 0.8;

/// Smallest box that can still show a border and one line of text.
const MIN_BOX_ROWS: u16 = 3;
const MIN_BOX_COLS: u16 = 6;

/// Layout units per terminal row for a given item height.
pub fn units_per_row(item_height: f64) -> f64 {
    item_height / f64::from(BASE_BOX_ROWS)
}

/// Viewport of a terminal area, in layout units.
pub fn viewport_for(area: Rect, item_height: f64) -> ViewportDimensions {
    let scale = units_per_row(item_height);
    // Terminal cells are about twice as tall as they are wide.
    ViewportDimensions::new(
        f64::from(area.width) * scale / 2.0,
        f64::from(area.height) * scale,
    )
}

/// Truncate `text` to at most `max_width` display columns, marking the cut
/// with an ellipsis.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// One box to draw.
#[derive(Debug, Clone)]
struct StackBox<'a> {
    key: &'a ItemKey,
    transform: VisualTransform,
    text: &'a str,
}

/// Widget drawing one section of the last layout pass.
///
/// Items still animating out after removal are drawn with their exit
/// transform, interleaved by z-order with the live items.
#[derive(Debug, Clone)]
pub struct StackWidget<'a> {
    section: Section,
    boxes: Vec<StackBox<'a>>,
    item_height: f64,
}

impl<'a> StackWidget<'a> {
    pub fn new(state: &'a AppState, section: Section) -> Self {
        let mut boxes: Vec<StackBox<'a>> = state
            .last_pass()
            .map(|pass| pass.draw_order(section))
            .unwrap_or_default()
            .into_iter()
            .map(|(key, transform)| StackBox {
                key,
                transform: *transform,
                text: state.conversation().text(key).unwrap_or(""),
            })
            .collect();

        boxes.extend(
            state
                .exit_transforms()
                .into_iter()
                .filter(|(key, _)| key.section == section)
                .map(|(key, transform)| StackBox {
                    key,
                    transform,
                    text: "",
                }),
        );
        // Farthest first; stable so exiting boxes stay under live ones of equal rank.
        boxes.sort_by_key(|b| b.transform.z_order);

        Self {
            section,
            boxes,
            item_height: state.layout().params().item_height(),
        }
    }

    /// Number of boxes that will be drawn.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Screen rectangle of a box, clipped to `area`. `None` when nothing of
    /// it is visible.
    fn box_rect(&self, area: Rect, transform: &VisualTransform) -> Option<Rect> {
        let scale = transform.scale.max(0.0);
        let full_width = f64::from(area.width.saturating_sub(2)) * BOX_WIDTH_FRACTION;
        let width = (full_width * scale).round();
        let height = (f64::from(BASE_BOX_ROWS) * scale).round();
        if width < f64::from(MIN_BOX_COLS) || height < f64::from(MIN_BOX_ROWS) {
            return None;
        }

        let rows_per_unit = 1.0 / units_per_row(self.item_height);
        let resting_center_y =
            f64::from(area.bottom()) - 1.0 - f64::from(BASE_BOX_ROWS) / 2.0;
        let center_y = resting_center_y + transform.center_offset.y * rows_per_unit;

        // Incoming hugs the left edge, outgoing the right.
        let resting_center_x = match self.section {
            Section::Incoming => f64::from(area.left()) + 1.0 + full_width / 2.0,
            Section::Outgoing => f64::from(area.right()) - 1.0 - full_width / 2.0,
        };
        let center_x = resting_center_x + transform.center_offset.x * rows_per_unit * 2.0;

        let left = (center_x - width / 2.0).round() as i64;
        let top = (center_y - height / 2.0).round() as i64;
        let right = left + width as i64;
        let bottom = top + height as i64;

        let clip_left = left.max(i64::from(area.left()));
        let clip_top = top.max(i64::from(area.top()));
        let clip_right = right.min(i64::from(area.right()));
        let clip_bottom = bottom.min(i64::from(area.bottom()));
        if clip_right <= clip_left || clip_bottom <= clip_top {
            return None;
        }

        Some(Rect::new(
            u16::try_from(clip_left).ok()?,
            u16::try_from(clip_top).ok()?,
            u16::try_from(clip_right - clip_left).ok()?,
            u16::try_from(clip_bottom - clip_top).ok()?,
        ))
    }
}

impl Widget for StackWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for stack_box in &self.boxes {
            let transform = &stack_box.transform;
            if transform.opacity <= 0.0 {
                continue;
            }
            let Some(rect) = self.box_rect(area, transform) else {
                continue;
            };
            let focused = transform.placement.is_focused();

            let title_width = usize::from(rect.width.saturating_sub(4));
            let title = truncate_to_width(stack_box.key.id.as_str(), title_width);
            let block = Block::bordered()
                .title(format!(" {title} "))
                .border_style(box_border_style(transform.opacity, focused));

            Clear.render(rect, buf);
            Paragraph::new(stack_box.text)
                .style(box_text_style(transform.opacity))
                .wrap(Wrap { trim: true })
                .block(block)
                .render(rect, buf);
        }
    }
}

#[cfg(test)]
#[path = "stack_tests.rs"]
mod tests;
