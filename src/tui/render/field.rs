use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::model::Candidate;
use crate::tui::app::{App, Hit};
use crate::util::unicode::{display_width, truncate_to_width};

/// Widest the field box gets, even on a wide terminal
pub const MAX_FIELD_WIDTH: u16 = 72;

const DISMISS: &str = "\u{2715}";

/// Where one chip lands inside the field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipSlot {
    pub label: String,
    /// Label as drawn (possibly truncated)
    pub text: String,
    pub avatar: String,
    pub armed: bool,
    pub x: u16,
    pub y: u16,
    pub width: u16,
}

impl ChipSlot {
    /// Column of the dismiss button, relative to the field
    pub fn dismiss_x(&self) -> u16 {
        self.x + self.width - 2
    }
}

/// Flow chips left to right, wrapping onto new rows like inline boxes.
/// Each chip is ` A ` avatar, ` label `, `✕`, one trailing cell.
pub fn layout_chips(selected: &[&Candidate], width: u16) -> Vec<ChipSlot> {
    let width = width as usize;
    let mut slots = Vec::with_capacity(selected.len());
    let (mut x, mut y) = (0usize, 0usize);

    for c in selected {
        let avatar = format!(" {} ", c.item.initial());
        let fixed = display_width(&avatar) + 2 + 2;
        let text = truncate_to_width(&c.item.label, width.saturating_sub(fixed).max(1));
        let chip_w = fixed + display_width(&text);

        if x > 0 && x + chip_w > width {
            x = 0;
            y += 1;
        }
        slots.push(ChipSlot {
            label: c.item.label.clone(),
            text,
            avatar,
            armed: c.pending_removal,
            x: x as u16,
            y: y as u16,
            width: chip_w as u16,
        });
        x += chip_w + 1;
    }
    slots
}

/// Rows taken by the chips
pub fn chip_rows(slots: &[ChipSlot]) -> u16 {
    slots.last().map_or(0, |s| s.y + 1)
}

/// Render the bordered field (chips, input line, underline) centered at the
/// top of `area`. Returns the field's outline.
pub fn render_field(frame: &mut Frame, app: &mut App, area: Rect) -> Rect {
    let bg = app.theme.background;
    let focused = app.picker.input.is_focused();

    let box_w = area.width.min(MAX_FIELD_WIDTH);
    // borders + one cell of padding each side
    let inner_w = box_w.saturating_sub(4);

    let slots = layout_chips(&app.picker.selected(), inner_w);
    let rows = chip_rows(&slots);
    let box_h = (rows + 4).min(area.height);
    let box_area = Rect::new(area.x + (area.width - box_w) / 2, area.y, box_w, box_h);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.border).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);
    let inner = Rect::new(inner.x + 1, inner.y, inner_w, inner.height);

    // Chips
    let mut lines: Vec<Line> = Vec::new();
    for row in 0..rows {
        let mut spans: Vec<Span> = Vec::new();
        let mut col = 0u16;
        for slot in slots.iter().filter(|s| s.y == row) {
            if slot.x > col {
                spans.push(Span::styled(
                    " ".repeat((slot.x - col) as usize),
                    Style::default().bg(bg),
                ));
            }
            let chip_bg = app.theme.chip_background(slot.armed);
            spans.push(Span::styled(
                slot.avatar.clone(),
                Style::default()
                    .fg(app.theme.avatar_fg)
                    .bg(app.theme.avatar_bg)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!(" {} ", slot.text),
                Style::default().fg(app.theme.text_bright).bg(chip_bg),
            ));
            spans.push(Span::styled(
                DISMISS,
                Style::default().fg(app.theme.text).bg(chip_bg),
            ));
            spans.push(Span::styled(" ", Style::default().bg(chip_bg)));
            col = slot.x + slot.width;

            let y = inner.y + slot.y;
            if y < inner.y + inner.height {
                // Chips wider than the field are cut off at its edge
                let visible_w = slot.width.min(inner.width.saturating_sub(slot.x));
                app.hit_regions.push((
                    Rect::new(inner.x + slot.x, y, visible_w, 1),
                    Hit::Chip(slot.label.clone()),
                ));
                if slot.dismiss_x() < inner.width {
                    app.hit_regions.push((
                        Rect::new(inner.x + slot.dismiss_x(), y, 1, 1),
                        Hit::ChipDismiss(slot.label.clone()),
                    ));
                }
            }
        }
        lines.push(Line::from(spans));
    }
    if rows > 0 {
        let chip_area = Rect::new(inner.x, inner.y, inner.width, rows.min(inner.height));
        frame.render_widget(Paragraph::new(lines), chip_area);
    }

    // Input line
    let input_y = inner.y + rows;
    if input_y < inner.y + inner.height {
        let input_area = Rect::new(inner.x, input_y, inner.width, 1);
        let query = app.picker.query();
        let line = if query.is_empty() && !app.ui.placeholder.is_empty() {
            Line::from(Span::styled(
                app.ui.placeholder.clone(),
                Style::default().fg(app.theme.dim).bg(bg),
            ))
        } else {
            Line::from(Span::styled(
                query.to_string(),
                Style::default().fg(app.theme.text_bright).bg(bg),
            ))
        };
        frame.render_widget(Paragraph::new(line), input_area);
        let cursor_x = (display_width(query) as u16).min(inner.width.saturating_sub(1));
        frame.set_cursor_position((inner.x + cursor_x, input_y));
        app.hit_regions.push((input_area, Hit::Input));
    }

    // Underline, accent-colored while focused
    let underline_y = input_y + 1;
    if underline_y < inner.y + inner.height {
        let underline = Span::styled(
            "\u{2500}".repeat(inner.width as usize),
            Style::default().fg(app.theme.underline(focused)).bg(bg),
        );
        frame.render_widget(
            Paragraph::new(Line::from(underline)),
            Rect::new(inner.x, underline_y, inner.width, 1),
        );
    }

    app.widget_area = Some(box_area);
    box_area
}
