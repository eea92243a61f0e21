use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, Hit};
use crate::util::unicode::{display_width, fit_to_width};

/// Render the candidate dropdown floating below the field.
/// `bottom` is the first row the dropdown must not cover (the status row).
pub fn render_dropdown(frame: &mut Frame, app: &mut App, field: Rect, bottom: u16) {
    if !app.picker.dropdown_visible() {
        return;
    }

    let bg = app.theme.background;
    let max_visible = app.ui.max_visible.max(1);
    let show_values = app.ui.show_values;
    let cursor = app.picker.input.row();

    let rows: Vec<(String, String, String)> = app
        .picker
        .filtered()
        .iter()
        .map(|c| {
            (
                c.item.label.clone(),
                c.item.value.clone(),
                format!(" {} ", c.item.initial()),
            )
        })
        .collect();
    let term_area = frame.area();

    // Below the field if it fits, otherwise whichever side has more room
    let field_bottom = field.y + field.height;
    let room_below = bottom.min(term_area.bottom()).saturating_sub(field_bottom);
    let room_above = field.y.saturating_sub(term_area.y);
    let wanted = rows.len().min(max_visible) as u16 + 2;
    let below = wanted <= room_below || room_below >= room_above;
    let room = if below { room_below } else { room_above };
    let count = rows.len().min(max_visible).min(room.saturating_sub(2) as usize);
    if count == 0 {
        return;
    }

    // Scroll window around the cursor row
    let scroll_start = if cursor >= count {
        cursor - count + 1
    } else {
        0
    };
    let window = &rows[scroll_start..(scroll_start + count).min(rows.len())];

    let label_w = window
        .iter()
        .map(|(label, _, _)| display_width(label))
        .max()
        .unwrap_or(0);
    let value_w = if show_values {
        window
            .iter()
            .map(|(_, value, _)| display_width(value))
            .max()
            .unwrap_or(0)
    } else {
        0
    };
    let avatar_w = window
        .iter()
        .map(|(_, _, avatar)| display_width(avatar))
        .max()
        .unwrap_or(3);

    // prefix + avatar + space + label + gap + value + right pad, inside borders
    let gap = if value_w > 0 { 2 } else { 0 };
    let content_w = 3 + avatar_w + 1 + label_w + gap + value_w + 1;
    let popup_w = ((content_w + 2) as u16)
        .min(term_area.width.saturating_sub(field.x + 1))
        .max(12)
        .min(term_area.width);
    let popup_h = (count as u16) + 2;

    let y = if below { field_bottom } else { field.y - popup_h };
    let x = (field.x + 1).min(term_area.right().saturating_sub(popup_w));
    let popup_area = Rect::new(x, y, popup_w, popup_h).intersection(term_area);
    if popup_area.width < 3 || popup_area.height < 3 {
        return;
    }
    let popup_w = popup_area.width;

    // Columns left after prefix, avatar and spacer
    let text_w = (popup_w as usize).saturating_sub(2 + 3 + avatar_w + 1);
    let label_cells = label_w.min(text_w);
    let value_cells = text_w.saturating_sub(label_cells + gap);

    let mut lines: Vec<Line> = Vec::new();
    for (i, (label, value, avatar)) in window.iter().enumerate() {
        let actual_idx = scroll_start + i;
        let is_cursor = actual_idx == cursor;

        let style = if is_cursor {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        let value_style = style.fg(app.theme.dim).remove_modifier(Modifier::BOLD);

        let prefix = if is_cursor { " \u{25B8} " } else { "   " };
        let mut spans = vec![
            Span::styled(prefix, style),
            Span::styled(
                fit_to_width(avatar, avatar_w),
                Style::default()
                    .fg(app.theme.avatar_fg)
                    .bg(app.theme.avatar_bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ", style),
            Span::styled(fit_to_width(label, label_cells), style),
        ];
        if show_values {
            spans.push(Span::styled(" ".repeat(gap), style));
            spans.push(Span::styled(fit_to_width(value, value_cells), value_style));
        }
        lines.push(Line::from(spans));

        let row_y = popup_area.y + 1 + i as u16;
        if row_y + 1 >= popup_area.bottom() {
            continue;
        }
        app.hit_regions.push((
            Rect::new(popup_area.x + 1, row_y, popup_w - 2, 1),
            Hit::DropdownRow(label.clone()),
        ));
    }

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines).block(block).style(Style::default().bg(bg));
    frame.render_widget(paragraph, popup_area);
}
