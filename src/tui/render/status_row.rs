use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::display_width;

const HINTS: &str = "Tab focus  Esc blur  Enter pick  Bksp remove  ^C quit";

/// Render the status row (bottom of screen): key hints left, counts right
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let counts = format!(
        "{} selected \u{00B7} {} notified ",
        app.picker.store.selected_count(),
        app.log.len()
    );
    let counts_width = display_width(&counts);

    let mut spans = Vec::new();
    let hint_width = display_width(HINTS) + 1;
    if hint_width + counts_width < width {
        spans.push(Span::styled(
            format!(" {}", HINTS),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        let padding = width - hint_width - counts_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
    } else if counts_width < width {
        spans.push(Span::styled(
            " ".repeat(width - counts_width),
            Style::default().bg(bg),
        ));
    }
    spans.push(Span::styled(
        counts,
        Style::default().fg(app.theme.text).bg(bg),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use insta::assert_snapshot;

    #[test]
    fn counts_only_when_narrow() {
        let mut app = app_with_people();
        app.picker.pick("Bob");
        let output = render_to_string(24, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert_snapshot!(output, @"1 selected · 2 notified");
    }

    #[test]
    fn hints_when_wide_enough() {
        let app = app_with_people();
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(output.starts_with(" Tab focus"));
        assert!(output.ends_with("0 selected \u{00B7} 1 notified"));
    }
}
