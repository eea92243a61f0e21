pub mod dropdown;
pub mod field;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::App;

/// Main render function: title, field, dropdown, status row
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Rebuilt below; clicks always match what is on screen
    app.hit_regions.clear();
    app.widget_area = None;

    // Layout: spacer | title | spacer | content | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1), // title
            Constraint::Length(1),
            Constraint::Min(1),    // field + dropdown
            Constraint::Length(1), // status row
        ])
        .split(area);

    if !app.ui.title.is_empty() {
        let title = Paragraph::new(Line::from(Span::styled(
            app.ui.title.clone(),
            Style::default()
                .fg(app.theme.text_bright)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .style(bg_style);
        frame.render_widget(title, chunks[1]);
    }

    let field_area = field::render_field(frame, app, chunks[3]);

    // Dropdown floats over whatever is below the field
    dropdown::render_dropdown(frame, app, field_area, chunks[4].y);

    status_row::render_status_row(frame, app, chunks[4]);
}
