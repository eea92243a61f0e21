use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::{OptionItem, PickerConfig};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Four people, none selected, `<name>@example.com` values.
pub fn people() -> Vec<OptionItem> {
    ["Alice", "Bob", "Carl", "Dana"]
        .iter()
        .map(|name| {
            OptionItem::new(*name, format!("{}@example.com", name.to_lowercase()))
                .with_image(format!("https://example.com/{}.png", name.to_lowercase()))
        })
        .collect()
}

/// Build an App over [`people`] with the default config.
pub fn app_with_people() -> App {
    App::new(&people(), &PickerConfig::default()).unwrap()
}
