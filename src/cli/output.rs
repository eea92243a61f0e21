use serde::Serialize;

use crate::model::OptionItem;
use crate::tui::input::FocusState;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct CheckJson {
    pub ok: bool,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One line of `replay --json` output
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReplayEventJson {
    Notify {
        /// Step that caused the notification; 0 is the mount
        step: usize,
        selected: Vec<OptionItem>,
    },
    Final {
        selected: Vec<OptionItem>,
        query: String,
        state: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        highlighted: Option<String>,
        dropdown: Vec<String>,
        notifications: usize,
    },
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

pub fn focus_state_name(state: FocusState) -> &'static str {
    match state {
        FocusState::Idle => "idle",
        FocusState::Focused => "focused",
        FocusState::FocusedWithQuery => "focused+query",
    }
}

/// `label  value  image` rows with the label column aligned
pub fn format_option_rows(items: &[&OptionItem]) -> Vec<String> {
    let label_w = items
        .iter()
        .map(|i| crate::util::unicode::display_width(&i.label))
        .max()
        .unwrap_or(0);
    items
        .iter()
        .map(|i| {
            let label = crate::util::unicode::fit_to_width(&i.label, label_w);
            let mut row = format!("{}  {}", label, i.value);
            if !i.image_url.is_empty() {
                row.push_str("  ");
                row.push_str(&i.image_url);
            }
            row.trim_end().to_string()
        })
        .collect()
}

/// Comma-separated labels, or `(none)`
pub fn format_labels(items: &[OptionItem]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items
            .iter()
            .map(|i| i.label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
