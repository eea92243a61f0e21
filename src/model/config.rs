use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from chipselect.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PickerConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Grace period between losing focus and closing the dropdown, so a
    /// click on a dropdown row still lands.
    #[serde(default = "default_blur_delay_ms")]
    pub blur_delay_ms: u64,
    /// Kitty keyboard protocol: true = force on, false = force off, absent = on when supported.
    /// Backspace acts on key release only while it is on.
    #[serde(default)]
    pub kitty_keyboard: Option<bool>,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            blur_delay_ms: default_blur_delay_ms(),
            kitty_keyboard: None,
        }
    }
}

fn default_blur_delay_ms() -> u64 {
    500
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub placeholder: String,
    /// Maximum number of dropdown rows shown at once
    #[serde(default = "default_max_visible")]
    pub max_visible: usize,
    /// Show each option's value next to its label in the dropdown
    #[serde(default = "default_true")]
    pub show_values: bool,
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            title: default_title(),
            placeholder: String::new(),
            max_visible: default_max_visible(),
            show_values: true,
            colors: HashMap::new(),
        }
    }
}

fn default_title() -> String {
    "Select Multiple Values".to_string()
}

fn default_max_visible() -> usize {
    8
}

fn default_true() -> bool {
    true
}
