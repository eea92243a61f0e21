use serde::{Deserialize, Serialize};

/// One entry of the candidate universe, as supplied by the caller.
///
/// `label` doubles as the identity of the entry: every mutation on the
/// selection store is keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    pub label: String,
    #[serde(default)]
    pub value: String,
    /// Avatar URI. Decorative only.
    #[serde(default, rename = "imgUrl", alias = "imageUrl", alias = "image_url")]
    pub image_url: String,
}

impl OptionItem {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        OptionItem {
            label: label.into(),
            value: value.into(),
            image_url: String::new(),
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }

    /// First grapheme of the label, upper-cased; used as the terminal avatar.
    pub fn initial(&self) -> String {
        use unicode_segmentation::UnicodeSegmentation;
        self.label
            .graphemes(true)
            .next()
            .map(|g| g.to_uppercase())
            .unwrap_or_else(|| "?".to_string())
    }
}

/// A candidate inside the selection store: the caller's item plus the two
/// internal flags the caller never sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub item: OptionItem,
    pub selected: bool,
    /// Armed for deletion by a first Backspace
    pub pending_removal: bool,
}

impl Candidate {
    pub fn new(item: OptionItem) -> Self {
        Candidate {
            item,
            selected: false,
            pending_removal: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.item.label
    }
}
