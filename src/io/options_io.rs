use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::OptionItem;
use crate::ops::selection::{SelectError, check_unique_labels};

/// Candidate list used when no options file is given
const MOCK_OPTIONS: &str = include_str!("../../data/mock_options.json");

/// Error type for loading a candidate list
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    JsonError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not parse {path}: {source}")]
    TomlError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("unsupported options file {0} (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),
    #[error("option #{0} has an empty label")]
    EmptyLabel(usize),
    #[error(transparent)]
    Invalid(#[from] SelectError),
}

/// TOML files hold the list under `[[options]]`
#[derive(Debug, Deserialize)]
struct TomlOptions {
    #[serde(default)]
    options: Vec<OptionItem>,
}

/// The built-in mock people list
pub fn mock_options() -> Vec<OptionItem> {
    // Checked by the `mock_options_are_valid` test
    serde_json::from_str(MOCK_OPTIONS).unwrap_or_default()
}

/// Load and validate a candidate list from a `.json` array or a `.toml`
/// file with `[[options]]` tables.
pub fn load_options(path: &Path) -> Result<Vec<OptionItem>, OptionsError> {
    let text = fs::read_to_string(path).map_err(|e| OptionsError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let items = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => parse_json_options(&text).map_err(|e| OptionsError::JsonError {
            path: path.to_path_buf(),
            source: e,
        })?,
        Some("toml") => parse_toml_options(&text).map_err(|e| OptionsError::TomlError {
            path: path.to_path_buf(),
            source: e,
        })?,
        _ => return Err(OptionsError::UnsupportedFormat(path.to_path_buf())),
    };
    validate_options(&items)?;
    tracing::debug!(path = %path.display(), count = items.len(), "options loaded");
    Ok(items)
}

/// Load `path` when given, the mock list otherwise
pub fn load_options_or_mock(path: Option<&Path>) -> Result<Vec<OptionItem>, OptionsError> {
    match path {
        Some(p) => load_options(p),
        None => Ok(mock_options()),
    }
}

pub fn parse_json_options(text: &str) -> Result<Vec<OptionItem>, serde_json::Error> {
    serde_json::from_str(text)
}

pub fn parse_toml_options(text: &str) -> Result<Vec<OptionItem>, toml::de::Error> {
    let parsed: TomlOptions = toml::from_str(text)?;
    Ok(parsed.options)
}

/// Labels must be non-empty and unique
pub fn validate_options(items: &[OptionItem]) -> Result<(), OptionsError> {
    if let Some(idx) = items.iter().position(|i| i.label.is_empty()) {
        return Err(OptionsError::EmptyLabel(idx + 1));
    }
    check_unique_labels(items)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn mock_options_are_valid() {
        let items: Vec<OptionItem> = serde_json::from_str(MOCK_OPTIONS).unwrap();
        assert!(!items.is_empty());
        validate_options(&items).unwrap();
        assert_eq!(mock_options(), items);
    }

    #[test]
    fn load_json_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("people.json");
        fs::write(
            &path,
            r#"[{"label":"Alice","value":"a","imgUrl":"a.png"},{"label":"Bob","value":"b"}]"#,
        )
        .unwrap();
        let items = load_options(&path).unwrap();
        assert_eq!(
            items,
            vec![
                OptionItem::new("Alice", "a").with_image("a.png"),
                OptionItem::new("Bob", "b"),
            ]
        );
    }

    #[test]
    fn load_toml_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("people.toml");
        fs::write(
            &path,
            r#"[[options]]
label = "Alice"
value = "a"
imgUrl = "a.png"

[[options]]
label = "Bob"
value = "b"
"#,
        )
        .unwrap();
        let items = load_options(&path).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].image_url, "a.png");
    }

    #[test]
    fn duplicate_labels_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("dup.json");
        fs::write(&path, r#"[{"label":"Alice"},{"label":"Alice"}]"#).unwrap();
        let err = load_options(&path).unwrap_err();
        assert!(matches!(
            err,
            OptionsError::Invalid(SelectError::DuplicateLabel(ref l)) if l == "Alice"
        ));
    }

    #[test]
    fn empty_label_rejected() {
        let items = vec![OptionItem::new("Alice", ""), OptionItem::new("", "x")];
        assert!(matches!(
            validate_options(&items),
            Err(OptionsError::EmptyLabel(2))
        ));
    }

    #[test]
    fn unknown_extension_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("people.yaml");
        fs::write(&path, "- label: Alice").unwrap();
        assert!(matches!(
            load_options(&path),
            Err(OptionsError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_options(Path::new("/nonexistent/people.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/people.json"));
    }

    #[test]
    fn malformed_json_reports_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.json");
        fs::write(&path, "not json {{{").unwrap();
        assert!(matches!(
            load_options(&path),
            Err(OptionsError::JsonError { .. })
        ));
    }
}
