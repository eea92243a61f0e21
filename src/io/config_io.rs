use std::fs;
use std::path::{Path, PathBuf};

use crate::model::PickerConfig;

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "chipselect.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Read and parse a config file.
pub fn read_config(path: &Path) -> Result<PickerConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// An explicit path must exist. Without one, `chipselect.toml` in `dir` is
/// used when present, and defaults otherwise.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<PickerConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    if candidate.is_file() {
        tracing::debug!(path = %candidate.display(), "using config from working directory");
        read_config(&candidate)
    } else {
        Ok(PickerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn empty_file_gives_defaults() {
        let config: PickerConfig = toml::from_str("").unwrap();
        assert_eq!(config, PickerConfig::default());
        assert_eq!(config.input.blur_delay_ms, 500);
        assert_eq!(config.ui.max_visible, 8);
        assert!(config.ui.show_values);
        assert_eq!(config.ui.title, "Select Multiple Values");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: PickerConfig = toml::from_str(
            r##"[input]
blur_delay_ms = 250
kitty_keyboard = false

[ui]
placeholder = "Search people"

[ui.colors]
highlight = "#00FF00"
"##,
        )
        .unwrap();
        assert_eq!(config.input.blur_delay_ms, 250);
        assert_eq!(config.input.kitty_keyboard, Some(false));
        assert_eq!(config.ui.placeholder, "Search people");
        assert_eq!(config.ui.max_visible, 8);
        assert_eq!(config.ui.colors.get("highlight").unwrap(), "#00FF00");
    }

    #[test]
    fn picks_up_file_in_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(DEFAULT_CONFIG_FILE),
            "[ui]\nmax_visible = 3\n",
        )
        .unwrap();
        let config = load_config(None, tmp.path()).unwrap();
        assert_eq!(config.ui.max_visible, 3);
    }

    #[test]
    fn no_file_in_dir_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, tmp.path()).unwrap();
        assert_eq!(config, PickerConfig::default());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(Some(&tmp.path().join("nope.toml")), tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "[input]\nblur_delay_ms = \"soon\"\n").unwrap();
        assert!(matches!(
            read_config(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }
}
