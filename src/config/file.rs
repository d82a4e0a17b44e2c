//! Style file loading.
//!
//! The style lives in `$XDG_CONFIG_HOME/wavebar/style.toml` unless a path is
//! given explicitly. A missing default file is not an error; a missing
//! explicit file is.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::style::StyleConfig;

/// Default location of the style file, if a config directory exists.
pub fn default_style_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("wavebar").join("style.toml"))
}

/// Read and parse a style file.
pub fn read_style(path: &Path) -> Result<StyleConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    StyleConfig::from_toml_str(&content)
}

/// Load the style from `explicit`, else the default location, else defaults.
pub fn load_style(explicit: Option<&Path>) -> Result<StyleConfig, ConfigError> {
    if let Some(path) = explicit {
        tracing::debug!("Loading style from {}", path.display());
        return read_style(path);
    }

    match default_style_path() {
        Some(path) if path.exists() => {
            tracing::debug!("Loading style from {}", path.display());
            read_style(&path)
        }
        _ => {
            tracing::debug!("No style file found, using defaults");
            Ok(StyleConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("wavebar-{}-{name}", std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn explicit_file_is_parsed() {
        let path = scratch_file("style.toml", "height = 32\ntick_color = \"#fff\"\n");
        let config = load_style(Some(&path)).unwrap();
        assert_eq!(config.height, 32);
        assert_eq!(config.tick_color, "#fff");
        fs::remove_file(path).ok();
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("wavebar-definitely-missing.toml");
        assert!(matches!(
            load_style(Some(&path)),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn non_table_document_is_rejected() {
        let path = scratch_file("broken.toml", "just some words");
        assert!(matches!(read_style(&path), Err(ConfigError::Parse(_))));
        fs::remove_file(path).ok();
    }
}
