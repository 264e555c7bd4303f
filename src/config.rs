use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "PENGUIN_EXPLORER_CONFIG";

/// Window and plot presentation settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub window_title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    pub plot_title: String,
    pub plot_width: f32,
    pub plot_height: f32,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            window_title: "Penguin Explorer".to_string(),
            window_size: [900.0, 760.0],
            min_window_size: [600.0, 400.0],
            plot_title: "Penguins Dataset".to_string(),
            plot_width: 800.0,
            plot_height: 600.0,
        }
    }
}

impl ExplorerConfig {
    /// Read from `$PENGUIN_EXPLORER_CONFIG` if set, else use defaults.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    fn parse(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        log::info!("Using config {config:?}");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = ExplorerConfig::parse(r#"{ "plot_title": "Palmer" }"#).unwrap();
        assert_eq!(config.plot_title, "Palmer");
        assert_eq!(config.window_title, ExplorerConfig::default().window_title);
        assert_eq!(config.plot_width, 800.0);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(ExplorerConfig::parse("{ plot_title: ").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = ExplorerConfig::load(Path::new("/nonexistent/explorer.json")).unwrap_err();
        assert!(format!("{err:#}").contains("reading config file"));
    }
}
