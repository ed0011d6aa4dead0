use std::fs;
use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::history::{DEFAULT_MAX_HISTORY, DEFAULT_MAX_HISTORY_BYTES};
use crate::surface::DrawingSurface;
use crate::tool::ToolSettings;

/// Environment variable naming a JSON config file
pub const CONFIG_ENV_VAR: &str = "EDURIA_WHITEBOARD_CONFIG";

/// Errors that can occur while loading the whiteboard configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Startup settings for the whiteboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhiteboardConfig {
    /// Canvas background, also the color the eraser paints
    pub background: [u8; 3],
    /// Number of snapshots kept for undo
    pub max_history: usize,
    /// Memory budget for undo snapshots, in bytes
    pub max_history_bytes: usize,
    /// Tool settings used until the user picks others
    pub tool: ToolSettings,
    /// Directory exports are written to; the working directory if unset
    pub export_dir: Option<PathBuf>,
    pub export_file_name: String,
}

impl Default for WhiteboardConfig {
    fn default() -> Self {
        Self {
            background: [255, 255, 255],
            max_history: DEFAULT_MAX_HISTORY,
            max_history_bytes: DEFAULT_MAX_HISTORY_BYTES,
            tool: ToolSettings::default(),
            export_dir: None,
            export_file_name: "whiteboard.png".to_owned(),
        }
    }
}

impl WhiteboardConfig {
    /// Load a configuration file; missing fields keep their defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by `EDURIA_WHITEBOARD_CONFIG`, or defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                let path = PathBuf::from(path);
                log::info!("Loading whiteboard config from {}", path.display());
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_history == 0 {
            return Err(ConfigError::Invalid(
                "max_history must be at least 1".to_owned(),
            ));
        }
        if self.export_file_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "export_file_name must not be empty".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn background_color(&self) -> Color32 {
        let [r, g, b] = self.background;
        Color32::from_rgb(r, g, b)
    }

    pub fn export_path(&self) -> PathBuf {
        match &self.export_dir {
            Some(dir) => dir.join(&self.export_file_name),
            None => PathBuf::from(&self.export_file_name),
        }
    }

    /// Build an uninitialized surface with these settings
    pub fn build_surface(&self) -> DrawingSurface {
        let mut surface = DrawingSurface::new(self.background_color(), self.max_history)
            .with_history_budget(self.max_history_bytes);
        surface.set_settings(self.tool);
        surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::{StrokeWidth, ToolKind};

    #[test]
    fn test_missing_fields_default() {
        let config = WhiteboardConfig::from_json(r#"{"max_history": 8}"#).unwrap();
        assert_eq!(config.max_history, 8);
        assert_eq!(config.background, [255, 255, 255]);
        assert_eq!(config.export_file_name, "whiteboard.png");
        assert_eq!(config.max_history_bytes, DEFAULT_MAX_HISTORY_BYTES);
    }

    #[test]
    fn test_tool_section_parses() {
        let config = WhiteboardConfig::from_json(
            r#"{"tool": {"tool": "eraser", "color": [10, 20, 30], "width": "thick"}}"#,
        )
        .unwrap();
        assert_eq!(config.tool.tool, ToolKind::Eraser);
        assert_eq!(config.tool.color, [10, 20, 30]);
        assert_eq!(config.tool.width, StrokeWidth::Thick);
    }

    #[test]
    fn test_zero_history_rejected() {
        let result = WhiteboardConfig::from_json(r#"{"max_history": 0}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let result = WhiteboardConfig::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = WhiteboardConfig::load(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("whiteboard.json");
        fs::write(&path, r#"{"background": [0, 0, 0], "export_dir": "/tmp/boards"}"#).unwrap();

        let config = WhiteboardConfig::load(&path).unwrap();
        assert_eq!(config.background_color(), Color32::BLACK);
        assert_eq!(config.export_path(), PathBuf::from("/tmp/boards/whiteboard.png"));
    }

    #[test]
    fn test_build_surface_applies_settings() {
        let config = WhiteboardConfig {
            tool: ToolSettings::default().with_tool(ToolKind::Eraser),
            ..WhiteboardConfig::default()
        };
        let surface = config.build_surface();
        assert_eq!(surface.settings().tool, ToolKind::Eraser);
        assert_eq!(surface.background(), Color32::WHITE);
    }

    #[test]
    fn test_build_surface_applies_history_budget() {
        let config = WhiteboardConfig::from_json(r#"{"max_history_bytes": 1}"#).unwrap();
        let mut surface = config.build_surface();
        surface.initialize(10, 10).unwrap();
        surface.clear().unwrap();
        surface.clear().unwrap();
        assert_eq!(surface.history_len(), 1);
    }
}
