//! Application Configuration
//!
//! User settings and preferences stored in TOML format.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::extract::FailureMode;

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// OCR settings
    pub ocr: OcrSettings,
    /// Extraction output settings
    pub output: OutputSettings,
    /// Viewer settings
    pub viewer: ViewerSettings,
}

/// OCR-related settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrSettings {
    /// Path to the tesseract executable
    pub tesseract_path: PathBuf,
    /// Language model to use
    pub language: String,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            tesseract_path: PathBuf::from("tesseract"),
            language: "eng".to_string(),
        }
    }
}

/// Extraction output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Output folder; `None` falls back to [`default_output_folder`]
    pub folder: Option<PathBuf>,
    /// What a batch extraction does when one pair fails
    pub failure_mode: FailureMode,
    /// Offer to open the generated spreadsheet after OCR completes
    pub prompt_open_spreadsheet: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            folder: None,
            failure_mode: FailureMode::default(),
            prompt_open_spreadsheet: true,
        }
    }
}

/// Viewer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerSettings {
    /// Zoom percentage applied at startup
    pub default_zoom: u32,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self { default_zoom: 100 }
    }
}

/// Default extraction output folder: a `regionsnap` directory on the
/// desktop, or under the home directory when there is no desktop folder.
pub fn default_output_folder() -> PathBuf {
    let base = directories::UserDirs::new()
        .map(|dirs| {
            dirs.desktop_dir()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| dirs.home_dir().to_path_buf())
        })
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("regionsnap")
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "regionsnap", "RegionSnap")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    let config_dir = proj_dirs.config_dir().to_path_buf();
    std::fs::create_dir_all(&config_dir)?;

    Ok(config_dir)
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_app_config() {
        let config = AppConfig::default();

        assert_eq!(config.ocr.tesseract_path, PathBuf::from("tesseract"));
        assert_eq!(config.ocr.language, "eng");

        assert!(config.output.folder.is_none());
        assert_eq!(config.output.failure_mode, FailureMode::Abort);
        assert!(config.output.prompt_open_spreadsheet);

        assert_eq!(config.viewer.default_zoom, 100);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = AppConfig::default();

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.ocr.language, config.ocr.language);
        assert_eq!(parsed.output.failure_mode, config.output.failure_mode);
        assert_eq!(parsed.viewer.default_zoom, config.viewer.default_zoom);
    }

    #[test]
    fn test_config_with_custom_values() {
        let mut config = AppConfig::default();
        config.ocr.tesseract_path = PathBuf::from("/opt/tesseract/bin/tesseract");
        config.output.folder = Some(PathBuf::from("/tmp/snips"));
        config.output.failure_mode = FailureMode::Continue;
        config.viewer.default_zoom = 150;

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(
            parsed.ocr.tesseract_path,
            PathBuf::from("/opt/tesseract/bin/tesseract")
        );
        assert_eq!(parsed.output.folder, Some(PathBuf::from("/tmp/snips")));
        assert_eq!(parsed.output.failure_mode, FailureMode::Continue);
        assert_eq!(parsed.viewer.default_zoom, 150);
    }

    #[test]
    fn test_save_and_load_config() {
        let config = AppConfig::default();

        let temp_file = NamedTempFile::new().unwrap();
        save_config(&config, temp_file.path()).unwrap();
        let loaded = load_config(temp_file.path()).unwrap();

        assert_eq!(loaded.ocr.language, config.ocr.language);
        assert_eq!(loaded.viewer.default_zoom, config.viewer.default_zoom);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "this is not valid toml {{{{").unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
    }
}
