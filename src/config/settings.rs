//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// CaptureConfig
// ---------------------------------------------------------------------------

/// Settings for the region-selection gesture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Name of the key that must be held to arm a selection (e.g. `"Quote"`).
    ///
    /// Parsed with [`crate::input::parse_key`] at startup.
    pub trigger_key: String,
    /// Minimum drag area in square pixels; smaller drags are discarded
    /// without starting a pipeline run.
    pub min_drag_area: i64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            trigger_key: "Quote".into(),
            min_drag_area: 4,
        }
    }
}

// ---------------------------------------------------------------------------
// OcrConfig
// ---------------------------------------------------------------------------

/// Settings for the tesseract OCR engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Tesseract language code (e.g. `"eng"`, `"jpn"`, `"eng+deu"`).
    pub language: String,
    /// Tesseract page-segmentation mode — `None` uses the engine default.
    pub psm: Option<i32>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".into(),
            psm: None,
        }
    }
}

// ---------------------------------------------------------------------------
// TranslateConfig
// ---------------------------------------------------------------------------

/// Settings for the translation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Target language as an ISO-639-1 code (e.g. `"tr"`, `"de"`).
    pub target_lang: String,
    /// Base URL of the translation endpoint.
    pub base_url: String,
    /// Maximum seconds to wait for a translation response.
    pub timeout_secs: u64,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            target_lang: "tr".into(),
            base_url: "https://translate.googleapis.com".into(),
            timeout_secs: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// OverlayConfig
// ---------------------------------------------------------------------------

/// Overlay window appearance and text-layout bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Maximum characters per wrapped display line.
    pub max_width_chars: usize,
    /// Maximum number of lines shown at once; longer results scroll.
    pub max_visible_lines: usize,
    /// Window background opacity (0.0 – 1.0).
    pub opacity: f32,
    /// Keep the overlay floating above all other windows.
    pub always_on_top: bool,
    /// Last saved overlay position `(x, y)` in screen pixels.  `None` means
    /// let the OS / window manager pick a position on first launch.
    pub window_position: Option<(f32, f32)>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            max_width_chars: 80,
            max_visible_lines: 3,
            opacity: 0.85,
            always_on_top: true,
            window_position: None,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use screen_translate::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Region-selection gesture settings.
    pub capture: CaptureConfig,
    /// OCR engine settings.
    pub ocr: OcrConfig,
    /// Translation backend settings.
    pub translate: TranslateConfig,
    /// Overlay window / text-layout settings.
    pub overlay: OverlayConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Save then load must preserve every field.
    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let mut original = AppConfig::default();
        original.capture.trigger_key = "F8".into();
        original.capture.min_drag_area = 25;
        original.ocr.language = "jpn".into();
        original.ocr.psm = Some(6);
        original.translate.target_lang = "de".into();
        original.translate.timeout_secs = 30;
        original.overlay.max_width_chars = 60;
        original.overlay.max_visible_lines = 5;
        original.overlay.window_position = Some((10.0, 20.0));

        original.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.capture.trigger_key, loaded.capture.trigger_key);
        assert_eq!(original.capture.min_drag_area, loaded.capture.min_drag_area);
        assert_eq!(original.ocr.language, loaded.ocr.language);
        assert_eq!(original.ocr.psm, loaded.ocr.psm);
        assert_eq!(original.translate.target_lang, loaded.translate.target_lang);
        assert_eq!(original.translate.base_url, loaded.translate.base_url);
        assert_eq!(
            original.translate.timeout_secs,
            loaded.translate.timeout_secs
        );
        assert_eq!(
            original.overlay.max_width_chars,
            loaded.overlay.max_width_chars
        );
        assert_eq!(
            original.overlay.max_visible_lines,
            loaded.overlay.max_visible_lines
        );
        assert_eq!(
            original.overlay.window_position,
            loaded.overlay.window_position
        );
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.capture.trigger_key, default.capture.trigger_key);
        assert_eq!(config.ocr.language, default.ocr.language);
        assert_eq!(config.translate.target_lang, default.translate.target_lang);
        assert_eq!(
            config.overlay.max_visible_lines,
            default.overlay.max_visible_lines
        );
    }

    /// Guard the documented defaults.
    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.capture.trigger_key, "Quote");
        assert_eq!(cfg.capture.min_drag_area, 4);
        assert_eq!(cfg.ocr.language, "eng");
        assert!(cfg.ocr.psm.is_none());
        assert_eq!(cfg.translate.target_lang, "tr");
        assert_eq!(cfg.translate.base_url, "https://translate.googleapis.com");
        assert_eq!(cfg.translate.timeout_secs, 10);
        assert_eq!(cfg.overlay.max_visible_lines, 3);
        assert!(cfg.overlay.always_on_top);
    }
}
