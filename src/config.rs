//! Run configuration: `thumbsync.toml` loading plus CLI-facing defaults.
//!
//! Configuration is sparse — a config file only needs the values it wants to
//! override. Unknown keys are rejected to catch typos early. Size entries
//! inherit the run-level defaults (`mode`, `fixed_canvas`,
//! `background_transparent`) unless they set their own.
//!
//! ```toml
//! dir = "uploads/photos"
//! recursive = true
//! enable_rewrite = false
//! delete_non_actual_sizes = true
//! mode = "inset"              # default fit mode for sizes that omit one
//! background = "ffffff"       # canvas fill color (hex, no '#')
//! background_transparent = false
//! fixed_canvas = false
//!
//! [[sizes]]
//! width = 300
//! height = 200
//! suffix = "md"
//! fixed_canvas = true
//!
//! [[sizes]]
//! width = 1024                # height derived from source aspect ratio
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("size entry {0} has neither width nor height")]
    MissingDimensions(usize),
    #[error("duplicate size suffix \"{0}\" — derivative paths would collide")]
    DuplicateSuffix(String),
    #[error("no sizes configured")]
    NoSizes,
    #[error("invalid background color \"{0}\" — expected 6 hex digits")]
    BadBackground(String),
}

/// How resized content relates to the target box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Aspect-preserving fit within the box; result may be smaller on one axis.
    Inset,
    /// Resize-and-crop so the box is filled exactly, excess cropped from center.
    Outbound,
    /// No box semantics: stretch to exactly the configured dimensions.
    Exact,
}

impl Default for FitMode {
    fn default() -> Self {
        FitMode::Inset
    }
}

/// One size entry as written in config, before normalization.
///
/// `None` fields inherit the run-level default at normalization time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSize {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub suffix: Option<String>,
    pub mode: Option<FitMode>,
    pub fixed_canvas: Option<bool>,
    pub background_transparent: Option<bool>,
}

/// Full run configuration (config file merged with CLI flags).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Working directory holding originals and derivatives.
    pub dir: PathBuf,
    /// Walk the full subtree instead of only direct children.
    pub recursive: bool,
    /// Regenerate derivatives that already exist on disk.
    pub enable_rewrite: bool,
    /// Purge derivatives whose suffix is no longer configured before generating.
    pub delete_non_actual_sizes: bool,
    /// Default fit mode for sizes that omit one.
    pub mode: FitMode,
    /// Canvas fill color as six hex digits, no leading `#`.
    pub background: String,
    /// Default transparency flag for sizes that omit one.
    pub background_transparent: bool,
    /// Default fixed-canvas flag for sizes that omit one.
    pub fixed_canvas: bool,
    /// Configured target sizes. Required, non-empty.
    pub sizes: Vec<RawSize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            recursive: true,
            enable_rewrite: false,
            delete_non_actual_sizes: true,
            mode: FitMode::Inset,
            background: "ffffff".to_string(),
            background_transparent: false,
            fixed_canvas: false,
            sizes: Vec::new(),
        }
    }
}

impl RunConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: RunConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Parse the background color into an RGB triple.
    pub fn background_rgb(&self) -> Result<[u8; 3], ConfigError> {
        let hex = self.background.trim_start_matches('#');
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ConfigError::BadBackground(self.background.clone()));
        }
        let byte = |i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0xff);
        Ok([byte(0), byte(2), byte(4)])
    }
}

/// A documented stock config file, printed by `thumbsync gen-config`.
pub fn stock_config_toml() -> String {
    concat!(
        "# thumbsync configuration\n",
        "# All top-level options are optional — defaults shown below.\n",
        "\n",
        "# Working directory with the original images\n",
        "dir = \".\"\n",
        "\n",
        "# Walk subdirectories too\n",
        "recursive = true\n",
        "\n",
        "# Regenerate derivatives that already exist\n",
        "enable_rewrite = false\n",
        "\n",
        "# Delete derivatives whose suffix is no longer configured\n",
        "delete_non_actual_sizes = true\n",
        "\n",
        "# Default fit mode: \"inset\" (fit within box), \"outbound\"\n",
        "# (crop to fill), or \"exact\" (stretch)\n",
        "mode = \"inset\"\n",
        "\n",
        "# Canvas fill color (six hex digits) and transparency default\n",
        "background = \"ffffff\"\n",
        "background_transparent = false\n",
        "\n",
        "# Pad output to exactly width x height by default\n",
        "fixed_canvas = false\n",
        "\n",
        "# Target sizes. Each entry needs width and/or height; suffix\n",
        "# defaults to \"<width>x<height>\". Entries may override mode,\n",
        "# fixed_canvas and background_transparent.\n",
        "[[sizes]]\n",
        "width = 300\n",
        "height = 200\n",
        "suffix = \"md\"\n",
        "\n",
        "[[sizes]]\n",
        "width = 1024\n",
    )
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // TOML loading tests
    // =========================================================================

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("thumbsync.toml");
        fs::write(&path, content).unwrap();
        (tmp, path)
    }

    #[test]
    fn load_minimal_config() {
        let (_tmp, path) = write_config(
            r#"
            dir = "photos"
            [[sizes]]
            width = 300
            height = 200
            "#,
        );
        let config = RunConfig::load(&path).unwrap();
        assert_eq!(config.dir, PathBuf::from("photos"));
        assert_eq!(config.sizes.len(), 1);
        assert_eq!(config.sizes[0].width, Some(300));
        // defaults fill the rest
        assert!(config.recursive);
        assert!(!config.enable_rewrite);
        assert!(config.delete_non_actual_sizes);
        assert_eq!(config.mode, FitMode::Inset);
    }

    #[test]
    fn load_full_size_entry() {
        let (_tmp, path) = write_config(
            r#"
            mode = "outbound"
            [[sizes]]
            width = 300
            suffix = "md"
            mode = "inset"
            fixed_canvas = true
            background_transparent = true
            "#,
        );
        let config = RunConfig::load(&path).unwrap();
        assert_eq!(config.mode, FitMode::Outbound);
        let size = &config.sizes[0];
        assert_eq!(size.suffix.as_deref(), Some("md"));
        assert_eq!(size.mode, Some(FitMode::Inset));
        assert_eq!(size.fixed_canvas, Some(true));
        assert_eq!(size.background_transparent, Some(true));
    }

    #[test]
    fn unknown_keys_rejected() {
        let (_tmp, path) = write_config("rewrite = true");
        assert!(matches!(
            RunConfig::load(&path),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = RunConfig::load(Path::new("/nonexistent/thumbsync.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn stock_config_parses() {
        let config: RunConfig = toml::from_str(&stock_config_toml()).unwrap();
        assert_eq!(config.sizes.len(), 2);
        assert_eq!(config.sizes[0].suffix.as_deref(), Some("md"));
    }

    // =========================================================================
    // background color tests
    // =========================================================================

    #[test]
    fn background_rgb_parses_hex() {
        let config = RunConfig {
            background: "336699".to_string(),
            ..RunConfig::default()
        };
        assert_eq!(config.background_rgb().unwrap(), [0x33, 0x66, 0x99]);
    }

    #[test]
    fn background_rgb_default_is_white() {
        assert_eq!(RunConfig::default().background_rgb().unwrap(), [255; 3]);
    }

    #[test]
    fn background_rgb_rejects_bad_input() {
        for bad in ["fff", "gggggg", "1234567"] {
            let config = RunConfig {
                background: bad.to_string(),
                ..RunConfig::default()
            };
            assert!(matches!(
                config.background_rgb(),
                Err(ConfigError::BadBackground(_))
            ));
        }
    }
}
