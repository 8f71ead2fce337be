use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_FONT_SIZE, DEFAULT_TEXTURE_HEIGHT, DEFAULT_TEXTURE_WIDTH};

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub font: FontSettings,
}

/// Font system options. Unset values fall back to the built-in defaults.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct FontSettings {
    /// Path to a TTF/OTF file; the embedded font is used when unset.
    pub path: Option<PathBuf>,
    pub size: Option<u32>,
    pub texture_width: Option<u32>,
    pub texture_height: Option<u32>,
    pub blur: Option<u32>,
    pub spacing: Option<f32>,
    pub use_kernings: Option<bool>,
    pub default_character: Option<char>,
}

impl FontSettings {
    pub fn size(&self) -> u32 {
        self.size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    pub fn texture_width(&self) -> u32 {
        self.texture_width.unwrap_or(DEFAULT_TEXTURE_WIDTH)
    }

    pub fn texture_height(&self) -> u32 {
        self.texture_height.unwrap_or(DEFAULT_TEXTURE_HEIGHT)
    }

    pub fn blur(&self) -> u32 {
        self.blur.unwrap_or(0)
    }

    pub fn spacing(&self) -> f32 {
        self.spacing.unwrap_or(0.0)
    }

    pub fn use_kernings(&self) -> bool {
        self.use_kernings.unwrap_or(true)
    }
}

impl Config {
    pub fn load() -> Self {
        match config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Config::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Config::default();
        }

        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Failed to read config file: {}", e);
                return Config::default();
            }
        };

        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to parse config file: {}", e);
                Config::default()
            }
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    if let Some(config_dir) = std::env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(config_dir).join("dynfont").join("config.toml"))
    } else {
        dirs::config_dir().map(|dir| dir.join("dynfont").join("config.toml"))
    }
}
