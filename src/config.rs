use crate::palette::{Palette, Rgb};
use crate::scale::DEFAULT_MAX_WINDOW;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub viewer: ViewerConfig,
    #[serde(default)]
    pub palette: PaletteConfig,
    #[serde(default)]
    pub maps: MapsConfig,
}

#[derive(Debug, Deserialize)]
pub struct ViewerConfig {
    #[serde(default = "default_max_window_width")]
    pub max_window_width: usize,
    #[serde(default = "default_max_window_height")]
    pub max_window_height: usize,
    /// Fixed cell size in pixels; auto-scaled when absent
    #[serde(default)]
    pub cell_size: Option<usize>,
    #[serde(default = "default_custom_window_width")]
    pub custom_window_width: usize,
    #[serde(default = "default_custom_window_height")]
    pub custom_window_height: usize,
    /// Pixels per cell edge for saved images
    #[serde(default = "default_image_scale")]
    pub image_scale: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct PaletteConfig {
    /// Per-code overrides, keyed by the single-character cell code
    #[serde(default)]
    pub colors: BTreeMap<String, Rgb>,
    #[serde(default)]
    pub fallback: Option<Rgb>,
}

#[derive(Debug, Deserialize)]
pub struct MapsConfig {
    #[serde(default = "default_maps_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_extension")]
    pub extension: String,
}

// Default values
fn default_max_window_width() -> usize { DEFAULT_MAX_WINDOW.0 }
fn default_max_window_height() -> usize { DEFAULT_MAX_WINDOW.1 }
fn default_custom_window_width() -> usize { 1920 }
fn default_custom_window_height() -> usize { 1080 }
fn default_image_scale() -> usize { 1 }
fn default_maps_directory() -> PathBuf { PathBuf::from("Map") }
fn default_extension() -> String { "map".to_string() }

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            max_window_width: default_max_window_width(),
            max_window_height: default_max_window_height(),
            cell_size: None,
            custom_window_width: default_custom_window_width(),
            custom_window_height: default_custom_window_height(),
            image_scale: default_image_scale(),
        }
    }
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            directory: default_maps_directory(),
            extension: default_extension(),
        }
    }
}

impl ViewerConfig {
    pub fn max_window(&self) -> (usize, usize) {
        (self.max_window_width, self.max_window_height)
    }

    pub fn custom_window(&self) -> (usize, usize) {
        (self.custom_window_width, self.custom_window_height)
    }
}

impl PaletteConfig {
    /// Default palette with the configured overrides applied
    pub fn to_palette(&self) -> Palette {
        let mut palette = Palette::default();
        for (key, &color) in &self.colors {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(code), None) => palette = palette.with_color(code, color),
                _ => warn!(key = %key, "palette key must be a single character, ignored"),
            }
        }
        if let Some(fallback) = self.fallback {
            palette = palette.with_fallback(fallback);
        }
        palette
    }
}

impl MapsConfig {
    /// Append the map extension when missing and place the name in the maps directory
    pub fn resolve(&self, name: &str) -> PathBuf {
        let suffix = format!(".{}", self.extension);
        let file_name = if name.ends_with(&suffix) {
            name.to_string()
        } else {
            format!("{}{}", name, suffix)
        };
        self.directory.join(file_name)
    }
}

impl Config {
    /// Load configuration from file, or use defaults if file doesn't exist
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => {
                    info!(path = %path.display(), "loaded configuration");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), "failed to parse configuration: {}", e);
                    warn!("using default configuration");
                    Config::default()
                }
            },
            Err(_) => {
                info!(path = %path.display(), "no configuration file found, using defaults");
                Config::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
