//! Configuration file handling for flurry.
//!
//! Settings live in `config.toml` under the platform config directory. Every
//! field is optional; missing fields fall back to the defaults below.
//! [`Config::validate`] turns a parsed file into [`SnowSettings`], rejecting
//! anything the simulation cannot run with.

mod error;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use flurry_core::{GradientDirection, GradientSpec, LandedStyle, ReleaseOrder, SnowSettings};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

pub use error::ConfigError;

/// File name looked up inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Raw settings as written in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Colors for falling snow, as `rrggbb` hex.
    pub snow_colors: Vec<String>,
    /// Symbols for snowflakes, one character each.
    pub snow_symbols: Vec<String>,
    /// Base fall speed in cells per frame.
    pub movement_speed: f64,
    pub final_gradient_stops: Vec<String>,
    pub final_gradient_steps: usize,
    pub final_gradient_direction: GradientDirection,
    pub landed_style: LandedStyle,
    /// Row colors for the striped landed style.
    pub landed_stripes: Vec<String>,
    pub release_order: ReleaseOrder,
    /// Frames per second.
    pub frame_rate: u32,
    /// Keep the final frame on screen until a key is pressed.
    pub hold_final_frame: bool,
}

impl Default for Config {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| (*s).to_string()).collect();
        Self {
            snow_colors: strings(&["ffffff", "e0ffff", "b0e0e6"]),
            snow_symbols: strings(&["*", ".", "o", "+"]),
            movement_speed: 0.1,
            final_gradient_stops: strings(&["ff0000", "00ff00", "ffd700"]),
            final_gradient_steps: 12,
            final_gradient_direction: GradientDirection::Horizontal,
            landed_style: LandedStyle::Stripes,
            landed_stripes: strings(&["ffffff", "33cc33", "ff6666"]),
            release_order: ReleaseOrder::Random,
            frame_rate: 60,
            hold_final_frame: true,
        }
    }
}

impl Config {
    /// Default config file location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "flurry").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// An explicit path must exist. A missing file at the default location
    /// yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::read(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::read(&path),
                _ => {
                    log::debug!("no config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded config from {}", path.display());
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the default config to `path`, creating parent directories.
    pub fn write_default(path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, Self::default().to_toml()?).map_err(io_err)
    }

    /// Time between frames.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }

    /// Check every field and build the settings the simulation runs with.
    pub fn validate(&self) -> Result<SnowSettings, ConfigError> {
        if !(self.movement_speed.is_finite() && self.movement_speed > 0.0) {
            return Err(ConfigError::InvalidSpeed(self.movement_speed));
        }
        if self.final_gradient_steps == 0 {
            return Err(ConfigError::ZeroGradientSteps);
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }

        Ok(SnowSettings {
            snow_colors: parse_colors("snow_colors", &self.snow_colors)?,
            snow_symbols: parse_symbols("snow_symbols", &self.snow_symbols)?,
            movement_speed: self.movement_speed,
            gradient: GradientSpec {
                stops: parse_colors("final_gradient_stops", &self.final_gradient_stops)?,
                steps: self.final_gradient_steps,
                direction: self.final_gradient_direction,
            },
            landed_style: self.landed_style,
            landed_stripes: parse_colors("landed_stripes", &self.landed_stripes)?,
            release_order: self.release_order,
        })
    }
}

/// Parse `rrggbb` or `#rrggbb` into an RGB color.
pub fn parse_hex_color(text: &str) -> Result<Color, ConfigError> {
    let hex = text.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidColor(text.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|_| ConfigError::InvalidColor(text.to_string()))
    };
    Ok(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn parse_colors(field: &'static str, values: &[String]) -> Result<Vec<Color>, ConfigError> {
    if values.is_empty() {
        return Err(ConfigError::EmptyList(field));
    }
    values.iter().map(|v| parse_hex_color(v)).collect()
}

fn parse_symbols(field: &'static str, values: &[String]) -> Result<Vec<char>, ConfigError> {
    if values.is_empty() {
        return Err(ConfigError::EmptyList(field));
    }
    values
        .iter()
        .map(|v| {
            let mut chars = v.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(ConfigError::InvalidSymbol(v.clone())),
            }
        })
        .collect()
}
