//! Validated effect settings.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Direction the final gradient is laid across the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientDirection {
    #[default]
    Horizontal,
    Vertical,
    Diagonal,
    Radial,
}

/// How landed text characters are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LandedStyle {
    /// Rows cycle through the stripe palette.
    #[default]
    Stripes,
    /// The final gradient is mapped over the text.
    Gradient,
}

/// Order in which pending text snow is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReleaseOrder {
    /// Uniformly from everything still pending.
    #[default]
    Random,
    /// Uniformly from the lowest row still pending.
    BottomUp,
}

/// Parameters of the post-completion color wash.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientSpec {
    pub stops: Vec<Color>,
    pub steps: usize,
    pub direction: GradientDirection,
}

/// Settings the simulation runs with.
///
/// Built by the config layer after validation, so every list is non-empty
/// and the speed is positive.
#[derive(Debug, Clone, PartialEq)]
pub struct SnowSettings {
    /// Colors for falling snow.
    pub snow_colors: Vec<Color>,
    /// Symbols for snowflakes.
    pub snow_symbols: Vec<char>,
    /// Base movement speed in cells per tick.
    pub movement_speed: f64,
    /// Final gradient.
    pub gradient: GradientSpec,
    pub landed_style: LandedStyle,
    /// Row palette used by [`LandedStyle::Stripes`].
    pub landed_stripes: Vec<Color>,
    pub release_order: ReleaseOrder,
}

impl Default for SnowSettings {
    fn default() -> Self {
        Self {
            snow_colors: vec![
                Color::Rgb(0xff, 0xff, 0xff),
                Color::Rgb(0xe0, 0xff, 0xff),
                Color::Rgb(0xb0, 0xe0, 0xe6),
            ],
            snow_symbols: vec!['*', '.', 'o', '+'],
            movement_speed: 0.1,
            gradient: GradientSpec {
                stops: vec![
                    Color::Rgb(0xff, 0x00, 0x00),
                    Color::Rgb(0x00, 0xff, 0x00),
                    Color::Rgb(0xff, 0xd7, 0x00),
                ],
                steps: 12,
                direction: GradientDirection::Horizontal,
            },
            landed_style: LandedStyle::Stripes,
            landed_stripes: vec![
                Color::Rgb(0xff, 0xff, 0xff),
                Color::Rgb(0x33, 0xcc, 0x33),
                Color::Rgb(0xff, 0x66, 0x66),
            ],
            release_order: ReleaseOrder::Random,
        }
    }
}
