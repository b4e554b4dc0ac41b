//! Color helpers for landed text.

use flurry_core::{Bounds, Coord, GradientDirection, GradientSpec, LandedStyle, SnowSettings};
use ratatui::style::Color;

/// Blend two colors. Non-RGB colors snap to the nearer end.
pub fn lerp_color(a: Color, b: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (a, b) {
        (Color::Rgb(ar, ag, ab), Color::Rgb(br, bg, bb)) => {
            let mix = |x: u8, y: u8| {
                (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8
            };
            Color::Rgb(mix(ar, br), mix(ag, bg), mix(ab, bb))
        }
        _ if t < 0.5 => a,
        _ => b,
    }
}

/// A precomputed color ramp through a list of stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    spectrum: Vec<Color>,
    direction: GradientDirection,
}

impl Gradient {
    /// Build a ramp with `steps` colors between each pair of stops.
    pub fn new(spec: &GradientSpec) -> Self {
        let steps = spec.steps.max(1);
        let mut spectrum = Vec::with_capacity(spec.stops.len() * steps);

        for pair in spec.stops.windows(2) {
            for i in 0..steps {
                spectrum.push(lerp_color(pair[0], pair[1], i as f64 / steps as f64));
            }
        }
        if let Some(last) = spec.stops.last() {
            spectrum.push(*last);
        }
        if spectrum.is_empty() {
            spectrum.push(Color::Reset);
        }

        Self {
            spectrum,
            direction: spec.direction,
        }
    }

    pub fn spectrum(&self) -> &[Color] {
        &self.spectrum
    }

    /// Color at `fraction` along the ramp.
    pub fn at(&self, fraction: f64) -> Color {
        let last = self.spectrum.len() - 1;
        let index = (fraction.clamp(0.0, 1.0) * last as f64).round() as usize;
        self.spectrum[index.min(last)]
    }

    /// Color for `coord` with the ramp laid across `area`.
    pub fn color_for(&self, coord: Coord, area: &Bounds) -> Color {
        let span = |offset: i32, extent: i32| {
            if extent <= 1 {
                0.0
            } else {
                f64::from(offset) / f64::from(extent - 1)
            }
        };
        let x = span(coord.column - area.left, area.width());
        let y = span(coord.row - area.top, area.height());

        let fraction = match self.direction {
            GradientDirection::Horizontal => x,
            GradientDirection::Vertical => y,
            GradientDirection::Diagonal => (x + y) / 2.0,
            GradientDirection::Radial => {
                let (dx, dy) = (x - 0.5, y - 0.5);
                (dx * dx + dy * dy).sqrt() / std::f64::consts::FRAC_1_SQRT_2
            }
        };
        self.at(fraction)
    }
}

/// Picks the color a text character takes once its snow lands.
///
/// Both styles are laid out relative to the text's own `area`, so a line of
/// text keeps its color wherever the text ends up on the canvas.
#[derive(Debug, Clone)]
pub enum LandedPalette {
    /// One color per text line, cycling from the first line down.
    Stripes { colors: Vec<Color>, area: Bounds },
    Gradient { gradient: Gradient, area: Bounds },
}

impl LandedPalette {
    /// Palette for text occupying `area`.
    pub fn new(settings: &SnowSettings, area: Bounds) -> Self {
        match settings.landed_style {
            LandedStyle::Stripes => Self::Stripes {
                colors: settings.landed_stripes.clone(),
                area,
            },
            LandedStyle::Gradient => Self::Gradient {
                gradient: Gradient::new(&settings.gradient),
                area,
            },
        }
    }

    pub fn color_for(&self, coord: Coord) -> Color {
        match self {
            Self::Stripes { colors, .. } if colors.is_empty() => Color::Reset,
            Self::Stripes { colors, area } => {
                let line = coord.row - area.top;
                colors[line.rem_euclid(colors.len() as i32) as usize]
            }
            Self::Gradient { gradient, area } => gradient.color_for(coord, area),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(direction: GradientDirection) -> GradientSpec {
        GradientSpec {
            stops: vec![Color::Rgb(0, 0, 0), Color::Rgb(200, 100, 0)],
            steps: 4,
            direction,
        }
    }

    #[test]
    fn test_lerp_color() {
        let a = Color::Rgb(0, 0, 0);
        let b = Color::Rgb(100, 200, 50);
        assert_eq!(lerp_color(a, b, 0.0), a);
        assert_eq!(lerp_color(a, b, 1.0), b);
        assert_eq!(lerp_color(a, b, 0.5), Color::Rgb(50, 100, 25));
        assert_eq!(lerp_color(Color::Red, b, 0.2), Color::Red);
        assert_eq!(lerp_color(Color::Red, b, 0.8), b);
    }

    #[test]
    fn test_spectrum_length_and_ends() {
        let gradient = Gradient::new(&spec(GradientDirection::Horizontal));
        assert_eq!(gradient.spectrum().len(), 5);
        assert_eq!(gradient.at(0.0), Color::Rgb(0, 0, 0));
        assert_eq!(gradient.at(1.0), Color::Rgb(200, 100, 0));
        assert_eq!(gradient.at(0.5), Color::Rgb(100, 50, 0));
    }

    #[test]
    fn test_single_stop() {
        let gradient = Gradient::new(&GradientSpec {
            stops: vec![Color::Rgb(1, 2, 3)],
            steps: 12,
            direction: GradientDirection::Vertical,
        });
        assert_eq!(gradient.spectrum(), &[Color::Rgb(1, 2, 3)]);
        assert_eq!(gradient.at(0.7), Color::Rgb(1, 2, 3));
    }

    #[test]
    fn test_directions() {
        let area = Bounds::new(10, 14, 0, 8);
        let h = Gradient::new(&spec(GradientDirection::Horizontal));
        assert_eq!(h.color_for(Coord::new(0, 14), &area), Color::Rgb(0, 0, 0));
        assert_eq!(h.color_for(Coord::new(8, 10), &area), Color::Rgb(200, 100, 0));

        let v = Gradient::new(&spec(GradientDirection::Vertical));
        assert_eq!(v.color_for(Coord::new(8, 10), &area), Color::Rgb(0, 0, 0));
        assert_eq!(v.color_for(Coord::new(0, 14), &area), Color::Rgb(200, 100, 0));

        let r = Gradient::new(&spec(GradientDirection::Radial));
        assert_eq!(r.color_for(Coord::new(4, 12), &area), Color::Rgb(0, 0, 0));
        assert_eq!(r.color_for(Coord::new(0, 10), &area), Color::Rgb(200, 100, 0));
    }

    #[test]
    fn test_stripes_cycle_by_row() {
        let settings = SnowSettings::default();
        let palette = LandedPalette::new(&settings, Bounds::new(0, 5, 0, 5));
        assert_eq!(palette.color_for(Coord::new(0, 0)), Color::Rgb(0xff, 0xff, 0xff));
        assert_eq!(palette.color_for(Coord::new(3, 1)), Color::Rgb(0x33, 0xcc, 0x33));
        assert_eq!(palette.color_for(Coord::new(1, 2)), Color::Rgb(0xff, 0x66, 0x66));
        assert_eq!(palette.color_for(Coord::new(1, 3)), Color::Rgb(0xff, 0xff, 0xff));
    }

    #[test]
    fn test_stripes_count_from_first_text_line() {
        let settings = SnowSettings::default();
        let near_top = LandedPalette::new(&settings, Bounds::new(1, 2, 0, 5));
        let further_down = LandedPalette::new(&settings, Bounds::new(6, 7, 3, 8));
        for line in 0..2 {
            assert_eq!(
                near_top.color_for(Coord::new(0, 1 + line)),
                further_down.color_for(Coord::new(3, 6 + line)),
            );
        }
        assert_eq!(further_down.color_for(Coord::new(3, 6)), Color::Rgb(0xff, 0xff, 0xff));
        assert_eq!(further_down.color_for(Coord::new(3, 7)), Color::Rgb(0x33, 0xcc, 0x33));
    }

    #[test]
    fn test_gradient_palette() {
        let settings = SnowSettings {
            landed_style: LandedStyle::Gradient,
            gradient: spec(GradientDirection::Horizontal),
            ..SnowSettings::default()
        };
        let palette = LandedPalette::new(&settings, Bounds::new(0, 0, 0, 4));
        assert_eq!(palette.color_for(Coord::new(0, 0)), Color::Rgb(0, 0, 0));
        assert_eq!(palette.color_for(Coord::new(4, 0)), Color::Rgb(200, 100, 0));
    }
}
