use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use super::tween::Lerp;

/// Plain 8-bit RGB colour that can be tweened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Blend towards `background` by `1 - alpha`. Terminals have no real
    /// opacity, so a fading surface is drawn as its colours sinking into
    /// the background.
    pub fn with_alpha(self, alpha: f32, background: Rgb) -> Rgb {
        background.lerp(self, alpha)
    }
}

impl Lerp for Rgb {
    fn lerp(self, to: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(mix(self.0, to.0), mix(self.1, to.1), mix(self.2, to.2))
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(c.0, c.1, c.2)
    }
}

/// Best-effort conversion back from a ratatui colour. Named colours have no
/// fixed RGB value, so they fall back to `fallback`.
pub fn to_rgb(color: Color, fallback: Rgb) -> Rgb {
    match color {
        Color::Rgb(r, g, b) => Rgb(r, g, b),
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(Rgb::BLUE.lerp(Rgb::RED, 0.0), Rgb::BLUE);
        assert_eq!(Rgb::BLUE.lerp(Rgb::RED, 1.0), Rgb::RED);
        assert_eq!(Rgb::BLUE.lerp(Rgb::RED, 0.5), Rgb(128, 0, 128));
    }

    #[test]
    fn test_alpha_blends_into_background() {
        let c = Rgb(200, 100, 50);
        assert_eq!(c.with_alpha(0.0, Rgb::BLACK), Rgb::BLACK);
        assert_eq!(c.with_alpha(1.0, Rgb::BLACK), c);
    }

    #[test]
    fn test_named_colour_falls_back() {
        assert_eq!(to_rgb(Color::Reset, Rgb(1, 2, 3)), Rgb(1, 2, 3));
        assert_eq!(to_rgb(Color::Rgb(9, 8, 7), Rgb::BLACK), Rgb(9, 8, 7));
    }
}
