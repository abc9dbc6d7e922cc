use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::anim::color::{to_rgb, Rgb};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub base: Color,
    pub surface: Color,
    pub overlay: Color,
    pub text: Color,
    pub red: Color,
    pub green: Color,
    pub yellow: Color,
    pub blue: Color,
    pub magenta: Color,
    pub cyan: Color,
    /// Neon accent for borders and running lights.
    pub neon: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),
            surface: Color::Rgb(49, 50, 68),
            overlay: Color::Rgb(108, 112, 134),
            text: Color::Rgb(205, 214, 244),
            red: Color::Rgb(243, 139, 168),
            green: Color::Rgb(166, 227, 161),
            yellow: Color::Rgb(249, 226, 175),
            blue: Color::Rgb(137, 180, 250),
            magenta: Color::Rgb(203, 166, 247),
            cyan: Color::Rgb(148, 226, 213),
            neon: Color::Rgb(255, 0, 255),
        }
    }
}

impl Theme {
    /// `color` faded into the base colour by `alpha`. Named colours are
    /// shown as-is above half opacity and as the base below it.
    pub fn fade(&self, color: Color, alpha: f32) -> Color {
        let base = to_rgb(self.base, Rgb::BLACK);
        match color {
            Color::Rgb(r, g, b) => Rgb(r, g, b).with_alpha(alpha, base).into(),
            _ if alpha >= 0.5 => color,
            _ => self.base,
        }
    }

    /// `color` brightened toward white by `amount` in `[0, 1]`.
    pub fn glow(&self, color: Color, amount: f32) -> Color {
        match color {
            Color::Rgb(r, g, b) => {
                use crate::anim::Lerp;
                Rgb(r, g, b).lerp(Rgb(255, 255, 255), amount).into()
            }
            _ => color,
        }
    }
}
