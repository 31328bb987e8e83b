//! RGBA colors for entity styling.

use serde::{Deserialize, Serialize};

use crate::error::{DrawError, Result};

/// An RGBA color with components in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Opaque yellow, the default fill tint.
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);

    /// Opaque blue, the default point outline.
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

    /// Lawn green, the default shape outline.
    pub const LAWN_GREEN: Color = Color::rgb(0.486, 0.988, 0.0);

    /// Ghost white, the label text color.
    pub const GHOST_WHITE: Color = Color::rgb(0.973, 0.973, 1.0);

    /// Dark slate grey, the label background.
    pub const DARK_SLATE_GREY: Color = Color::rgb(0.184, 0.310, 0.310);

    /// Creates an opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a color with an explicit alpha.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Returns this color with the alpha replaced.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Checks that every component lies in `[0.0, 1.0]`.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("r", self.r), ("g", self.g), ("b", self.b), ("a", self.a)] {
            if !(0.0..=1.0).contains(&value) || value.is_nan() {
                return Err(DrawError::invalid_argument(
                    format!("color.{name}"),
                    format!("component {value} is outside [0.0, 1.0]"),
                ));
            }
        }
        Ok(())
    }
}
