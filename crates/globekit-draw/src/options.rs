//! Styling and metadata options for drawn entities.

use globekit_core::color::Color;
use globekit_core::error::{DrawError, Result};
use serde::{Deserialize, Serialize};

/// Layer entities land in when no layer is given.
pub const DEFAULT_LAYER: &str = "default";

/// Loosely-typed user metadata stamped onto entities.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Options accepted by `draw`, `add_entity`, and `set_color`.
///
/// Every field is optional; the fixed defaults are a translucent yellow
/// fill, a lawn-green outline (blue for point outlines), no fill, and the
/// `"default"` layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrawOptions {
    /// Layer name the entity is stamped with.
    pub layer: Option<String>,
    /// Whether the shape interior is filled.
    pub fill: bool,
    /// Fill color (point color for points). Only honored as a fill
    /// material when `fill` is set.
    pub color: Option<Color>,
    /// Outline color.
    pub outline_color: Option<Color>,
    /// User metadata carried on the entity.
    pub properties: Option<Metadata>,
}

impl DrawOptions {
    /// Validates every provided field. Runs before any gesture state is
    /// touched so a bad call leaves the machine unchanged.
    pub fn validate(&self) -> Result<()> {
        if let Some(layer) = &self.layer {
            if layer.is_empty() {
                return Err(DrawError::invalid_argument("layer", "must not be empty"));
            }
        }
        if let Some(color) = &self.color {
            color.validate()?;
        }
        if let Some(outline_color) = &self.outline_color {
            outline_color.validate()?;
        }
        Ok(())
    }

    /// The layer this entity belongs to, defaulted.
    pub fn effective_layer(&self) -> &str {
        self.layer.as_deref().unwrap_or(DEFAULT_LAYER)
    }
}
