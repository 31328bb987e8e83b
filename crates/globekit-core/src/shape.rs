//! Shape kinds the drawing subsystem can author.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DrawError;

/// The kind of shape a drawing gesture produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// A single anchored point with a label placeholder.
    Point,
    /// An axis-aligned rectangle dragged between two corners.
    Rectangle,
    /// A polygon built up one click at a time.
    Polygon,
}

impl ShapeKind {
    /// All drawable kinds, in declaration order.
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Point, ShapeKind::Rectangle, ShapeKind::Polygon];

    /// The canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Point => "point",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Polygon => "polygon",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "point" => Ok(ShapeKind::Point),
            "rectangle" => Ok(ShapeKind::Rectangle),
            "polygon" => Ok(ShapeKind::Polygon),
            other => Err(DrawError::invalid_argument(
                "kind",
                format!("unknown shape kind '{other}', expected point, rectangle or polygon"),
            )),
        }
    }
}
