//! Entity descriptors: the attribute bundles a renderer consumes.

use std::fmt;
use std::rc::Rc;

use globekit_core::color::Color;
use globekit_core::geo::{GeoRectangle, SurfacePoint};
use globekit_core::shape::ShapeKind;

use crate::options::{DrawOptions, Metadata};

/// A geometry value that is either fixed or recomputed on every read.
///
/// Gestures install live sources over their transient state so the
/// renderer tracks the cursor, then freeze them to the final static value
/// at completion.
pub enum GeometrySource<T> {
    Static(T),
    Live(Rc<dyn Fn() -> T>),
}

impl<T: Clone> GeometrySource<T> {
    /// Wraps a closure as a live source.
    pub fn live(f: impl Fn() -> T + 'static) -> Self {
        Self::Live(Rc::new(f))
    }

    /// Evaluates the current geometry value.
    pub fn resolve(&self) -> T {
        match self {
            Self::Static(value) => value.clone(),
            Self::Live(f) => f(),
        }
    }

    /// Replaces a live source with its current value. No-op when already
    /// static.
    pub fn freeze(&mut self) {
        if let Self::Live(f) = self {
            *self = Self::Static(f());
        }
    }

    /// Reports whether the source is recomputed on every read.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }
}

impl<T: Clone> Clone for GeometrySource<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(value) => Self::Static(value.clone()),
            Self::Live(f) => Self::Live(f.clone()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for GeometrySource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Self::Live(_) => f.write_str("Live(..)"),
        }
    }
}

/// How geometry is positioned relative to the terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeightReference {
    #[default]
    None,
    ClampToGround,
}

/// Path interpolation for polylines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArcType {
    #[default]
    Geodesic,
    /// Constant-heading segments; rectangle outlines use these so the
    /// edges follow the parallels.
    Rhumb,
}

/// Point marker graphics.
#[derive(Debug, Clone)]
pub struct PointGraphics {
    pub pixel_size: f64,
    pub color: Color,
    pub outline_color: Color,
    pub outline_width: f64,
    pub height_reference: HeightReference,
}

/// Label graphics. Drawn entities carry an empty-text placeholder the
/// caller can fill in later.
#[derive(Debug, Clone)]
pub struct LabelGraphics {
    pub text: String,
    pub font: String,
    pub fill_color: Color,
    pub show_background: bool,
    pub background_color: Color,
    /// Horizontal and vertical padding around the text, pixels.
    pub background_padding: (f64, f64),
    /// Screen-space offset from the anchor position, pixels.
    pub pixel_offset: (f64, f64),
    pub height_reference: HeightReference,
}

/// Rectangle fill graphics.
#[derive(Debug, Clone)]
pub struct RectangleGraphics {
    pub coordinates: GeometrySource<GeoRectangle>,
    pub fill: bool,
    pub material: Color,
    pub height_reference: HeightReference,
}

/// Polygon fill graphics.
#[derive(Debug, Clone)]
pub struct PolygonGraphics {
    pub hierarchy: GeometrySource<Vec<SurfacePoint>>,
    pub fill: bool,
    pub material: Color,
    pub height_reference: HeightReference,
}

/// Polyline graphics, used for shape outlines and the polygon preview
/// line.
#[derive(Debug, Clone)]
pub struct PolylineGraphics {
    pub positions: GeometrySource<Vec<SurfacePoint>>,
    pub width: f64,
    pub material: Color,
    pub arc_type: ArcType,
}

/// The properties stamped on every drawn entity.
#[derive(Debug, Clone)]
pub struct EntityProperties {
    pub kind: ShapeKind,
    pub layer: String,
    /// The options the entity was created with; `set_color` without
    /// options falls back to these.
    pub options: DrawOptions,
    pub user_properties: Metadata,
}

/// The full attribute bundle for one renderable entity.
///
/// Transient previews only populate the graphics they need (a bare
/// polyline, no label, no properties).
#[derive(Debug, Clone, Default)]
pub struct EntityDescriptor {
    pub position: Option<SurfacePoint>,
    pub point: Option<PointGraphics>,
    pub rectangle: Option<RectangleGraphics>,
    pub polygon: Option<PolygonGraphics>,
    pub polyline: Option<PolylineGraphics>,
    pub label: Option<LabelGraphics>,
    pub properties: Option<EntityProperties>,
}

impl EntityDescriptor {
    /// Replaces every live geometry source with its current value.
    pub fn freeze_geometry(&mut self) {
        if let Some(rectangle) = &mut self.rectangle {
            rectangle.coordinates.freeze();
        }
        if let Some(polygon) = &mut self.polygon {
            polygon.hierarchy.freeze();
        }
        if let Some(polyline) = &mut self.polyline {
            polyline.positions.freeze();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_live_source_resolves_current_value() {
        let value = Rc::new(Cell::new(1u32));
        let v = value.clone();
        let source = GeometrySource::live(move || v.get());

        assert!(source.is_live());
        assert_eq!(source.resolve(), 1);
        value.set(5);
        assert_eq!(source.resolve(), 5);
    }

    #[test]
    fn test_freeze_pins_value() {
        let value = Rc::new(Cell::new(3u32));
        let v = value.clone();
        let mut source = GeometrySource::live(move || v.get());

        source.freeze();
        value.set(9);
        assert!(!source.is_live());
        assert_eq!(source.resolve(), 3);
    }
}
