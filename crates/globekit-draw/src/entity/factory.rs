//! Builds entity descriptors from shape geometry and options.

use globekit_core::color::Color;
use globekit_core::geo::{GeoRectangle, SurfacePoint};
use globekit_core::shape::ShapeKind;

use crate::entity::descriptor::{
    ArcType, EntityDescriptor, EntityProperties, GeometrySource, HeightReference, LabelGraphics,
    PointGraphics, PolygonGraphics, PolylineGraphics, RectangleGraphics,
};
use crate::options::DrawOptions;

/// Geometry for one shape, tagged by kind so the factory dispatches once.
#[derive(Debug, Clone)]
pub enum ShapeGeometry {
    Point {
        position: SurfacePoint,
    },
    Rectangle {
        bounds: GeometrySource<GeoRectangle>,
        outline: GeometrySource<Vec<SurfacePoint>>,
    },
    Polygon {
        hierarchy: GeometrySource<Vec<SurfacePoint>>,
        outline: GeometrySource<Vec<SurfacePoint>>,
    },
}

impl ShapeGeometry {
    /// The shape kind this geometry belongs to.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Point { .. } => ShapeKind::Point,
            Self::Rectangle { .. } => ShapeKind::Rectangle,
            Self::Polygon { .. } => ShapeKind::Polygon,
        }
    }
}

/// Stateless builder of entity attribute bundles.
pub struct EntityFactory;

impl EntityFactory {
    /// Builds the full descriptor for a shape: graphics, label
    /// placeholder, and stamped properties.
    pub fn build(geometry: ShapeGeometry, options: &DrawOptions) -> EntityDescriptor {
        let kind = geometry.kind();
        let mut descriptor = EntityDescriptor {
            properties: Some(Self::stamp(kind, options)),
            ..Default::default()
        };

        match geometry {
            ShapeGeometry::Point { position } => {
                descriptor.position = Some(position);
                descriptor.point = Some(PointGraphics {
                    pixel_size: 9.0,
                    color: Self::point_color(options),
                    outline_color: Self::point_outline_color(options),
                    outline_width: 1.0,
                    height_reference: HeightReference::ClampToGround,
                });
                // Offset above the marker so the text clears it.
                descriptor.label = Some(Self::label((0.0, -16.0)));
            }
            ShapeGeometry::Rectangle { bounds, outline } => {
                descriptor.rectangle = Some(RectangleGraphics {
                    coordinates: bounds,
                    fill: options.fill,
                    material: Self::fill_material(options),
                    height_reference: HeightReference::ClampToGround,
                });
                descriptor.polyline = Some(PolylineGraphics {
                    positions: outline,
                    width: 2.0,
                    material: Self::outline_material(options),
                    arc_type: ArcType::Rhumb,
                });
                descriptor.label = Some(Self::label((0.0, 0.0)));
            }
            ShapeGeometry::Polygon { hierarchy, outline } => {
                descriptor.polygon = Some(PolygonGraphics {
                    hierarchy,
                    fill: options.fill,
                    material: Self::fill_material(options),
                    height_reference: HeightReference::ClampToGround,
                });
                descriptor.polyline = Some(PolylineGraphics {
                    positions: outline,
                    width: 2.0,
                    material: Self::outline_material(options),
                    arc_type: ArcType::Geodesic,
                });
                descriptor.label = Some(Self::label((0.0, 0.0)));
            }
        }

        descriptor
    }

    /// Builds the bare polyline preview shown mid-polygon. Transient: no
    /// label, no properties.
    pub fn preview_line(
        positions: GeometrySource<Vec<SurfacePoint>>,
        options: &DrawOptions,
    ) -> EntityDescriptor {
        EntityDescriptor {
            polyline: Some(PolylineGraphics {
                positions,
                width: 2.0,
                material: Self::outline_material(options),
                arc_type: ArcType::Geodesic,
            }),
            ..Default::default()
        }
    }

    /// Fill material: the explicit color only when filling, otherwise the
    /// translucent yellow default.
    pub fn fill_material(options: &DrawOptions) -> Color {
        match (options.fill, options.color) {
            (true, Some(color)) => color,
            _ => Color::YELLOW.with_alpha(0.2),
        }
    }

    /// Outline material, lawn green by default.
    pub fn outline_material(options: &DrawOptions) -> Color {
        options.outline_color.unwrap_or(Color::LAWN_GREEN)
    }

    /// Point marker color, yellow by default.
    pub fn point_color(options: &DrawOptions) -> Color {
        options.color.unwrap_or(Color::YELLOW)
    }

    /// Point marker outline, blue by default.
    pub fn point_outline_color(options: &DrawOptions) -> Color {
        options.outline_color.unwrap_or(Color::BLUE)
    }

    fn label(pixel_offset: (f64, f64)) -> LabelGraphics {
        LabelGraphics {
            text: String::new(),
            font: "11pt sans-serif".to_string(),
            fill_color: Color::GHOST_WHITE,
            show_background: true,
            background_color: Color::DARK_SLATE_GREY.with_alpha(0.8),
            background_padding: (4.0, 2.0),
            pixel_offset,
            height_reference: HeightReference::ClampToGround,
        }
    }

    fn stamp(kind: ShapeKind, options: &DrawOptions) -> EntityProperties {
        EntityProperties {
            kind,
            layer: options.effective_layer().to_string(),
            options: options.clone(),
            user_properties: options.properties.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use globekit_core::geo::Geographic;

    fn point_at_origin() -> ShapeGeometry {
        ShapeGeometry::Point {
            position: Geographic::new(0.0, 0.0).to_surface(),
        }
    }

    #[test]
    fn test_point_defaults() {
        let descriptor = EntityFactory::build(point_at_origin(), &DrawOptions::default());

        let point = descriptor.point.expect("point graphics");
        assert_eq!(point.pixel_size, 9.0);
        assert_eq!(point.color, Color::YELLOW);
        assert_eq!(point.outline_color, Color::BLUE);
        assert_eq!(point.height_reference, HeightReference::ClampToGround);

        let label = descriptor.label.expect("label placeholder");
        assert!(label.text.is_empty());
        assert_eq!(label.pixel_offset, (0.0, -16.0));

        let properties = descriptor.properties.expect("property stamp");
        assert_eq!(properties.kind, ShapeKind::Point);
        assert_eq!(properties.layer, "default");
    }

    #[test]
    fn test_fill_material_requires_fill_and_color() {
        let translucent = Color::YELLOW.with_alpha(0.2);

        assert_eq!(
            EntityFactory::fill_material(&DrawOptions::default()),
            translucent
        );
        // A color without fill stays on the default material.
        assert_eq!(
            EntityFactory::fill_material(&DrawOptions {
                color: Some(Color::BLUE),
                ..Default::default()
            }),
            translucent
        );
        assert_eq!(
            EntityFactory::fill_material(&DrawOptions {
                fill: true,
                color: Some(Color::BLUE),
                ..Default::default()
            }),
            Color::BLUE
        );
        assert_eq!(
            EntityFactory::fill_material(&DrawOptions {
                fill: true,
                ..Default::default()
            }),
            translucent
        );
    }

    #[test]
    fn test_rectangle_outline_is_rhumb() {
        let a = Geographic::new(10.0, 10.0);
        let b = Geographic::new(12.0, 11.0);
        let geometry = ShapeGeometry::Rectangle {
            bounds: GeometrySource::Static(globekit_core::geo::GeoRectangle::from_corners(a, b)),
            outline: GeometrySource::Static(
                globekit_core::geo::rectangle_outline_ring_geographic(a, b),
            ),
        };

        let descriptor = EntityFactory::build(geometry, &DrawOptions::default());
        let polyline = descriptor.polyline.expect("outline polyline");
        assert_eq!(polyline.arc_type, ArcType::Rhumb);
        assert_eq!(polyline.width, 2.0);
        assert_eq!(polyline.material, Color::LAWN_GREEN);
    }

    #[test]
    fn test_preview_line_is_bare() {
        let descriptor =
            EntityFactory::preview_line(GeometrySource::Static(vec![]), &DrawOptions::default());
        assert!(descriptor.polyline.is_some());
        assert!(descriptor.label.is_none());
        assert!(descriptor.properties.is_none());
        assert!(descriptor.position.is_none());
    }

    #[test]
    fn test_user_properties_stamped() {
        let mut metadata = crate::options::Metadata::new();
        metadata.insert("name".to_string(), serde_json::json!("base"));
        let options = DrawOptions {
            layer: Some("poi".to_string()),
            properties: Some(metadata),
            ..Default::default()
        };

        let descriptor = EntityFactory::build(point_at_origin(), &options);
        let properties = descriptor.properties.expect("property stamp");
        assert_eq!(properties.layer, "poi");
        assert_eq!(
            properties.user_properties.get("name"),
            Some(&serde_json::json!("base"))
        );
    }
}
