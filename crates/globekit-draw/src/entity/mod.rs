//! Entity descriptors, the factory that builds them, and the store that
//! owns them.

pub mod descriptor;
pub mod factory;
pub mod store;

pub use descriptor::{
    ArcType, EntityDescriptor, EntityProperties, GeometrySource, HeightReference, LabelGraphics,
    PointGraphics, PolygonGraphics, PolylineGraphics, RectangleGraphics,
};
pub use factory::{EntityFactory, ShapeGeometry};
pub use store::{EntityId, EntityStore};
