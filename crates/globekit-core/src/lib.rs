//! # GlobeKit Core
//!
//! Core types for the GlobeKit drawing subsystem.
//! Provides the shared vocabulary used by the interactive drawing tool:
//! errors, the event registry, geographic math, colors, and shape kinds.

pub mod color;
pub mod error;
pub mod events;
pub mod geo;
pub mod shape;

pub use color::Color;

pub use error::{DrawError, Result};

pub use events::{EventError, EventRegistry};

pub use geo::{
    bounding_sphere_center, rectangle_center, rectangle_outline_ring,
    rectangle_outline_ring_geographic, GeoRectangle, Geographic, SurfacePoint,
};

pub use shape::ShapeKind;
