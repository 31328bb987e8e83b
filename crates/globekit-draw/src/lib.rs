//! # GlobeKit Draw
//!
//! Interactive shape drawing on a 3-D globe: a gesture state machine
//! consuming scene pointer events, an entity factory, and an in-memory
//! entity store. The scene itself is injected through the narrow
//! capability traits in [`scene`]; no renderer is bundled.

pub mod draw;
pub mod entity;
pub mod options;
pub mod scene;

pub use draw::{DrawEvent, DrawTool, DRAW_ENTITY, LEFT_CLICK_ENTITY};

pub use entity::{
    EntityDescriptor, EntityFactory, EntityId, EntityProperties, EntityStore, GeometrySource,
    ShapeGeometry,
};

pub use options::{DrawOptions, Metadata, DEFAULT_LAYER};

pub use scene::{
    CameraControl, PointerEventKind, PointerEvents, PointerHandler, PointerHandlerSet,
    PointerInput, Scene, ScreenPosition, SurfacePicker,
};
