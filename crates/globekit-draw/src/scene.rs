//! Scene capability traits.
//!
//! The drawing subsystem never talks to a renderer directly. It receives one
//! [`Scene`] collaborator at construction and uses only the narrow
//! capabilities defined here: pointer-event subscription, surface/entity
//! picking, and the camera rotation toggle. Rendering, ray casting, and
//! terrain belong to the implementor.

use std::rc::Rc;

use globekit_core::geo::SurfacePoint;

use crate::entity::EntityId;

/// A 2-D pointer position in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPosition {
    pub x: f64,
    pub y: f64,
}

impl ScreenPosition {
    /// Creates a screen position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The pointer gestures the drawing protocols consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Press,
    Move,
    Release,
    Click,
    DoubleClick,
}

/// A single pointer event delivered to a handler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub kind: PointerEventKind,
    pub position: ScreenPosition,
}

/// A pointer-event callback. Single-threaded, like the rest of the
/// subsystem.
pub type PointerHandler = Box<dyn FnMut(PointerInput)>;

/// An independent group of pointer handlers.
///
/// Each gesture owns one group so tearing the gesture down detaches all of
/// its handlers at once without touching anyone else's. Dropping the last
/// `Rc` to a group detaches it; the scene must therefore not keep a strong
/// reference. A handler may be detached from inside its own invocation.
pub trait PointerHandlerSet {
    /// Installs (or replaces) the handler for an event kind.
    fn on(&self, kind: PointerEventKind, handler: PointerHandler);

    /// Removes the handler for an event kind. No-op when absent.
    fn off(&self, kind: PointerEventKind);
}

/// Pointer-event subscription capability.
pub trait PointerEvents {
    /// Creates a new, empty handler group attached to the scene.
    fn attach(&self) -> Rc<dyn PointerHandlerSet>;

    /// Removes and returns the scene's own default handler for an event
    /// kind, if one is installed. The polygon protocol displaces the
    /// default double-click handler for the duration of its capture.
    fn take_default_handler(&self, kind: PointerEventKind) -> Option<PointerHandler>;

    /// Reinstalls a default handler previously taken with
    /// [`PointerEvents::take_default_handler`].
    fn set_default_handler(&self, kind: PointerEventKind, handler: PointerHandler);
}

/// Picking capability.
pub trait SurfacePicker {
    /// Casts a ray through the screen position onto the globe. A miss
    /// (sky, horizon) is `None`, never an error.
    fn pick_surface(&self, position: ScreenPosition) -> Option<SurfacePoint>;

    /// Returns every entity under the cursor, topmost first.
    fn pick_entities(&self, position: ScreenPosition) -> Vec<EntityId>;
}

/// Camera rotation toggle, disabled while dragging a rectangle.
pub trait CameraControl {
    fn set_rotation_enabled(&self, enabled: bool);
    fn rotation_enabled(&self) -> bool;
}

/// The full scene collaborator the drawing tool is constructed with.
pub trait Scene: PointerEvents + SurfacePicker + CameraControl {}

impl<T: PointerEvents + SurfacePicker + CameraControl> Scene for T {}
