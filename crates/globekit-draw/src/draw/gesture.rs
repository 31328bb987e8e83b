//! Transient per-gesture state.

use std::cell::RefCell;
use std::rc::Rc;

use globekit_core::geo::SurfacePoint;
use globekit_core::shape::ShapeKind;

use crate::entity::EntityId;
use crate::options::DrawOptions;
use crate::scene::{PointerEventKind, PointerHandler, PointerHandlerSet, Scene};

/// Which preview entity the polygon capture currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum PreviewShape {
    #[default]
    None,
    /// Two-point line from the single committed vertex to the cursor.
    Line,
    /// Live polygon over (vertices..., cursor).
    Polygon,
}

/// The dragged corners of a rectangle capture. Shared with the live
/// geometry closures so the renderer tracks the cursor.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RectangleCorners {
    pub anchor: SurfacePoint,
    pub current: SurfacePoint,
}

/// The committed vertices and cursor of a polygon capture.
#[derive(Debug, Clone, Default)]
pub(crate) struct PolygonRing {
    pub vertices: Vec<SurfacePoint>,
    pub cursor: Option<SurfacePoint>,
}

impl PolygonRing {
    /// Committed vertices followed by the cursor point.
    pub fn hierarchy(&self) -> Vec<SurfacePoint> {
        let mut points = self.vertices.clone();
        if let Some(cursor) = self.cursor {
            points.push(cursor);
        }
        points
    }

    /// The hierarchy closed back to the first committed vertex.
    pub fn outline(&self) -> Vec<SurfacePoint> {
        let mut points = self.hierarchy();
        if let Some(first) = self.vertices.first() {
            points.push(*first);
        }
        points
    }
}

/// Closes a vertex list into a ring by appending the first point.
pub(crate) fn closed_ring(points: &[SurfacePoint]) -> Vec<SurfacePoint> {
    let mut ring = points.to_vec();
    if let Some(first) = points.first() {
        ring.push(*first);
    }
    ring
}

/// Everything a gesture accumulates between start and completion.
///
/// One instance lives behind `Rc<RefCell<…>>` for the lifetime of the
/// tool; `reset` returns it to idle and releases every borrowed scene
/// resource (handler group, displaced double-click handler, rotation
/// flag), which also breaks the reference cycle through the handler
/// closures.
#[derive(Default)]
pub(crate) struct GestureState {
    /// Kind of the gesture being captured; `None` when idle.
    pub active: Option<ShapeKind>,
    /// Options the active gesture was started with.
    pub options: DrawOptions,
    /// Handler group owning the gesture's pointer subscriptions.
    pub handlers: Option<Rc<dyn PointerHandlerSet>>,
    /// The entity under construction (rectangle live entity, polygon
    /// preview).
    pub entity: Option<EntityId>,
    /// Rectangle drag corners.
    pub corners: Option<Rc<RefCell<RectangleCorners>>>,
    /// Polygon vertices and cursor.
    pub ring: Option<Rc<RefCell<PolygonRing>>>,
    /// Current polygon preview representation.
    pub preview: PreviewShape,
    /// The scene's double-click handler displaced by a polygon capture.
    pub displaced_double_click: Option<PointerHandler>,
    /// Rotation flag value to restore when the rectangle drag ends.
    pub rotation_restore: Option<bool>,
}

impl GestureState {
    /// Returns to idle, restoring every displaced scene resource. Safe to
    /// call from any state, including from inside a gesture handler.
    pub fn reset(&mut self, scene: &dyn Scene) {
        self.active = None;
        self.options = DrawOptions::default();
        self.handlers = None;
        self.entity = None;
        self.corners = None;
        self.ring = None;
        self.preview = PreviewShape::None;
        if let Some(handler) = self.displaced_double_click.take() {
            scene.set_default_handler(PointerEventKind::DoubleClick, handler);
        }
        if let Some(enabled) = self.rotation_restore.take() {
            scene.set_rotation_enabled(enabled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use globekit_core::geo::Geographic;

    #[test]
    fn test_ring_hierarchy_and_outline() {
        let a = Geographic::new(0.0, 0.0).to_surface();
        let b = Geographic::new(1.0, 0.0).to_surface();
        let cursor = Geographic::new(1.0, 1.0).to_surface();

        let ring = PolygonRing {
            vertices: vec![a, b],
            cursor: Some(cursor),
        };
        assert_eq!(ring.hierarchy(), vec![a, b, cursor]);
        assert_eq!(ring.outline(), vec![a, b, cursor, a]);

        let empty = PolygonRing::default();
        assert!(empty.hierarchy().is_empty());
        assert!(empty.outline().is_empty());
    }

    #[test]
    fn test_closed_ring() {
        let a = Geographic::new(0.0, 0.0).to_surface();
        let b = Geographic::new(1.0, 0.0).to_surface();
        let c = Geographic::new(1.0, 1.0).to_surface();
        assert_eq!(closed_ring(&[a, b, c]), vec![a, b, c, a]);
        assert!(closed_ring(&[]).is_empty());
    }
}
