//! The drawing state machine.
//!
//! [`DrawTool`] owns the entity store, the event registry, and one
//! transient [`GestureState`](gesture::GestureState). `draw` starts a
//! shape-specific capture protocol over the scene's pointer events;
//! completion is reported asynchronously through the [`DRAW_ENTITY`]
//! event. At most one gesture is active at a time.

use std::cell::RefCell;
use std::rc::Rc;

use globekit_core::error::{DrawError, Result};
use globekit_core::events::EventRegistry;
use globekit_core::geo::{
    bounding_sphere_center, rectangle_center, rectangle_outline_ring_geographic, GeoRectangle,
    Geographic,
};
use globekit_core::shape::ShapeKind;

use crate::entity::{EntityFactory, EntityId, EntityStore, GeometrySource, ShapeGeometry};
use crate::options::{DrawOptions, Metadata, DEFAULT_LAYER};
use crate::scene::{PointerEventKind, PointerHandlerSet, Scene};

mod gesture;
mod point;
mod polygon;
mod rectangle;

use gesture::{closed_ring, GestureState};

/// Event name fired once per completed gesture.
pub const DRAW_ENTITY: &str = "DRAW_ENTITY";

/// Event name fired when a click lands on entities outside a gesture.
pub const LEFT_CLICK_ENTITY: &str = "LEFT_CLICK_ENTITY";

/// Payloads published through the tool's event registry.
#[derive(Debug, Clone)]
pub enum DrawEvent {
    /// A gesture completed; published on [`DRAW_ENTITY`]. The coordinate
    /// list holds 1 point for a point, the 2 dragged corners for a
    /// rectangle, and the ≥3 ring vertices for a polygon.
    EntityDrawn {
        entity: EntityId,
        kind: ShapeKind,
        coordinates: Vec<Geographic>,
    },
    /// Entities under a primary click; published on [`LEFT_CLICK_ENTITY`].
    EntitiesPicked { entities: Vec<EntityId> },
}

/// Shared context the gesture handlers capture.
#[derive(Clone)]
pub(crate) struct GestureCtx {
    pub scene: Rc<dyn Scene>,
    pub entities: Rc<EntityStore>,
    pub events: Rc<EventRegistry<DrawEvent>>,
    pub gesture: Rc<RefCell<GestureState>>,
}

/// Resets the gesture state, then publishes the completion event.
///
/// Reset comes first so a subscriber can start the next gesture from
/// inside its callback.
pub(crate) fn finish(ctx: &GestureCtx, entity: EntityId, kind: ShapeKind, coordinates: Vec<Geographic>) {
    ctx.gesture.borrow_mut().reset(ctx.scene.as_ref());
    tracing::debug!(kind = %kind, entity = %entity, "gesture completed");
    ctx.events.publish(
        DRAW_ENTITY,
        &DrawEvent::EntityDrawn {
            entity,
            kind,
            coordinates,
        },
    );
}

/// Interactive drawing tool over a scene.
pub struct DrawTool {
    scene: Rc<dyn Scene>,
    entities: Rc<EntityStore>,
    events: Rc<EventRegistry<DrawEvent>>,
    gesture: Rc<RefCell<GestureState>>,
    /// Keeps the always-active click-to-pick handler group attached.
    _pick_handlers: Rc<dyn PointerHandlerSet>,
}

impl DrawTool {
    /// Creates a tool over the given scene and installs the click-to-pick
    /// reporter.
    pub fn new(scene: Rc<dyn Scene>) -> Self {
        let entities = Rc::new(EntityStore::new());
        let events = Rc::new(EventRegistry::new([DRAW_ENTITY, LEFT_CLICK_ENTITY]));
        let gesture = Rc::new(RefCell::new(GestureState::default()));

        // Click-to-pick: active for the lifetime of the tool, but dormant
        // while a gesture owns the click and when nobody subscribed (the
        // pick query is skipped entirely then).
        let pick_handlers = scene.attach();
        let pick_scene = scene.clone();
        let pick_events = events.clone();
        let pick_gesture = gesture.clone();
        pick_handlers.on(
            PointerEventKind::Click,
            Box::new(move |input| {
                if pick_gesture.borrow().active.is_some() {
                    return;
                }
                if !pick_events.has_subscriber(LEFT_CLICK_ENTITY) {
                    return;
                }
                let entities = pick_scene.pick_entities(input.position);
                pick_events.publish(LEFT_CLICK_ENTITY, &DrawEvent::EntitiesPicked { entities });
            }),
        );

        Self {
            scene,
            entities,
            events,
            gesture,
            _pick_handlers: pick_handlers,
        }
    }

    /// Starts capturing a shape. Completion arrives on [`DRAW_ENTITY`].
    ///
    /// Fails with [`DrawError::GestureInProgress`] while another gesture
    /// is active, and with [`DrawError::InvalidArgument`] on bad options;
    /// both leave existing state untouched.
    pub fn draw(&self, kind: ShapeKind, options: DrawOptions) -> Result<()> {
        options.validate()?;
        {
            let mut state = self.gesture.borrow_mut();
            if let Some(active) = state.active {
                return Err(DrawError::GestureInProgress {
                    kind: active.to_string(),
                });
            }
            state.active = Some(kind);
            state.options = options;
        }
        tracing::debug!(kind = %kind, "gesture started");

        let ctx = self.ctx();
        match kind {
            ShapeKind::Point => point::begin(&ctx),
            ShapeKind::Rectangle => rectangle::begin(&ctx),
            ShapeKind::Polygon => polygon::begin(&ctx),
        }
        Ok(())
    }

    /// Aborts the active gesture, removing the partial entity and
    /// restoring every displaced scene resource. No-op when idle.
    pub fn cancel(&self) {
        let mut state = self.gesture.borrow_mut();
        if state.active.is_none() {
            return;
        }
        if let Some(id) = state.entity.take() {
            self.entities.remove(id);
        }
        state.reset(self.scene.as_ref());
        tracing::debug!("gesture cancelled");
    }

    /// Reports whether a gesture is currently being captured.
    pub fn is_drawing(&self) -> bool {
        self.gesture.borrow().active.is_some()
    }

    /// Adds a finished entity directly from geographic coordinates, e.g.
    /// when restoring saved shapes. The coordinate count must match the
    /// kind: 1 point, 2 rectangle corners, ≥3 polygon vertices.
    pub fn add_entity(
        &self,
        coordinates: &[Geographic],
        kind: ShapeKind,
        options: DrawOptions,
    ) -> Result<EntityId> {
        options.validate()?;
        let count = coordinates.len();
        let descriptor = match kind {
            ShapeKind::Point => {
                if count != 1 {
                    return Err(DrawError::invalid_argument(
                        "coordinates",
                        format!("a point requires exactly 1 coordinate, got {count}"),
                    ));
                }
                EntityFactory::build(
                    ShapeGeometry::Point {
                        position: coordinates[0].to_surface(),
                    },
                    &options,
                )
            }
            ShapeKind::Rectangle => {
                if count != 2 {
                    return Err(DrawError::invalid_argument(
                        "coordinates",
                        format!("a rectangle requires exactly 2 corners, got {count}"),
                    ));
                }
                let (a, b) = (coordinates[0], coordinates[1]);
                let mut descriptor = EntityFactory::build(
                    ShapeGeometry::Rectangle {
                        bounds: GeometrySource::Static(GeoRectangle::from_corners(a, b)),
                        outline: GeometrySource::Static(rectangle_outline_ring_geographic(a, b)),
                    },
                    &options,
                );
                descriptor.position = Some(rectangle_center(a, b));
                descriptor
            }
            ShapeKind::Polygon => {
                if count < 3 {
                    return Err(DrawError::invalid_argument(
                        "coordinates",
                        format!("a polygon requires at least 3 vertices, got {count}"),
                    ));
                }
                let vertices: Vec<_> = coordinates.iter().map(Geographic::to_surface).collect();
                let mut descriptor = EntityFactory::build(
                    ShapeGeometry::Polygon {
                        hierarchy: GeometrySource::Static(vertices.clone()),
                        outline: GeometrySource::Static(closed_ring(&vertices)),
                    },
                    &options,
                );
                descriptor.position = Some(bounding_sphere_center(&vertices));
                descriptor
            }
        };
        Ok(self.entities.add(descriptor))
    }

    /// Removes the given entities. Unknown ids and an empty list are
    /// no-ops.
    pub fn remove_entities(&self, ids: &[EntityId]) {
        for id in ids {
            self.entities.remove(*id);
        }
        if !ids.is_empty() {
            tracing::debug!(count = ids.len(), "entities removed");
        }
    }

    /// Removes every entity stamped with the given layer. An empty layer
    /// name means the default layer. Idempotent.
    pub fn remove_entities_by_layer(&self, layer: &str) {
        let layer = if layer.is_empty() { DEFAULT_LAYER } else { layer };
        let ids = self.entities.ids_in_layer(layer);
        for id in &ids {
            self.entities.remove(*id);
        }
        tracing::debug!(layer, count = ids.len(), "layer cleared");
    }

    /// Restyles an entity, recomputing its materials with the same rules
    /// construction uses. Omitted options fall back to the ones the
    /// entity was created with.
    pub fn set_color(&self, entity: EntityId, options: Option<DrawOptions>) -> Result<()> {
        if let Some(options) = &options {
            options.validate()?;
        }
        let stored = self
            .entities
            .with_entity(entity, |d| d.properties.clone())
            .ok_or_else(|| {
                DrawError::invalid_argument("entity", format!("no entity with id {entity}"))
            })?
            .ok_or_else(|| {
                DrawError::invalid_argument("entity", "entity carries no drawable properties")
            })?;

        let merged = options.unwrap_or_else(|| stored.options.clone());
        self.entities.with_entity_mut(entity, |descriptor| {
            match stored.kind {
                ShapeKind::Point => {
                    if let Some(point) = &mut descriptor.point {
                        point.color = EntityFactory::point_color(&merged);
                        point.outline_color = EntityFactory::point_outline_color(&merged);
                    }
                }
                ShapeKind::Rectangle => {
                    if let Some(rectangle) = &mut descriptor.rectangle {
                        rectangle.material = EntityFactory::fill_material(&merged);
                    }
                    if let Some(polyline) = &mut descriptor.polyline {
                        polyline.material = EntityFactory::outline_material(&merged);
                    }
                }
                ShapeKind::Polygon => {
                    if let Some(polygon) = &mut descriptor.polygon {
                        polygon.material = EntityFactory::fill_material(&merged);
                    }
                    if let Some(polyline) = &mut descriptor.polyline {
                        polyline.material = EntityFactory::outline_material(&merged);
                    }
                }
            }
        });
        Ok(())
    }

    /// The user metadata stamped on an entity, if any.
    pub fn get_properties(&self, entity: EntityId) -> Option<Metadata> {
        self.entities
            .with_entity(entity, |d| {
                d.properties.as_ref().map(|p| p.user_properties.clone())
            })
            .flatten()
    }

    /// The tool's event registry, for subscribing to [`DRAW_ENTITY`] and
    /// [`LEFT_CLICK_ENTITY`].
    pub fn events(&self) -> &EventRegistry<DrawEvent> {
        &self.events
    }

    /// The entity store the tool draws into.
    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    fn ctx(&self) -> GestureCtx {
        GestureCtx {
            scene: self.scene.clone(),
            entities: self.entities.clone(),
            events: self.events.clone(),
            gesture: self.gesture.clone(),
        }
    }
}

impl Drop for DrawTool {
    /// Cancels any active gesture so displaced handlers and the rotation
    /// flag never outlive the tool.
    fn drop(&mut self) {
        self.cancel();
    }
}
