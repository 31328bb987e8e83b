//! Polygon capture: clicks commit vertices, the cursor drives a live
//! preview, a double-click closes the ring.
//!
//! The scene's own double-click handler is displaced for the duration of
//! the capture and reinstalled on every exit path, so a finishing
//! double-click never also triggers the scene's default action.
//!
//! A double-click arrives after two click events that each committed a
//! provisional vertex, so reconciliation first pops those two. If fewer
//! than two vertices remain the ring is not closable yet: one point is
//! committed at the double-click position and the capture keeps waiting.
//! Otherwise the cursor point becomes the final vertex.

use std::cell::RefCell;
use std::rc::Rc;

use globekit_core::geo::{bounding_sphere_center, SurfacePoint};
use globekit_core::shape::ShapeKind;

use crate::draw::gesture::{closed_ring, PolygonRing, PreviewShape};
use crate::draw::{finish, GestureCtx};
use crate::entity::{EntityFactory, EntityId, GeometrySource, ShapeGeometry};
use crate::scene::PointerEventKind;

pub(crate) fn begin(ctx: &GestureCtx) {
    let displaced = ctx.scene.take_default_handler(PointerEventKind::DoubleClick);
    let ring = Rc::new(RefCell::new(PolygonRing::default()));
    {
        let mut state = ctx.gesture.borrow_mut();
        state.displaced_double_click = displaced;
        state.ring = Some(ring.clone());
    }

    let group = ctx.scene.attach();

    // Click: commit a vertex.
    let click_ring = ring.clone();
    let click_ctx = ctx.clone();
    group.on(
        PointerEventKind::Click,
        Box::new(move |input| {
            let Some(point) = click_ctx.scene.pick_surface(input.position) else {
                return;
            };
            let mut r = click_ring.borrow_mut();
            r.vertices.push(point);
            tracing::trace!(vertices = r.vertices.len(), "polygon vertex committed");
        }),
    );

    // Move: track the cursor and keep the preview current.
    let move_ring = ring.clone();
    let move_ctx = ctx.clone();
    group.on(
        PointerEventKind::Move,
        Box::new(move |input| {
            if move_ring.borrow().vertices.is_empty() {
                return;
            }
            let Some(point) = move_ctx.scene.pick_surface(input.position) else {
                return;
            };
            move_ring.borrow_mut().cursor = Some(point);
            update_preview(&move_ctx, &move_ring);
        }),
    );

    // Double-click: reconcile the provisional clicks and complete.
    let dbl_ring = ring.clone();
    let dbl_ctx = ctx.clone();
    group.on(
        PointerEventKind::DoubleClick,
        Box::new(move |input| {
            let vertices = {
                let mut r = dbl_ring.borrow_mut();
                let keep = r.vertices.len().saturating_sub(2);
                r.vertices.truncate(keep);

                if r.vertices.len() < 2 {
                    let Some(point) = dbl_ctx.scene.pick_surface(input.position) else {
                        return;
                    };
                    r.vertices.push(point);
                    return;
                }

                // Final vertex: the last cursor point, or the double-click
                // position when the pointer never moved.
                let final_vertex = match r.cursor {
                    Some(point) => point,
                    None => match dbl_ctx.scene.pick_surface(input.position) {
                        Some(point) => point,
                        None => return,
                    },
                };
                r.vertices.push(final_vertex);
                r.cursor = None;
                r.vertices.clone()
            };

            let id = finalize_entity(&dbl_ctx, &vertices);
            let coordinates = vertices.iter().map(SurfacePoint::to_geographic).collect();
            finish(&dbl_ctx, id, ShapeKind::Polygon, coordinates);
        }),
    );

    ctx.gesture.borrow_mut().handlers = Some(group);
}

/// Creates or replaces the preview entity after a cursor update.
///
/// With one committed vertex the preview is a bare two-point line; once a
/// second vertex exists it is replaced, exactly once, by a live polygon
/// entity that later becomes the finished one.
fn update_preview(ctx: &GestureCtx, ring: &Rc<RefCell<PolygonRing>>) {
    let count = ring.borrow().vertices.len();
    let (preview, entity) = {
        let state = ctx.gesture.borrow();
        (state.preview, state.entity)
    };

    if count == 1 && preview == PreviewShape::None {
        let options = ctx.gesture.borrow().options.clone();
        let line_ring = ring.clone();
        let positions = GeometrySource::live(move || line_ring.borrow().hierarchy());
        let id = ctx
            .entities
            .add(EntityFactory::preview_line(positions, &options));

        let mut state = ctx.gesture.borrow_mut();
        state.entity = Some(id);
        state.preview = PreviewShape::Line;
    } else if count >= 2 && preview != PreviewShape::Polygon {
        if let Some(id) = entity {
            ctx.entities.remove(id);
        }
        let options = ctx.gesture.borrow().options.clone();
        let hierarchy_ring = ring.clone();
        let hierarchy = GeometrySource::live(move || hierarchy_ring.borrow().hierarchy());
        let outline_ring = ring.clone();
        let outline = GeometrySource::live(move || outline_ring.borrow().outline());
        let id = ctx.entities.add(EntityFactory::build(
            ShapeGeometry::Polygon { hierarchy, outline },
            &options,
        ));

        let mut state = ctx.gesture.borrow_mut();
        state.entity = Some(id);
        state.preview = PreviewShape::Polygon;
    }
}

/// Freezes the polygon preview into the finished entity, or builds it
/// from scratch when the pointer never moved past the second vertex.
fn finalize_entity(ctx: &GestureCtx, vertices: &[SurfacePoint]) -> EntityId {
    let (entity, preview) = {
        let state = ctx.gesture.borrow();
        (state.entity, state.preview)
    };
    let center = bounding_sphere_center(vertices);

    if let (Some(id), PreviewShape::Polygon) = (entity, preview) {
        ctx.entities.with_entity_mut(id, |descriptor| {
            descriptor.freeze_geometry();
            descriptor.position = Some(center);
        });
        return id;
    }

    if let Some(id) = entity {
        ctx.entities.remove(id);
    }
    let options = ctx.gesture.borrow().options.clone();
    let mut descriptor = EntityFactory::build(
        ShapeGeometry::Polygon {
            hierarchy: GeometrySource::Static(vertices.to_vec()),
            outline: GeometrySource::Static(closed_ring(vertices)),
        },
        &options,
    );
    descriptor.position = Some(center);
    ctx.entities.add(descriptor)
}
