//! Rectangle capture: press anchors a corner, the drag stretches one live
//! entity, release freezes it.
//!
//! Camera rotation is disabled for the duration of the drag so the
//! pointer moves the corner instead of the globe, and restored on every
//! exit path.

use std::cell::RefCell;
use std::rc::Rc;

use globekit_core::geo::{rectangle_center, rectangle_outline_ring, GeoRectangle};
use globekit_core::shape::ShapeKind;

use crate::draw::gesture::RectangleCorners;
use crate::draw::{finish, GestureCtx};
use crate::entity::{EntityFactory, GeometrySource, ShapeGeometry};
use crate::scene::PointerEventKind;

pub(crate) fn begin(ctx: &GestureCtx) {
    {
        let mut state = ctx.gesture.borrow_mut();
        state.rotation_restore = Some(ctx.scene.rotation_enabled());
    }
    ctx.scene.set_rotation_enabled(false);

    let group = ctx.scene.attach();

    // Press: anchor the first corner, once.
    let press_ctx = ctx.clone();
    group.on(
        PointerEventKind::Press,
        Box::new(move |input| {
            if press_ctx.gesture.borrow().corners.is_some() {
                return;
            }
            let Some(point) = press_ctx.scene.pick_surface(input.position) else {
                return;
            };
            press_ctx.gesture.borrow_mut().corners = Some(Rc::new(RefCell::new(
                RectangleCorners {
                    anchor: point,
                    current: point,
                },
            )));
            tracing::trace!("rectangle anchored");
        }),
    );

    // Move: stretch the far corner; the first move creates the single
    // live entity of the drag.
    let move_ctx = ctx.clone();
    group.on(
        PointerEventKind::Move,
        Box::new(move |input| {
            let corners = move_ctx.gesture.borrow().corners.clone();
            let Some(corners) = corners else {
                return;
            };
            let Some(point) = move_ctx.scene.pick_surface(input.position) else {
                return;
            };
            corners.borrow_mut().current = point;

            if move_ctx.gesture.borrow().entity.is_some() {
                return;
            }
            let options = move_ctx.gesture.borrow().options.clone();

            let bounds_corners = corners.clone();
            let bounds = GeometrySource::live(move || {
                let c = bounds_corners.borrow();
                GeoRectangle::from_surface_corners(&c.anchor, &c.current)
            });
            let outline_corners = corners.clone();
            let outline = GeometrySource::live(move || {
                let c = outline_corners.borrow();
                rectangle_outline_ring(&c.anchor, &c.current)
            });

            let id = move_ctx
                .entities
                .add(EntityFactory::build(
                    ShapeGeometry::Rectangle { bounds, outline },
                    &options,
                ));
            move_ctx.gesture.borrow_mut().entity = Some(id);
        }),
    );

    // Release: freeze the geometry and publish. A release before the drag
    // produced an entity is ignored and the capture keeps waiting.
    let release_ctx = ctx.clone();
    group.on(
        PointerEventKind::Release,
        Box::new(move |_input| {
            let (id, anchor, current) = {
                let state = release_ctx.gesture.borrow();
                let (Some(id), Some(corners)) = (state.entity, state.corners.as_ref()) else {
                    return;
                };
                let c = corners.borrow();
                (id, c.anchor, c.current)
            };

            let start = anchor.to_geographic();
            let end = current.to_geographic();
            release_ctx.entities.with_entity_mut(id, |descriptor| {
                descriptor.freeze_geometry();
                descriptor.position = Some(rectangle_center(start, end));
            });

            finish(&release_ctx, id, ShapeKind::Rectangle, vec![start, end]);
        }),
    );

    ctx.gesture.borrow_mut().handlers = Some(group);
}
