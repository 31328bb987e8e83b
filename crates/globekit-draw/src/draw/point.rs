//! Point capture: a single click places the finished entity.

use globekit_core::shape::ShapeKind;

use crate::draw::{finish, GestureCtx};
use crate::entity::{EntityFactory, ShapeGeometry};
use crate::scene::PointerEventKind;

pub(crate) fn begin(ctx: &GestureCtx) {
    let group = ctx.scene.attach();

    let click_ctx = ctx.clone();
    group.on(
        PointerEventKind::Click,
        Box::new(move |input| {
            let Some(position) = click_ctx.scene.pick_surface(input.position) else {
                return;
            };
            let options = click_ctx.gesture.borrow().options.clone();
            let descriptor = EntityFactory::build(ShapeGeometry::Point { position }, &options);
            let id = click_ctx.entities.add(descriptor);
            finish(&click_ctx, id, ShapeKind::Point, vec![position.to_geographic()]);
        }),
    );

    ctx.gesture.borrow_mut().handlers = Some(group);
}
