//! Registry contract tests over the public API.

use std::cell::RefCell;
use std::rc::Rc;

use globekit_core::{EventError, EventRegistry};

#[derive(Debug, Clone, PartialEq)]
struct Ping(u32);

#[test]
fn test_declared_names_are_fixed() {
    let registry: EventRegistry<Ping> = EventRegistry::new(["DRAW_ENTITY", "LEFT_CLICK_ENTITY"]);
    let names: Vec<&str> = registry.supported().collect();
    assert_eq!(names, vec!["DRAW_ENTITY", "LEFT_CLICK_ENTITY"]);

    let err = registry.subscribe("RIGHT_CLICK_ENTITY", |_| {}).unwrap_err();
    assert!(matches!(err, EventError::UnsupportedEvent { .. }));
}

#[test]
fn test_delivery_is_synchronous_and_ordered() {
    let registry: EventRegistry<Ping> = EventRegistry::new(["DRAW_ENTITY"]);
    let received = Rc::new(RefCell::new(Vec::new()));

    let sink = received.clone();
    registry
        .subscribe("DRAW_ENTITY", move |event: &Ping| {
            sink.borrow_mut().push(event.clone());
        })
        .unwrap();

    registry.publish("DRAW_ENTITY", &Ping(1));
    registry.publish("DRAW_ENTITY", &Ping(2));
    registry.publish("DRAW_ENTITY", &Ping(3));

    assert_eq!(*received.borrow(), vec![Ping(1), Ping(2), Ping(3)]);
}

#[test]
fn test_subscriber_replaces_itself_during_delivery() {
    let registry = Rc::new(EventRegistry::<Ping>::new(["DRAW_ENTITY"]));
    let received = Rc::new(RefCell::new(Vec::new()));

    let reg = registry.clone();
    let sink = received.clone();
    registry
        .subscribe("DRAW_ENTITY", move |event: &Ping| {
            sink.borrow_mut().push(event.0);
            let next = sink.clone();
            reg.subscribe("DRAW_ENTITY", move |event: &Ping| {
                next.borrow_mut().push(event.0 + 100);
            })
            .unwrap();
        })
        .unwrap();

    registry.publish("DRAW_ENTITY", &Ping(1));
    registry.publish("DRAW_ENTITY", &Ping(2));

    assert_eq!(*received.borrow(), vec![1, 102]);
}
