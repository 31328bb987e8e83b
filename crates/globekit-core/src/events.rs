//! Event registry for drawing notifications.
//!
//! A typed publish/subscribe mechanism restricted to a fixed set of event
//! names declared at construction. Unlike a broadcast bus, each name holds
//! at most one subscriber; subscribing again replaces the previous
//! callback. Delivery is synchronous and in call order.
//!
//! The registry is single-threaded by design: the drawing subsystem runs
//! entirely on one logical event loop, so handlers are plain `FnMut`
//! closures behind `Rc`/`RefCell` rather than `Send + Sync` boxes.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

/// Error types for registry operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    /// The event name is not in the registry's declared set
    #[error("Event '{name}' is not supported. Supported events are: {supported}")]
    UnsupportedEvent {
        /// The rejected event name.
        name: String,
        /// Comma-separated list of declared names.
        supported: String,
    },
}

type Subscriber<E> = Rc<RefCell<dyn FnMut(&E)>>;

/// Registry mapping declared event names to at most one subscriber each.
pub struct EventRegistry<E> {
    allowed: BTreeSet<String>,
    subscribers: RefCell<HashMap<String, Subscriber<E>>>,
}

impl<E> EventRegistry<E> {
    /// Creates a registry that accepts only the given event names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: names.into_iter().map(Into::into).collect(),
            subscribers: RefCell::new(HashMap::new()),
        }
    }

    /// Subscribes a callback to an event name, replacing any prior
    /// subscriber for that name.
    ///
    /// Fails with [`EventError::UnsupportedEvent`] when the name is not in
    /// the declared set.
    pub fn subscribe<F>(&self, name: &str, callback: F) -> Result<(), EventError>
    where
        F: FnMut(&E) + 'static,
    {
        if !self.allowed.contains(name) {
            return Err(EventError::UnsupportedEvent {
                name: name.to_string(),
                supported: self
                    .allowed
                    .iter()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }
        self.subscribers
            .borrow_mut()
            .insert(name.to_string(), Rc::new(RefCell::new(callback)));
        tracing::debug!(event = name, "subscriber registered");
        Ok(())
    }

    /// Removes the subscriber for an event name. No-op when none exists.
    pub fn unsubscribe(&self, name: &str) {
        if self.subscribers.borrow_mut().remove(name).is_some() {
            tracing::debug!(event = name, "subscriber removed");
        }
    }

    /// Reports whether a subscriber is currently registered for the name.
    ///
    /// Callers use this to skip expensive work (e.g. pick queries) when
    /// nobody is listening.
    pub fn has_subscriber(&self, name: &str) -> bool {
        self.subscribers.borrow().contains_key(name)
    }

    /// Synchronously invokes the current subscriber with the event.
    /// Does nothing when the name has no subscriber.
    ///
    /// The subscriber may unsubscribe or replace itself during delivery;
    /// the registry holds the callback independently of the map while it
    /// runs.
    pub fn publish(&self, name: &str, event: &E) {
        let subscriber = self.subscribers.borrow().get(name).cloned();
        if let Some(subscriber) = subscriber {
            (subscriber.borrow_mut())(event);
        }
    }

    /// Returns the declared event names.
    pub fn supported(&self) -> impl Iterator<Item = &str> {
        self.allowed.iter().map(String::as_str)
    }
}

impl<E> std::fmt::Debug for EventRegistry<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRegistry")
            .field("allowed", &self.allowed)
            .field("subscribers", &self.subscribers.borrow().len())
            .finish()
    }
}
