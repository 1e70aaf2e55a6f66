//! Event bus implementation.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{EntitySnapshot, EventData, GameEvent};

pub type EventHandler = Box<dyn Fn(&GameEvent)>;

/// Event bus for publishing and subscribing to game events.
///
/// Delivery is synchronous: `publish` invokes every registered handler on the
/// same call stack, in subscription order, before returning. Entities mutate
/// first and publish last, so handlers always observe fully-updated state.
///
/// Handles are cheap clones sharing one registry. The bus is single-threaded;
/// handlers must not subscribe from inside a handler.
pub struct EventBus {
    handlers: Rc<RefCell<Vec<EventHandler>>>,
    next_seq: Rc<Cell<u64>>,
}

impl EventBus {
    /// Create a new event bus with no subscribers.
    pub fn new() -> Self {
        Self {
            handlers: Rc::new(RefCell::new(Vec::new())),
            next_seq: Rc::new(Cell::new(0)),
        }
    }

    /// Subscribe to events with a handler function.
    pub fn subscribe<F>(&self, handler: F)
    where
        F: Fn(&GameEvent) + 'static,
    {
        self.handlers.borrow_mut().push(Box::new(handler));
    }

    /// Publish an event, delivering it to every subscriber before returning.
    pub fn publish(&self, source: EntitySnapshot, data: EventData) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);

        let event = GameEvent { seq, source, data };
        tracing::trace!(seq, source = %event.source.kind, "publishing event");

        for handler in self.handlers.borrow().iter() {
            handler(&event);
        }
    }

    /// Number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Total number of events published through this bus.
    pub fn events_published(&self) -> u64 {
        self.next_seq.get()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            handlers: Rc::clone(&self.handlers),
            next_seq: Rc::clone(&self.next_seq),
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handler_count())
            .field("events_published", &self.events_published())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Position;
    use crate::ids::{EntityId, EntityKind};

    fn snapshot() -> EntitySnapshot {
        EntitySnapshot {
            id: EntityId::nil(),
            kind: EntityKind::Marker,
            position: Position::new(0, 0),
        }
    }

    #[test]
    fn test_delivery_is_synchronous() {
        let bus = EventBus::new();
        let seen = Rc::new(Cell::new(0u32));
        let sink = Rc::clone(&seen);

        bus.subscribe(move |_event| sink.set(sink.get() + 1));

        bus.publish(snapshot(), EventData::PlayerDied);
        assert_eq!(seen.get(), 1);

        bus.publish(snapshot(), EventData::PlayerDied);
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn test_handlers_run_in_subscription_order() {
        let bus = EventBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&order);
        bus.subscribe(move |_| first.borrow_mut().push("first"));
        let second = Rc::clone(&order);
        bus.subscribe(move |_| second.borrow_mut().push("second"));

        bus.publish(snapshot(), EventData::DoorBroken);
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_sequence_numbers_are_monotonic() {
        let bus = EventBus::new();
        let seqs = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seqs);

        bus.subscribe(move |event| sink.borrow_mut().push(event.seq));

        bus.publish(snapshot(), EventData::DoorBroken);
        bus.publish(snapshot(), EventData::DoorUnlocked);
        bus.publish(snapshot(), EventData::PlayerDied);

        assert_eq!(*seqs.borrow(), vec![0, 1, 2]);
        assert_eq!(bus.events_published(), 3);
    }

    #[test]
    fn test_clones_share_one_registry() {
        let bus = EventBus::new();
        let handle = bus.clone();
        let seen = Rc::new(Cell::new(0u32));
        let sink = Rc::clone(&seen);

        bus.subscribe(move |_| sink.set(sink.get() + 1));
        assert_eq!(handle.handler_count(), 1);

        handle.publish(snapshot(), EventData::PlayerDied);
        assert_eq!(seen.get(), 1);
    }
}
