//! Player event fan-out with scoped registration.
//!
//! `EventBus::subscribe` hands back a [`Subscription`]; dropping it
//! unregisters the handler, even when the drop happens inside another
//! handler during dispatch.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    TrackChanged(usize),
    MuteChanged(bool),
}

type Handler = Box<dyn FnMut(&PlayerEvent)>;

#[derive(Default)]
struct Registry {
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(u64, Handler)>>,
    // Registrations and removals requested while `handlers` is borrowed by a
    // dispatch land here and are applied on the next settle.
    pending: RefCell<Vec<(u64, Handler)>>,
    retired: RefCell<Vec<u64>>,
}

impl Registry {
    fn settle(&self) {
        let removed = {
            let Ok(mut handlers) = self.handlers.try_borrow_mut() else {
                return;
            };
            handlers.append(&mut self.pending.borrow_mut());
            let retired = std::mem::take(&mut *self.retired.borrow_mut());
            if retired.is_empty() {
                return;
            }
            let (gone, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut *handlers)
                .into_iter()
                .partition(|(id, _)| retired.contains(id));
            *handlers = kept;
            gone
        };
        // Handlers may own subscriptions of their own; drop them only after
        // every borrow is released.
        drop(removed);
    }
}

#[derive(Clone, Default)]
pub struct EventBus {
    registry: Rc<Registry>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: FnMut(&PlayerEvent) + 'static,
    {
        let id = self.registry.next_id.get();
        self.registry.next_id.set(id + 1);
        self.registry.pending.borrow_mut().push((id, Box::new(handler)));
        self.registry.settle();
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Deliver `event` to every live handler. Handlers registered during the
    /// dispatch first hear the next event. A nested emit from inside a
    /// handler is dropped.
    pub fn emit(&self, event: PlayerEvent) {
        self.registry.settle();
        let Ok(mut handlers) = self.registry.handlers.try_borrow_mut() else {
            tracing::warn!(?event, "nested player event dropped");
            return;
        };
        for (id, handler) in handlers.iter_mut() {
            let retired = self.registry.retired.borrow().contains(id);
            if !retired {
                handler(&event);
            }
        }
        drop(handlers);
        self.registry.settle();
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.settle();
        self.registry
            .handlers
            .try_borrow()
            .map(|h| h.len())
            .unwrap_or(0)
    }
}

/// Registration guard. Unregisters on drop.
#[must_use = "dropping a Subscription unregisters its handler"]
pub struct Subscription {
    id: u64,
    registry: Weak<Registry>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.retired.borrow_mut().push(self.id);
            registry.settle();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handlers_receive_events() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        let _sub = bus.subscribe(move |e| s.borrow_mut().push(*e));

        bus.emit(PlayerEvent::TrackChanged(3));
        bus.emit(PlayerEvent::MuteChanged(true));
        assert_eq!(
            *seen.borrow(),
            vec![PlayerEvent::TrackChanged(3), PlayerEvent::MuteChanged(true)]
        );
    }

    #[test]
    fn test_drop_unregisters() {
        let bus = EventBus::new();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let sub = bus.subscribe(move |_| c.set(c.get() + 1));
        assert_eq!(bus.subscriber_count(), 1);

        bus.emit(PlayerEvent::MuteChanged(false));
        drop(sub);
        bus.emit(PlayerEvent::MuteChanged(true));

        assert_eq!(count.get(), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_drop_during_dispatch() {
        let bus = EventBus::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let later = Rc::new(Cell::new(0));

        let s = slot.clone();
        let _killer = bus.subscribe(move |_| {
            s.borrow_mut().take();
        });
        let l = later.clone();
        *slot.borrow_mut() = Some(bus.subscribe(move |_| l.set(l.get() + 1)));

        bus.emit(PlayerEvent::TrackChanged(0));
        bus.emit(PlayerEvent::TrackChanged(1));

        assert_eq!(later.get(), 0);
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[test]
    fn test_subscription_outliving_bus() {
        let bus = EventBus::new();
        let sub = bus.subscribe(|_| {});
        drop(bus);
        drop(sub);
    }
}
