//! Single-slot, last-write-wins channel carrying the latest interaction origin.
//!
//! The channel separates whoever captures a click (nav links, the logo) from
//! whoever owns the ripple grid. There is no queue: each publish overwrites
//! the slot and synchronously notifies the registered listeners. Subscribers
//! only get read access; writing requires an `OriginPublisher`.

use crate::geometry::OriginPoint;
use fnv::FnvHashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener = Rc<RefCell<dyn FnMut(OriginPoint)>>;

#[derive(Default)]
struct Slot {
    latest: Option<OriginPoint>,
    version: u64,
    listeners: FnvHashMap<u64, Listener>,
    next_id: u64,
}

/// Session-owned channel. Hand out publishers and subscribers from it.
#[derive(Default)]
pub struct OriginChannel {
    slot: Rc<RefCell<Slot>>,
}

impl OriginChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publisher(&self) -> OriginPublisher {
        OriginPublisher {
            slot: self.slot.clone(),
        }
    }

    /// A subscriber that has not yet seen any of the writes made so far.
    pub fn subscriber(&self) -> OriginSubscriber {
        OriginSubscriber {
            slot: self.slot.clone(),
            seen: 0,
        }
    }

    pub fn latest(&self) -> Option<OriginPoint> {
        self.slot.borrow().latest
    }

    pub fn listener_count(&self) -> usize {
        self.slot.borrow().listeners.len()
    }
}

impl fmt::Debug for OriginChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.borrow();
        f.debug_struct("OriginChannel")
            .field("latest", &slot.latest)
            .field("version", &slot.version)
            .field("listeners", &slot.listeners.len())
            .finish()
    }
}

/// Write side of the channel.
#[derive(Clone)]
pub struct OriginPublisher {
    slot: Rc<RefCell<Slot>>,
}

impl OriginPublisher {
    /// Overwrite the slot and notify every listener registered at this moment.
    pub fn publish(&self, x: f32, y: f32) {
        let point = OriginPoint::new(x, y);
        let mut targets: Vec<(u64, Listener)> = {
            let mut slot = self.slot.borrow_mut();
            slot.latest = Some(point);
            slot.version += 1;
            slot.listeners
                .iter()
                .map(|(id, l)| (*id, l.clone()))
                .collect()
        };
        targets.sort_unstable_by_key(|(id, _)| *id);
        log::trace!(
            "[origin] publish ({:.1},{:.1}) to {} listener(s)",
            x,
            y,
            targets.len()
        );

        for (id, listener) in targets {
            // a previous listener may have cancelled this one
            if !self.slot.borrow().listeners.contains_key(&id) {
                continue;
            }
            match listener.try_borrow_mut() {
                Ok(mut f) => (*f)(point),
                Err(_) => log::warn!("[origin] listener {} re-entered; skipping", id),
            };
        }
    }
}

/// Read side of the channel.
#[derive(Clone)]
pub struct OriginSubscriber {
    slot: Rc<RefCell<Slot>>,
    seen: u64,
}

impl OriginSubscriber {
    pub fn latest(&self) -> Option<OriginPoint> {
        self.slot.borrow().latest
    }

    /// Latest value if anything was published since the previous call.
    /// Several publishes in between collapse into the last one.
    pub fn take_new(&mut self) -> Option<OriginPoint> {
        let slot = self.slot.borrow();
        if slot.version == self.seen {
            return None;
        }
        self.seen = slot.version;
        slot.latest
    }

    /// Register a callback for future publishes.
    pub fn on_publish<F>(&self, f: F) -> Subscription
    where
        F: FnMut(OriginPoint) + 'static,
    {
        let mut slot = self.slot.borrow_mut();
        let id = slot.next_id;
        slot.next_id += 1;
        let listener: Listener = Rc::new(RefCell::new(f));
        slot.listeners.insert(id, listener);
        Subscription {
            slot: Rc::downgrade(&self.slot),
            id,
        }
    }
}

/// Cancellation handle for a listener; dropping it unregisters the callback.
#[must_use = "dropping a Subscription unregisters its listener"]
pub struct Subscription {
    slot: Weak<RefCell<Slot>>,
    id: u64,
}

impl Subscription {
    pub fn cancel(self) {}

    pub fn is_active(&self) -> bool {
        self.slot
            .upgrade()
            .map(|s| s.borrow().listeners.contains_key(&self.id))
            .unwrap_or(false)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.upgrade() {
            match slot.try_borrow_mut() {
                Ok(mut s) => {
                    s.listeners.remove(&self.id);
                }
                Err(_) => log::warn!("[origin] could not release listener {}", self.id),
            }
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
