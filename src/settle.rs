use gloo::timers::callback::Timeout;
use ripple_core::{Epoch, RippleEngine, ScheduledSettle};
use std::cell::RefCell;
use std::rc::Rc;

struct Armed {
    epoch: Epoch,
    _timeout: Timeout,
}

/// Holds the single pending settle timer. Arming replaces (and so cancels)
/// whatever was armed before; dropping the holder cancels it too.
#[derive(Default)]
pub struct SettleTimer {
    slot: RefCell<Option<Armed>>,
}

impl SettleTimer {
    pub fn arm(&self, engine: &Rc<RefCell<RippleEngine>>, scheduled: ScheduledSettle) {
        let epoch = scheduled.epoch;
        let millis = u32::try_from(scheduled.after.as_millis()).unwrap_or(u32::MAX);
        let engine = engine.clone();
        let timeout = Timeout::new(millis, move || {
            if engine.borrow_mut().settle(epoch) {
                log::debug!("[settle] {} fired", epoch);
            }
        });
        let previous = self.slot.borrow_mut().replace(Armed {
            epoch,
            _timeout: timeout,
        });
        if let Some(prev) = previous {
            log::trace!("[settle] cancelled timer for {}", prev.epoch);
        }
    }

    pub fn cancel(&self) {
        if let Some(prev) = self.slot.borrow_mut().take() {
            log::trace!("[settle] cancelled timer for {}", prev.epoch);
        }
    }
}
