use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use super::MotionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// Clock and timer source. The browser implementation wraps `setInterval` /
/// `setTimeout`; tests use a logical clock.
///
/// `cancel` must accept ids that already fired or were already cancelled.
pub trait Scheduler {
    fn now(&self) -> Duration;
    fn set_interval(
        &self,
        period: Duration,
        tick: Box<dyn FnMut()>,
    ) -> Result<TimerId, MotionError>;
    fn set_timeout(
        &self,
        delay: Duration,
        fire: Box<dyn FnOnce()>,
    ) -> Result<TimerId, MotionError>;
    fn cancel(&self, id: TimerId);
}

/// Owns one timer and cancels it exactly once, either on `dispose` or on drop.
pub struct TimerGuard {
    scheduler: Rc<dyn Scheduler>,
    id: Cell<Option<TimerId>>,
}

impl TimerGuard {
    pub fn new(scheduler: Rc<dyn Scheduler>, id: TimerId) -> Self {
        Self {
            scheduler,
            id: Cell::new(Some(id)),
        }
    }

    #[cfg(test)]
    pub(crate) fn is_active(&self) -> bool {
        self.id.get().is_some()
    }

    pub fn dispose(&self) {
        if let Some(id) = self.id.take() {
            self.scheduler.cancel(id);
        }
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for TimerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerGuard").field("id", &self.id.get()).finish()
    }
}
