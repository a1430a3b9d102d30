use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::{Bounds, Crossing, TriggerZone, ZonePosition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(pub u64);

/// Scroll direction at the moment a boundary was crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Measures the trigger element; `None` means it is not mounted.
pub type Measure = Rc<dyn Fn() -> Option<Bounds>>;
pub type CrossingHandler = Box<dyn FnMut(Direction)>;

/// Source of zone crossings for registered targets.
pub trait VisibilitySource {
    fn subscribe(
        &self,
        measure: Measure,
        zone: TriggerZone,
        on_enter: CrossingHandler,
        on_exit: CrossingHandler,
    ) -> SubscriptionId;

    /// Returns false when `id` was never subscribed or is already gone.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

struct Subscription {
    measure: Measure,
    zone: TriggerZone,
    bounds: Option<Bounds>,
    position: ZonePosition,
    on_enter: Option<CrossingHandler>,
    on_exit: Option<CrossingHandler>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    subscriptions: BTreeMap<SubscriptionId, Subscription>,
    viewport: Option<(f64, f64)>,
}

/// Scroll-position driven [`VisibilitySource`].
///
/// The browser feeds it from window scroll/resize signals; tests call
/// [`ScrollTracker::update`] by hand.
#[derive(Clone, Default)]
pub struct ScrollTracker {
    inner: Rc<RefCell<Inner>>,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Feed a new scroll offset and viewport height.
    pub fn update(&self, scroll_y: f64, viewport_height: f64) {
        self.inner.borrow_mut().viewport = Some((scroll_y, viewport_height));
        let ids = self.ids();
        self.evaluate(&ids, false);
    }

    /// Re-measure every trigger, e.g. after a resize or layout change.
    pub fn refresh(&self) {
        let ids = self.ids();
        self.evaluate(&ids, true);
    }

    fn ids(&self) -> Vec<SubscriptionId> {
        self.inner.borrow().subscriptions.keys().copied().collect()
    }

    fn evaluate(&self, ids: &[SubscriptionId], remeasure: bool) {
        let Some((scroll_y, viewport_height)) = self.inner.borrow().viewport else {
            return;
        };

        let mut pending = Vec::new();
        for id in ids {
            let measure = {
                let inner = self.inner.borrow();
                match inner.subscriptions.get(id) {
                    Some(sub) if remeasure || sub.bounds.is_none() => Some(sub.measure.clone()),
                    Some(_) => None,
                    None => continue,
                }
            };
            let fresh = measure.and_then(|m| m());

            let mut inner = self.inner.borrow_mut();
            let Some(sub) = inner.subscriptions.get_mut(id) else {
                continue;
            };
            if fresh.is_some() {
                sub.bounds = fresh;
            }
            let Some(bounds) = sub.bounds else {
                continue;
            };
            let position = sub.zone.classify(&bounds, viewport_height, scroll_y);
            let crossings = Crossing::between(sub.position, position);
            sub.position = position;
            if !crossings.is_empty() {
                pending.push((*id, crossings));
            }
        }

        for (id, crossings) in pending {
            for crossing in crossings {
                self.dispatch(id, crossing);
            }
        }
    }

    fn dispatch(&self, id: SubscriptionId, crossing: Crossing) {
        let (entering, direction) = match crossing {
            Crossing::Enter => (true, Direction::Forward),
            Crossing::EnterBack => (true, Direction::Backward),
            Crossing::Leave => (false, Direction::Forward),
            Crossing::LeaveBack => (false, Direction::Backward),
        };
        let handler = {
            let mut inner = self.inner.borrow_mut();
            let Some(sub) = inner.subscriptions.get_mut(&id) else {
                return;
            };
            if entering {
                sub.on_enter.take()
            } else {
                sub.on_exit.take()
            }
        };
        let Some(mut handler) = handler else {
            return;
        };

        // no borrow is held here, so handlers may unsubscribe
        handler(direction);

        let mut inner = self.inner.borrow_mut();
        if let Some(sub) = inner.subscriptions.get_mut(&id) {
            let slot = if entering {
                &mut sub.on_enter
            } else {
                &mut sub.on_exit
            };
            *slot = Some(handler);
        }
    }
}

impl VisibilitySource for ScrollTracker {
    fn subscribe(
        &self,
        measure: Measure,
        zone: TriggerZone,
        on_enter: CrossingHandler,
        on_exit: CrossingHandler,
    ) -> SubscriptionId {
        let id = {
            let mut inner = self.inner.borrow_mut();
            inner.next_id += 1;
            let id = SubscriptionId(inner.next_id);
            inner.subscriptions.insert(
                id,
                Subscription {
                    measure,
                    zone,
                    bounds: None,
                    position: ZonePosition::Before,
                    on_enter: Some(on_enter),
                    on_exit: Some(on_exit),
                },
            );
            id
        };
        // a target registered below the fold of an already scrolled page
        // catches up immediately
        self.evaluate(&[id], true);
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.borrow_mut().subscriptions.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    type Log = Rc<RefCell<Vec<(&'static str, Direction)>>>;

    fn zone() -> TriggerZone {
        TriggerZone::parse("top 85%", Some("bottom 20%")).unwrap()
    }

    fn subscribe(tracker: &ScrollTracker, bounds: Option<Bounds>, log: &Log) -> SubscriptionId {
        let enter = log.clone();
        let exit = log.clone();
        tracker.subscribe(
            Rc::new(move || bounds),
            zone(),
            Box::new(move |d| enter.borrow_mut().push(("enter", d))),
            Box::new(move |d| exit.borrow_mut().push(("exit", d))),
        )
    }

    #[test]
    fn test_forward_and_backward_crossings() {
        let tracker = ScrollTracker::new();
        let log = Log::default();
        // zone spans scroll offsets 1150..=2300 in a 1000px viewport
        subscribe(&tracker, Some(Bounds::new(2000.0, 500.0)), &log);

        tracker.update(0.0, 1000.0);
        assert!(log.borrow().is_empty());
        tracker.update(1200.0, 1000.0);
        tracker.update(1300.0, 1000.0);
        tracker.update(2400.0, 1000.0);
        tracker.update(2000.0, 1000.0);
        tracker.update(100.0, 1000.0);
        assert_eq!(
            *log.borrow(),
            vec![
                ("enter", Direction::Forward),
                ("exit", Direction::Forward),
                ("enter", Direction::Backward),
                ("exit", Direction::Backward),
            ]
        );
    }

    #[test]
    fn test_jump_over_zone_emits_both() {
        let tracker = ScrollTracker::new();
        let log = Log::default();
        subscribe(&tracker, Some(Bounds::new(2000.0, 500.0)), &log);
        tracker.update(0.0, 1000.0);
        tracker.update(5000.0, 1000.0);
        assert_eq!(
            *log.borrow(),
            vec![("enter", Direction::Forward), ("exit", Direction::Forward)]
        );
    }

    #[test]
    fn test_subscribe_catches_up_with_current_scroll() {
        let tracker = ScrollTracker::new();
        tracker.update(1500.0, 1000.0);
        let log = Log::default();
        subscribe(&tracker, Some(Bounds::new(2000.0, 500.0)), &log);
        assert_eq!(*log.borrow(), vec![("enter", Direction::Forward)]);
    }

    #[test]
    fn test_missing_target_is_skipped() {
        let tracker = ScrollTracker::new();
        let log = Log::default();
        subscribe(&tracker, None, &log);
        tracker.update(1500.0, 1000.0);
        tracker.refresh();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_unsubscribe_is_idempotent_and_silences() {
        let tracker = ScrollTracker::new();
        let log = Log::default();
        let id = subscribe(&tracker, Some(Bounds::new(2000.0, 500.0)), &log);
        assert!(tracker.unsubscribe(id));
        assert!(!tracker.unsubscribe(id));
        assert!(tracker.is_empty());
        tracker.update(1500.0, 1000.0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_handler_may_unsubscribe_itself() {
        let tracker = ScrollTracker::new();
        let slot = Rc::new(Cell::new(None));
        let hits = Rc::new(Cell::new(0));
        let (t, s, h) = (tracker.clone(), slot.clone(), hits.clone());
        let id = tracker.subscribe(
            Rc::new(|| Some(Bounds::new(2000.0, 500.0))),
            zone(),
            Box::new(move |_| {
                h.set(h.get() + 1);
                if let Some(id) = s.get() {
                    t.unsubscribe(id);
                }
            }),
            Box::new(|_| {}),
        );
        slot.set(Some(id));
        tracker.update(1500.0, 1000.0);
        tracker.update(0.0, 1000.0);
        tracker.update(1500.0, 1000.0);
        assert_eq!(hits.get(), 1);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_refresh_uses_new_layout() {
        let tracker = ScrollTracker::new();
        let top = Rc::new(Cell::new(2000.0));
        let log = Log::default();
        let t = top.clone();
        let (enter, exit) = (log.clone(), log.clone());
        tracker.subscribe(
            Rc::new(move || Some(Bounds::new(t.get(), 500.0))),
            zone(),
            Box::new(move |d| enter.borrow_mut().push(("enter", d))),
            Box::new(move |d| exit.borrow_mut().push(("exit", d))),
        );
        tracker.update(1000.0, 1000.0);
        assert!(log.borrow().is_empty());
        top.set(1500.0);
        tracker.refresh();
        assert_eq!(*log.borrow(), vec![("enter", Direction::Forward)]);
    }
}
