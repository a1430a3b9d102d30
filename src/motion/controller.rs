use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use super::observer::Measure;
use super::{
    Crossing, Direction, MotionConfig, MotionError, Phase, Pose, Scheduler, SubscriptionId,
    Surface, TargetAnimation, TimerGuard, ToggleAction, ToggleActions, TriggerZone, Tween,
    VisibilitySource,
};

/// Everything needed to scroll-link one element.
pub struct Registration {
    /// Element whose position decides the crossing (often the parent section).
    pub trigger: Measure,
    pub zone: TriggerZone,
    pub actions: ToggleActions,
    pub tween: Tween,
    /// Element that is actually moved.
    pub surface: Rc<dyn Surface>,
}

struct Animated {
    animation: TargetAnimation,
    surface: Rc<dyn Surface>,
    last: Option<Pose>,
}

impl Animated {
    fn render(&mut self, now: Duration) {
        let pose = self.animation.pose(now);
        if self.last != Some(pose) {
            self.surface.apply(&pose);
            self.last = Some(pose);
        }
    }
}

#[derive(Default)]
struct State {
    targets: Vec<Rc<RefCell<Animated>>>,
    subscriptions: Vec<SubscriptionId>,
    setup: Option<TimerGuard>,
    frame: Option<TimerGuard>,
    disposed: bool,
}

struct Inner {
    scheduler: Rc<dyn Scheduler>,
    source: Rc<dyn VisibilitySource>,
    config: MotionConfig,
    state: RefCell<State>,
}

/// Drives scroll-linked reveals for one view.
///
/// Cloning yields another handle to the same controller. Once the last
/// handle is dropped every timer and subscription is released.
#[derive(Clone)]
pub struct AnimationController {
    inner: Rc<Inner>,
}

impl AnimationController {
    pub fn new(
        scheduler: Rc<dyn Scheduler>,
        source: Rc<dyn VisibilitySource>,
        config: MotionConfig,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                scheduler,
                source,
                config,
                state: RefCell::new(State::default()),
            }),
        }
    }

    /// Run `setup` once layout has settled, after the configured delay.
    pub fn schedule_setup<F>(&self, setup: F) -> Result<(), MotionError>
    where
        F: FnOnce(&AnimationController) + 'static,
    {
        if self.is_disposed() {
            return Ok(());
        }
        let weak = Rc::downgrade(&self.inner);
        let id = self.inner.scheduler.set_timeout(
            self.inner.config.setup_delay(),
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    setup(&AnimationController { inner });
                }
            }),
        )?;
        let guard = TimerGuard::new(self.inner.scheduler.clone(), id);
        if let Some(previous) = self.inner.state.borrow_mut().setup.replace(guard) {
            previous.dispose();
        }
        Ok(())
    }

    /// Hand crossings of `zone` to the target, then apply its before-state.
    /// The trigger is measured while the target is still untransformed.
    /// Returns the target index, or `None` once disposed.
    pub fn register(&self, registration: Registration) -> Option<usize> {
        let Registration {
            trigger,
            zone,
            actions,
            tween,
            surface,
        } = registration;
        let target = self.push_target(tween, surface)?;
        let index = self.len() - 1;

        let on_enter = {
            let weak = Rc::downgrade(&self.inner);
            let target = target.clone();
            Box::new(move |direction: Direction| {
                let crossing = match direction {
                    Direction::Forward => Crossing::Enter,
                    Direction::Backward => Crossing::EnterBack,
                };
                Inner::handle(&weak, &target, actions.action_for(crossing));
            })
        };
        let on_exit = {
            let weak = Rc::downgrade(&self.inner);
            let target = target.clone();
            Box::new(move |direction: Direction| {
                let crossing = match direction {
                    Direction::Forward => Crossing::Leave,
                    Direction::Backward => Crossing::LeaveBack,
                };
                Inner::handle(&weak, &target, actions.action_for(crossing));
            })
        };

        // subscribing measures the trigger and may fire straight away, so it
        // runs before the before-state is applied and without a state borrow
        let id = self.inner.source.subscribe(trigger, zone, on_enter, on_exit);
        self.inner.state.borrow_mut().subscriptions.push(id);
        // no-op when a crossing already rendered it
        target.borrow_mut().render(self.inner.scheduler.now());
        Some(index)
    }

    /// Play `tween` right away, without any scroll link.
    pub fn play_on_mount(&self, tween: Tween, surface: Rc<dyn Surface>) -> Option<usize> {
        let target = self.push_target(tween, surface)?;
        let index = self.len() - 1;
        Inner::handle(&Rc::downgrade(&self.inner), &target, ToggleAction::Play);
        Some(index)
    }

    pub fn len(&self) -> usize {
        self.inner.state.borrow().targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn phase(&self, index: usize) -> Option<Phase> {
        let state = self.inner.state.borrow();
        state.targets.get(index).map(|t| t.borrow().animation.phase())
    }

    pub fn started_at(&self, index: usize) -> Option<Duration> {
        let state = self.inner.state.borrow();
        state
            .targets
            .get(index)
            .and_then(|t| t.borrow().animation.started_at())
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.state.borrow().disposed
    }

    /// Cancel pending setup, stop the frame loop and drop every
    /// subscription. Safe to call any number of times.
    pub fn dispose(&self) {
        self.inner.dispose();
    }

    fn push_target(
        &self,
        tween: Tween,
        surface: Rc<dyn Surface>,
    ) -> Option<Rc<RefCell<Animated>>> {
        let mut state = self.inner.state.borrow_mut();
        if state.disposed {
            return None;
        }
        let target = Rc::new(RefCell::new(Animated {
            animation: TargetAnimation::new(tween),
            surface,
            last: None,
        }));
        state.targets.push(target.clone());
        Some(target)
    }
}

impl Inner {
    fn handle(weak: &Weak<Inner>, target: &Rc<RefCell<Animated>>, action: ToggleAction) {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        if inner.state.borrow().disposed {
            return;
        }
        let now = inner.scheduler.now();
        {
            let mut target = target.borrow_mut();
            match action {
                ToggleAction::None => return,
                ToggleAction::Play => target.animation.play(now),
                ToggleAction::Reverse => target.animation.reverse(now),
                ToggleAction::Reset => target.animation.reset(),
            }
            target.render(now);
        }
        inner.ensure_frames();
    }

    fn ensure_frames(self: &Rc<Self>) {
        if self.state.borrow().frame.is_some() {
            return;
        }
        let weak = Rc::downgrade(self);
        let res = self.scheduler.set_interval(
            self.config.frame_interval(),
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.frame();
                }
            }),
        );
        match res {
            Ok(id) => {
                let guard = TimerGuard::new(self.scheduler.clone(), id);
                self.state.borrow_mut().frame = Some(guard);
            }
            Err(e) => log::warn!("animation frames unavailable: {e}"),
        }
    }

    fn frame(&self) {
        let now = self.scheduler.now();
        let targets = self.state.borrow().targets.clone();
        let mut animating = false;
        for target in targets {
            let mut target = target.borrow_mut();
            animating |= target.animation.update(now);
            target.render(now);
        }
        if !animating {
            let idle = self.state.borrow_mut().frame.take();
            drop(idle);
        }
    }

    fn dispose(&self) {
        let (setup, frame, subscriptions) = {
            let mut state = self.state.borrow_mut();
            if state.disposed {
                return;
            }
            state.disposed = true;
            state.targets.clear();
            (
                state.setup.take(),
                state.frame.take(),
                std::mem::take(&mut state.subscriptions),
            )
        };
        drop(setup);
        drop(frame);
        for id in subscriptions {
            self.source.unsubscribe(id);
        }
        log::debug!("animation controller disposed");
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::testing::ManualScheduler;
    use crate::motion::{Bounds, Profile, ScrollTracker};

    #[derive(Default)]
    struct Recorder {
        poses: RefCell<Vec<Pose>>,
    }

    impl Recorder {
        fn last(&self) -> Option<Pose> {
            self.poses.borrow().last().copied()
        }
    }

    impl Surface for Recorder {
        fn set_text(&self, _text: &str) {}

        fn apply(&self, pose: &Pose) {
            self.poses.borrow_mut().push(*pose);
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn section() -> Measure {
        Rc::new(|| Some(Bounds::new(2000.0, 600.0)))
    }

    struct Fixture {
        clock: ManualScheduler,
        tracker: ScrollTracker,
        controller: AnimationController,
    }

    fn fixture() -> Fixture {
        let clock = ManualScheduler::new();
        let tracker = ScrollTracker::new();
        let controller = AnimationController::new(
            Rc::new(clock.clone()),
            Rc::new(tracker.clone()),
            MotionConfig::default(),
        );
        tracker.update(0.0, 1000.0);
        Fixture {
            clock,
            tracker,
            controller,
        }
    }

    fn register_cards(controller: &AnimationController, n: usize) -> Vec<Rc<Recorder>> {
        (0..n)
            .map(|i| {
                let surface = Rc::new(Recorder::default());
                let profile = Profile::OutlinedCard(i);
                controller.register(Registration {
                    trigger: section(),
                    zone: profile.zone(),
                    actions: profile.actions(),
                    tween: profile.tween(),
                    surface: surface.clone(),
                });
                surface
            })
            .collect()
    }

    #[test]
    fn test_cards_reveal_and_reverse() {
        let f = fixture();
        let cards = register_cards(&f.controller, 3);
        let before = Profile::OutlinedCard(0).tween().from;
        for card in &cards {
            assert_eq!(card.last(), Some(before));
        }

        // "top 75%" of a section at 2000px in a 1000px viewport starts at 1250
        f.tracker.update(1300.0, 1000.0);
        f.clock.advance(ms(2000));
        for i in 0..3 {
            assert_eq!(f.controller.phase(i), Some(Phase::Shown));
            assert_eq!(cards[i].last(), Some(Pose::IDENTITY));
        }
        assert_eq!(f.clock.active_timers(), 0, "frame loop stops when idle");

        f.tracker.update(1000.0, 1000.0);
        f.clock.advance(ms(2000));
        for i in 0..3 {
            assert_eq!(f.controller.phase(i), Some(Phase::Hidden));
            assert_eq!(cards[i].last(), Some(before));
        }

        // re-entering replays
        f.tracker.update(1300.0, 1000.0);
        assert!(matches!(f.controller.phase(0), Some(Phase::Entering { .. })));
    }

    #[test]
    fn test_stagger_start_times() {
        let f = fixture();
        register_cards(&f.controller, 5);
        f.clock.advance(ms(40));
        f.tracker.update(1300.0, 1000.0);
        let first = f.controller.started_at(0).unwrap();
        assert_eq!(first, ms(40));
        for i in 0..5 {
            let start = f.controller.started_at(i).unwrap();
            assert_eq!(start - first, ms(100) * i as u32);
        }
    }

    #[test]
    fn test_leaving_forward_does_nothing() {
        let f = fixture();
        register_cards(&f.controller, 1);
        f.tracker.update(1300.0, 1000.0);
        f.clock.advance(ms(1000));
        f.tracker.update(9000.0, 1000.0);
        f.clock.advance(ms(1000));
        assert_eq!(f.controller.phase(0), Some(Phase::Shown));
    }

    #[test]
    fn test_trigger_measured_before_transform() {
        let f = fixture();
        let surface = Rc::new(Recorder::default());
        let applied = surface.clone();
        // layout top 2000, shifted by whatever pose is currently applied
        let trigger: Measure = Rc::new(move || {
            let shift = applied.last().map_or(0.0, |pose| pose.y);
            Some(Bounds::new(2000.0 + shift, 600.0))
        });
        let profile = Profile::Section;
        f.controller.register(Registration {
            trigger,
            zone: profile.zone(),
            actions: profile.actions(),
            tween: profile.tween(),
            surface: surface.clone(),
        });
        assert_eq!(surface.last(), Some(profile.tween().from));

        // "top 85%" of a section at 2000px in a 1000px viewport starts at 1150
        f.tracker.update(1155.0, 1000.0);
        assert!(matches!(f.controller.phase(0), Some(Phase::Entering { .. })));
    }

    #[test]
    fn test_setup_is_deferred() {
        let f = fixture();
        let surface = Rc::new(Recorder::default());
        let s = surface.clone();
        let trigger = section();
        f.controller
            .schedule_setup(move |c| {
                let profile = Profile::Section;
                c.register(Registration {
                    trigger,
                    zone: profile.zone(),
                    actions: profile.actions(),
                    tween: profile.tween(),
                    surface: s,
                });
            })
            .unwrap();
        f.clock.advance(ms(99));
        assert!(f.controller.is_empty());
        f.clock.advance(ms(1));
        assert_eq!(f.controller.len(), 1);
        assert_eq!(surface.last(), Some(Profile::Section.tween().from));
    }

    #[test]
    fn test_play_on_mount() {
        let f = fixture();
        let surface = Rc::new(Recorder::default());
        f.controller
            .play_on_mount(Profile::Header.tween(), surface.clone());
        f.clock.advance(ms(800));
        assert_eq!(f.controller.phase(0), Some(Phase::Shown));
        assert_eq!(surface.last(), Some(Pose::IDENTITY));
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let f = fixture();
        register_cards(&f.controller, 3);
        f.controller.schedule_setup(|_| {}).unwrap();
        f.tracker.update(1300.0, 1000.0);
        assert_eq!(f.tracker.len(), 3);
        assert_eq!(f.clock.active_timers(), 2);

        f.controller.dispose();
        f.controller.dispose();
        assert!(f.controller.is_disposed());
        assert!(f.tracker.is_empty());
        assert_eq!(f.clock.active_timers(), 0);
        assert_eq!(f.clock.effective_cancels(), 2);

        // registrations after teardown are refused
        let late = Rc::new(Recorder::default());
        let profile = Profile::Section;
        let index = f.controller.register(Registration {
            trigger: section(),
            zone: profile.zone(),
            actions: profile.actions(),
            tween: profile.tween(),
            surface: late.clone(),
        });
        assert_eq!(index, None);
        assert_eq!(late.last(), None);
        assert!(f.tracker.is_empty());
    }

    #[test]
    fn test_drop_releases_everything() {
        let f = fixture();
        register_cards(&f.controller, 2);
        f.tracker.update(1300.0, 1000.0);
        let Fixture {
            clock,
            tracker,
            controller,
        } = f;
        drop(controller);
        assert!(tracker.is_empty());
        assert_eq!(clock.active_timers(), 0);
    }

    #[test]
    fn test_setup_never_runs_after_dispose() {
        let f = fixture();
        let ran = Rc::new(RefCell::new(false));
        let r = ran.clone();
        f.controller
            .schedule_setup(move |_| *r.borrow_mut() = true)
            .unwrap();
        f.controller.dispose();
        f.clock.advance(ms(500));
        assert!(!*ran.borrow());
    }

    #[test]
    fn test_failing_scheduler_degrades() {
        let tracker = ScrollTracker::new();
        let controller = AnimationController::new(
            Rc::new(ManualScheduler::failing()),
            Rc::new(tracker.clone()),
            MotionConfig::default(),
        );
        assert!(controller.schedule_setup(|_| {}).is_err());
        // the frame loop can't start but crossings still move the state machine
        let surface = Rc::new(Recorder::default());
        controller.play_on_mount(Profile::Header.tween(), surface.clone());
        assert!(matches!(controller.phase(0), Some(Phase::Entering { .. })));
    }
}
