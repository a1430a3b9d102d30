use leptos::{html, prelude::*};

use crate::motion::GridCoord;

#[cfg(feature = "hydrate")]
use std::{cell::RefCell, rc::Rc};

#[cfg(feature = "hydrate")]
use leptos_use::{use_window_size, UseWindowSizeReturn};
#[cfg(feature = "hydrate")]
use web_sys::MouseEvent;

#[cfg(feature = "hydrate")]
use super::browser::{BrowserScheduler, ElementSurface};
#[cfg(feature = "hydrate")]
use crate::content::portfolio;
#[cfg(feature = "hydrate")]
use crate::motion::{HudMotion, ReadoutChange, ReadoutState, Scheduler, Surface, TimerGuard};

/// Readout state plus the tweens that move the HUD element around.
#[cfg(feature = "hydrate")]
struct HudDriver {
    scheduler: Rc<dyn Scheduler>,
    surface: ElementSurface,
    readout: ReadoutState,
    motion: HudMotion,
    frame: Option<TimerGuard>,
}

#[cfg(feature = "hydrate")]
impl HudDriver {
    fn new(surface: ElementSurface) -> Self {
        let config = portfolio().motion;
        let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler::new());
        let motion = HudMotion::new(config.hud_offset);
        surface.apply(&motion.pose(scheduler.now()));
        Self {
            scheduler,
            surface,
            readout: ReadoutState::new(config.readout()),
            motion,
            frame: None,
        }
    }

    /// Returns the new label.
    fn pointer_moved(this: &Rc<RefCell<Self>>, x: f64, y: f64, viewport_width: f64) -> String {
        let label = {
            let mut driver = this.borrow_mut();
            let now = driver.scheduler.now();
            let change = driver.readout.pointer_moved(x, y, viewport_width);
            driver.motion.follow(now, x, y);
            if let ReadoutChange::Shown(_) = change {
                driver.motion.show(now);
            }
            driver.readout.label()
        };
        Self::ensure_frames(this);
        label
    }

    fn pointer_left(this: &Rc<RefCell<Self>>) {
        {
            let mut driver = this.borrow_mut();
            if driver.readout.pointer_left().is_none() {
                return;
            }
            let now = driver.scheduler.now();
            driver.motion.hide(now);
        }
        Self::ensure_frames(this);
    }

    fn ensure_frames(this: &Rc<RefCell<Self>>) {
        let scheduler = {
            let driver = this.borrow();
            if driver.frame.is_some() {
                return;
            }
            driver.scheduler.clone()
        };
        let weak = Rc::downgrade(this);
        let res = scheduler.set_interval(
            portfolio().motion.frame_interval(),
            Box::new(move || {
                let Some(driver) = weak.upgrade() else {
                    return;
                };
                let idle = {
                    let mut driver = driver.borrow_mut();
                    let now = driver.scheduler.now();
                    driver.surface.apply(&driver.motion.pose(now));
                    if driver.motion.is_settled(now) {
                        driver.frame.take()
                    } else {
                        None
                    }
                };
                drop(idle);
            }),
        );
        match res {
            Ok(id) => this.borrow_mut().frame = Some(TimerGuard::new(scheduler, id)),
            Err(e) => log::warn!("cursor readout frozen: {e}"),
        }
    }
}

/// Floating `(column,row)` readout that trails the pointer.
#[component]
pub fn CursorHud() -> impl IntoView {
    let hud_ref = NodeRef::<html::Div>::new();
    let (label, set_label) = signal(GridCoord::default().to_string());

    #[cfg(feature = "hydrate")]
    {
        let driver = StoredValue::new_local(None::<Rc<RefCell<HudDriver>>>);
        let UseWindowSizeReturn { width, .. } = use_window_size();

        Effect::new(move |_| {
            let Some(el) = hud_ref.get() else {
                return;
            };
            if let Some(surface) = ElementSurface::new(&el) {
                driver.set_value(Some(Rc::new(RefCell::new(HudDriver::new(surface)))));
            }
        });

        let on_move = window_event_listener(leptos::ev::mousemove, move |ev: MouseEvent| {
            let (x, y) = (ev.client_x() as f64, ev.client_y() as f64);
            let viewport_width = width.get_untracked();
            let label = driver
                .try_with_value(|d| {
                    d.as_ref()
                        .map(|d| HudDriver::pointer_moved(d, x, y, viewport_width))
                })
                .flatten();
            if let Some(label) = label {
                set_label.set(label);
            }
        });
        // mouseout with no related target means the pointer left the window
        let on_leave = window_event_listener(leptos::ev::mouseout, move |ev: MouseEvent| {
            if ev.related_target().is_some() {
                return;
            }
            driver.try_with_value(|d| {
                if let Some(d) = d {
                    HudDriver::pointer_left(d);
                }
            });
        });

        on_cleanup(move || {
            on_move.remove();
            on_leave.remove();
            if let Some(Some(d)) = driver.try_update_value(|d| d.take()) {
                d.borrow_mut().frame.take();
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = set_label;

    view! {
        <div node_ref=hud_ref class="cursor-hud opacity-0" aria-hidden="true">
            {label}
        </div>
    }
}
