use leptos::{html, prelude::*};

#[cfg(feature = "hydrate")]
use std::rc::Rc;

#[cfg(feature = "hydrate")]
use leptos_use::{use_window_scroll, use_window_size, UseWindowSizeReturn};
#[cfg(feature = "hydrate")]
use wasm_bindgen::JsCast;
#[cfg(feature = "hydrate")]
use web_sys::{Element, MouseEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

#[cfg(feature = "hydrate")]
use super::browser::{document_query_all, measure, query, query_all, BrowserScheduler, ElementSurface};
#[cfg(feature = "hydrate")]
use crate::content::portfolio;
#[cfg(feature = "hydrate")]
use crate::motion::{
    AnimationController, Profile, Registration, Scheduler, Script, ScrollTracker, Typewriter,
    VisibilitySource,
};

/// Elements with a dedicated profile; the generic card reveal skips them.
#[cfg(feature = "hydrate")]
const OWN_PROFILE: &str = ".skill-card, .contact-card, .contact-main, .hero-heading, .hero-subtitle";

pub const SITE_HEADER_ID: &str = "site-header";

/// Intro tweens plus every scroll-linked reveal on the page. Everything is
/// released when the calling view is cleaned up.
pub fn use_page_motion() {
    #[cfg(feature = "hydrate")]
    {
        let tracker = StoredValue::new_local(ScrollTracker::new());
        let controller = StoredValue::new_local(None::<AnimationController>);

        let (_, scroll_y) = use_window_scroll();
        let UseWindowSizeReturn { width, height } = use_window_size();
        Effect::new(move |_| {
            let (y, h) = (scroll_y.get(), height.get());
            tracker.with_value(|t| t.update(y, h));
        });
        Effect::new(move |_| {
            width.track();
            tracker.with_value(|t| t.refresh());
        });

        Effect::new(move |_| {
            let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler::new());
            let source: Rc<dyn VisibilitySource> = Rc::new(tracker.get_value());
            let ctl = AnimationController::new(scheduler, source, portfolio().motion);
            play_intros(&ctl);
            if let Err(e) = ctl.schedule_setup(register_page) {
                log::warn!("scroll animations disabled: {e}");
            }
            let previous = controller.try_update_value(|c| c.replace(ctl)).flatten();
            if let Some(previous) = previous {
                previous.dispose();
            }
        });

        on_cleanup(move || {
            if let Some(Some(ctl)) = controller.try_update_value(|c| c.take()) {
                ctl.dispose();
            }
        });
    }
}

#[cfg(feature = "hydrate")]
fn play_intros(controller: &AnimationController) {
    let intros = [
        (format!("#{SITE_HEADER_ID}"), Profile::Header),
        (".hero-heading".to_string(), Profile::HeroHeading),
        (".hero-subtitle".to_string(), Profile::HeroSubtitle),
    ];
    for (selector, profile) in intros {
        let Some(surface) = query(&selector).and_then(|el| ElementSurface::new(&el)) else {
            continue;
        };
        controller.play_on_mount(profile.tween(), Rc::new(surface));
    }
}

#[cfg(feature = "hydrate")]
fn register_page(controller: &AnimationController) {
    for section in document_query_all("section") {
        reveal(controller, &section, &section, Profile::Section);
        let cards = query_all(&section, ".outlined")
            .into_iter()
            .filter(|card| !card.matches(OWN_PROFILE).unwrap_or(false));
        for (i, card) in cards.enumerate() {
            reveal(controller, &section, &card, Profile::OutlinedCard(i));
        }
    }

    if let Some(proof) = query("#proof") {
        for (i, logo) in query_all(&proof, ".logo-item").iter().enumerate() {
            reveal(controller, &proof, logo, Profile::LogoTile(i));
        }
    }

    if let Some(skills) = query("#skills") {
        for (i, card) in query_all(&skills, ".skill-card").iter().enumerate() {
            reveal(controller, &skills, card, Profile::SkillCard(i));
        }
        for (i, item) in query_all(&skills, ".skill-item").iter().enumerate() {
            reveal(controller, &skills, item, Profile::SkillItem(i));
        }
    }

    if let Some(contact) = query("#contact") {
        if let Ok(Some(main)) = contact.query_selector(".contact-main") {
            reveal(controller, &contact, &main, Profile::ContactMain);
        }
        if let Ok(Some(sidebar)) = contact.query_selector(".contact-sidebar") {
            reveal(controller, &contact, &sidebar, Profile::ContactSidebar);
        }
        for (i, card) in query_all(&contact, ".contact-card").iter().enumerate() {
            reveal(controller, &contact, card, Profile::ContactCard(i));
        }
    }

    log::debug!("{} animation targets registered", controller.len());
}

#[cfg(feature = "hydrate")]
fn reveal(controller: &AnimationController, trigger: &Element, target: &Element, profile: Profile) {
    let Some(surface) = ElementSurface::new(target) else {
        return;
    };
    controller.register(Registration {
        trigger: measure(trigger.clone()),
        zone: profile.zone(),
        actions: profile.actions(),
        tween: profile.tween(),
        surface: Rc::new(surface),
    });
}

/// Types `lines` into the node one character per tick until the view goes away.
pub fn use_typewriter(node: NodeRef<html::Pre>, lines: &'static [&'static str]) {
    #[cfg(feature = "hydrate")]
    {
        let running = StoredValue::new_local(None::<Typewriter>);
        Effect::new(move |_| {
            let Some(pre) = node.get() else {
                return;
            };
            let Some(surface) = ElementSurface::new(&pre) else {
                return;
            };
            let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler::new());
            let period = portfolio().motion.tick_period();
            match Typewriter::start(scheduler, Script::new(lines), period, surface) {
                // replacing drops any previous run, which stops its timer
                Ok(typewriter) => running.set_value(Some(typewriter)),
                Err(e) => log::warn!("typewriter not started: {e}"),
            }
        });
        on_cleanup(move || {
            if let Some(Some(typewriter)) = running.try_update_value(|t| t.take()) {
                typewriter.dispose();
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (node, lines);
}

/// Smooth scrolling for in-page `#fragment` links. Unknown fragments are
/// swallowed without scrolling.
pub fn use_smooth_anchors() {
    #[cfg(feature = "hydrate")]
    {
        let handle = window_event_listener(leptos::ev::click, |ev: MouseEvent| {
            let anchor = ev
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("a[href^='#']").ok().flatten());
            let Some(href) = anchor.and_then(|a| a.get_attribute("href")) else {
                return;
            };
            ev.prevent_default();
            let Some(target) = query(&href) else {
                return;
            };
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        });
        on_cleanup(move || handle.remove());
    }
}
