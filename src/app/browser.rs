use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::motion::{Bounds, Measure, MotionError, Pose, Scheduler, Surface, TimerId};

enum Handle {
    Interval(IntervalHandle),
    Timeout(TimeoutHandle),
}

impl Handle {
    fn clear(self) {
        match self {
            Handle::Interval(h) => h.clear(),
            Handle::Timeout(h) => h.clear(),
        }
    }
}

/// [`Scheduler`] over `setInterval` / `setTimeout` and `performance.now()`.
#[derive(Clone, Default)]
pub struct BrowserScheduler {
    next_id: Rc<Cell<u64>>,
    handles: Rc<RefCell<HashMap<TimerId, Handle>>>,
}

impl BrowserScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> TimerId {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        TimerId(id)
    }
}

impl Scheduler for BrowserScheduler {
    fn now(&self) -> Duration {
        let ms = window()
            .performance()
            .map(|p| p.now())
            .unwrap_or_default();
        Duration::from_secs_f64(ms.max(0.0) / 1000.0)
    }

    fn set_interval(
        &self,
        period: Duration,
        tick: Box<dyn FnMut()>,
    ) -> Result<TimerId, MotionError> {
        let tick = RefCell::new(tick);
        let handle = set_interval_with_handle(
            move || {
                if let Ok(mut f) = tick.try_borrow_mut() {
                    (&mut *f)();
                }
            },
            period,
        )
        .map_err(|e| MotionError::Timer(format!("{e:?}")))?;
        let id = self.next_id();
        self.handles
            .borrow_mut()
            .insert(id, Handle::Interval(handle));
        Ok(id)
    }

    fn set_timeout(
        &self,
        delay: Duration,
        fire: Box<dyn FnOnce()>,
    ) -> Result<TimerId, MotionError> {
        let id = self.next_id();
        let handles = self.handles.clone();
        let handle = set_timeout_with_handle(
            move || {
                handles.borrow_mut().remove(&id);
                fire();
            },
            delay,
        )
        .map_err(|e| MotionError::Timer(format!("{e:?}")))?;
        self.handles.borrow_mut().insert(id, Handle::Timeout(handle));
        Ok(id)
    }

    fn cancel(&self, id: TimerId) {
        let handle = self.handles.borrow_mut().remove(&id);
        if let Some(handle) = handle {
            handle.clear();
        }
    }
}

/// Writes poses as inline `transform` / `opacity` and text as text content.
pub struct ElementSurface {
    el: HtmlElement,
}

impl ElementSurface {
    pub fn new(el: &Element) -> Option<Self> {
        el.dyn_ref::<HtmlElement>()
            .map(|el| Self { el: el.clone() })
    }
}

impl Surface for ElementSurface {
    fn set_text(&self, text: &str) {
        self.el.set_text_content(Some(text));
    }

    fn apply(&self, pose: &Pose) {
        if !self.el.is_connected() {
            return;
        }
        let style = self.el.style();
        if let Err(e) = style
            .set_property("transform", &pose.css_transform())
            .and_then(|_| style.set_property("opacity", &pose.css_opacity()))
        {
            log::debug!("couldn't style element: {e:?}");
        }
    }
}

/// Page-relative layout bounds of `el`, summed up the offset-parent chain
/// so inline transforms don't shift them; `None` once it leaves the document.
pub fn measure(el: Element) -> Measure {
    Rc::new(move || {
        if !el.is_connected() {
            return None;
        }
        let target = el.dyn_ref::<HtmlElement>()?;
        let mut top = 0.0;
        let mut node = Some(target.clone());
        while let Some(current) = node {
            top += f64::from(current.offset_top());
            node = current
                .offset_parent()
                .and_then(|parent| parent.dyn_into::<HtmlElement>().ok());
        }
        Some(Bounds::new(top, f64::from(target.offset_height())))
    })
}

pub fn query(selector: &str) -> Option<Element> {
    document().query_selector(selector).ok().flatten()
}

pub fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn document_query_all(selector: &str) -> Vec<Element> {
    document()
        .document_element()
        .map(|root| query_all(&root, selector))
        .unwrap_or_default()
}
