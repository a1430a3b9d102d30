//! Scroll-linked animation and typewriter core.
//!
//! Nothing in here touches the DOM directly. Timers come from a [`Scheduler`],
//! scroll crossings from a [`VisibilitySource`] and every visual change goes
//! out through a [`Surface`], so the whole module runs under plain `cargo test`.

mod controller;
mod observer;
mod profile;
mod readout;
mod scheduler;
mod target;
mod trigger;
mod tween;
mod typewriter;

pub use controller::{AnimationController, Registration};
pub use observer::{
    CrossingHandler, Direction, Measure, ScrollTracker, SubscriptionId, VisibilitySource,
};
pub use profile::Profile;
pub use readout::{GridCoord, GridReadout, HudMotion, ReadoutChange, ReadoutState};
pub use scheduler::{Scheduler, TimerGuard, TimerId};
pub use target::{Phase, TargetAnimation};
pub use trigger::{
    Bounds, Crossing, Edge, Threshold, ToggleAction, ToggleActions, TriggerZone, ZonePosition,
};
pub use tween::{Easing, Pose, Stagger, Tween};
pub use typewriter::{Cursor, Script, Typewriter};

#[cfg(test)]
pub(crate) use scheduler::testing;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    #[error("Couldn't register timer: {0}")]
    Timer(String),
    #[error("Invalid trigger position: {0}")]
    InvalidTrigger(String),
}

/// Where rendered output goes. Implementations must treat a detached or
/// not-yet-mounted node as a no-op.
pub trait Surface {
    fn set_text(&self, text: &str);
    fn apply(&self, pose: &Pose);
}

/// Timing knobs shared by the hero, the scroll controller and the cursor HUD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub tick_ms: u64,
    pub setup_delay_ms: u64,
    pub frame_ms: u64,
    pub grid_columns: u32,
    pub row_height: f64,
    pub hud_offset: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            tick_ms: 12,
            setup_delay_ms: 100,
            frame_ms: 16,
            grid_columns: 12,
            row_height: 32.0,
            hud_offset: 12.0,
        }
    }
}

impl MotionConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn setup_delay(&self) -> Duration {
        Duration::from_millis(self.setup_delay_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }

    pub fn readout(&self) -> GridReadout {
        GridReadout::new(self.grid_columns, self.row_height)
    }
}
