use std::fmt;
use std::time::Duration;

use super::{Easing, Pose, Tween};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCoord {
    pub column: u32,
    pub row: u32,
}

impl Default for GridCoord {
    fn default() -> Self {
        Self { column: 1, row: 1 }
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.column, self.row)
    }
}

/// Maps pointer positions onto the page's column grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridReadout {
    columns: u32,
    row_height: f64,
}

impl Default for GridReadout {
    fn default() -> Self {
        Self::new(12, 32.0)
    }
}

impl GridReadout {
    pub fn new(columns: u32, row_height: f64) -> Self {
        Self {
            columns: columns.max(1),
            row_height: if row_height > 0.0 { row_height } else { 32.0 },
        }
    }

    pub fn locate(&self, x: f64, y: f64, viewport_width: f64) -> GridCoord {
        let col_width = viewport_width / self.columns as f64;
        let column = if col_width > 0.0 {
            ((x / col_width).floor() + 1.0).clamp(1.0, self.columns as f64) as u32
        } else {
            1
        };
        let row = ((y / self.row_height).floor() + 1.0).max(1.0) as u32;
        GridCoord { column, row }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReadoutChange {
    /// First move after being hidden; the HUD should appear.
    Shown(GridCoord),
    Moved(GridCoord),
    Hidden,
}

/// Pointer readout: latest grid coordinate plus visibility.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReadoutState {
    grid: GridReadout,
    coord: GridCoord,
    visible: bool,
}

impl ReadoutState {
    pub fn new(grid: GridReadout) -> Self {
        Self {
            grid,
            ..Self::default()
        }
    }

    pub fn coord(&self) -> GridCoord {
        self.coord
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn label(&self) -> String {
        self.coord.to_string()
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64, viewport_width: f64) -> ReadoutChange {
        self.coord = self.grid.locate(x, y, viewport_width);
        if self.visible {
            ReadoutChange::Moved(self.coord)
        } else {
            self.visible = true;
            ReadoutChange::Shown(self.coord)
        }
    }

    /// Returns `None` when already hidden.
    pub fn pointer_left(&mut self) -> Option<ReadoutChange> {
        if !self.visible {
            return None;
        }
        self.visible = false;
        Some(ReadoutChange::Hidden)
    }
}

/// Follow and show/hide motion of the HUD element, each retargeted from the
/// currently displayed pose.
#[derive(Debug, Clone)]
pub struct HudMotion {
    offset: f64,
    position: (Tween, Duration),
    presence: (Tween, Duration),
}

impl HudMotion {
    const FOLLOW: Duration = Duration::from_millis(100);
    const FADE: Duration = Duration::from_millis(200);

    pub fn new(offset: f64) -> Self {
        let start = Pose::hidden().scale(0.8);
        Self {
            offset,
            position: (
                Tween::between(start, start, Duration::ZERO, Easing::Linear),
                Duration::ZERO,
            ),
            presence: (
                Tween::between(start, start, Duration::ZERO, Easing::Linear),
                Duration::ZERO,
            ),
        }
    }

    fn sample((tween, at): &(Tween, Duration), now: Duration) -> Pose {
        tween.sample(now.saturating_sub(*at))
    }

    pub fn follow(&mut self, now: Duration, x: f64, y: f64) {
        let from = Self::sample(&self.position, now);
        let to = from.x(x + self.offset).y(y + self.offset);
        self.position = (
            Tween::between(from, to, Self::FOLLOW, Easing::Power2Out),
            now,
        );
    }

    pub fn show(&mut self, now: Duration) {
        let from = Self::sample(&self.presence, now);
        self.presence = (
            Tween::between(from, from.opacity(1.0).scale(1.0), Self::FADE, Easing::BACK),
            now,
        );
    }

    pub fn hide(&mut self, now: Duration) {
        let from = Self::sample(&self.presence, now);
        self.presence = (
            Tween::between(from, from.opacity(0.0).scale(0.8), Self::FADE, Easing::Power2Out),
            now,
        );
    }

    /// Position from the follow tween, opacity and scale from show/hide.
    pub fn pose(&self, now: Duration) -> Pose {
        let position = Self::sample(&self.position, now);
        let presence = Self::sample(&self.presence, now);
        position.opacity(presence.opacity).scale(presence.scale)
    }

    pub fn is_settled(&self, now: Duration) -> bool {
        let (follow, a) = &self.position;
        let (fade, b) = &self.presence;
        follow.is_finished(now.saturating_sub(*a)) && fade.is_finished(now.saturating_sub(*b))
    }
}
