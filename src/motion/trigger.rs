use std::fmt;
use std::str::FromStr;

use super::MotionError;

/// Vertical extent of a trigger element in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
}

impl Edge {
    fn fraction(self) -> f64 {
        match self {
            Edge::Top => 0.0,
            Edge::Center => 0.5,
            Edge::Bottom => 1.0,
        }
    }
}

/// "When `edge` of the element reaches `viewport_pct` down the viewport".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    pub edge: Edge,
    pub viewport_pct: f64,
}

impl Threshold {
    pub const fn new(edge: Edge, viewport_pct: f64) -> Self {
        Self { edge, viewport_pct }
    }

    /// Scroll offset at which this threshold is met.
    pub fn scroll_offset(&self, bounds: &Bounds, viewport_height: f64) -> f64 {
        bounds.top + bounds.height * self.edge.fraction()
            - viewport_height * self.viewport_pct / 100.0
    }
}

impl FromStr for Threshold {
    type Err = MotionError;

    /// Accepts `"<edge> <viewport>"`, where both parts are `top`, `center`,
    /// `bottom` or a percentage.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MotionError::InvalidTrigger(s.to_string());
        let mut parts = s.split_whitespace();
        let edge = match parts.next().ok_or_else(invalid)? {
            "top" => Edge::Top,
            "center" => Edge::Center,
            "bottom" => Edge::Bottom,
            _ => return Err(invalid()),
        };
        let viewport_pct = match parts.next().ok_or_else(invalid)? {
            "top" => 0.0,
            "center" => 50.0,
            "bottom" => 100.0,
            pct => pct
                .strip_suffix('%')
                .and_then(|n| n.parse::<f64>().ok())
                .filter(|n| n.is_finite())
                .ok_or_else(invalid)?,
        };
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self { edge, viewport_pct })
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edge = match self.edge {
            Edge::Top => "top",
            Edge::Center => "center",
            Edge::Bottom => "bottom",
        };
        write!(f, "{} {}%", edge, self.viewport_pct)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZonePosition {
    Before,
    Active,
    After,
}

/// Band of scroll offsets in which a target counts as "in view".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerZone {
    pub start: Threshold,
    pub end: Threshold,
}

impl TriggerZone {
    pub const DEFAULT_END: Threshold = Threshold::new(Edge::Bottom, 0.0);

    pub const fn new(start: Threshold, end: Threshold) -> Self {
        Self { start, end }
    }

    pub const fn starting(start: Threshold) -> Self {
        Self {
            start,
            end: Self::DEFAULT_END,
        }
    }

    pub fn parse(start: &str, end: Option<&str>) -> Result<Self, MotionError> {
        let start = start.parse()?;
        let end = match end {
            Some(end) => end.parse()?,
            None => Self::DEFAULT_END,
        };
        Ok(Self { start, end })
    }

    pub fn scroll_range(&self, bounds: &Bounds, viewport_height: f64) -> (f64, f64) {
        let start = self.start.scroll_offset(bounds, viewport_height);
        let end = self.end.scroll_offset(bounds, viewport_height);
        (start, end.max(start))
    }

    pub fn classify(&self, bounds: &Bounds, viewport_height: f64, scroll_y: f64) -> ZonePosition {
        let (start, end) = self.scroll_range(bounds, viewport_height);
        if scroll_y < start {
            ZonePosition::Before
        } else if scroll_y > end {
            ZonePosition::After
        } else {
            ZonePosition::Active
        }
    }
}

/// One boundary crossing, in the order the scroll position passed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

impl Crossing {
    /// Crossings implied by moving from `from` to `to`. Skipping over the
    /// whole zone yields both boundary crossings.
    pub fn between(from: ZonePosition, to: ZonePosition) -> Vec<Crossing> {
        use ZonePosition::*;
        match (from, to) {
            (Before, Active) => vec![Crossing::Enter],
            (Before, After) => vec![Crossing::Enter, Crossing::Leave],
            (Active, After) => vec![Crossing::Leave],
            (After, Active) => vec![Crossing::EnterBack],
            (After, Before) => vec![Crossing::EnterBack, Crossing::LeaveBack],
            (Active, Before) => vec![Crossing::LeaveBack],
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    None,
    Play,
    Reverse,
    Reset,
}

/// What a target does on each of the four crossings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleActions {
    pub on_enter: ToggleAction,
    pub on_leave: ToggleAction,
    pub on_enter_back: ToggleAction,
    pub on_leave_back: ToggleAction,
}

impl Default for ToggleActions {
    fn default() -> Self {
        Self::PLAY_NONE_NONE_REVERSE
    }
}

impl ToggleActions {
    pub const PLAY_NONE_NONE_REVERSE: ToggleActions = ToggleActions {
        on_enter: ToggleAction::Play,
        on_leave: ToggleAction::None,
        on_enter_back: ToggleAction::None,
        on_leave_back: ToggleAction::Reverse,
    };

    /// Forward-only: plays the first time and never rewinds.
    pub const ONCE: ToggleActions = ToggleActions {
        on_enter: ToggleAction::Play,
        on_leave: ToggleAction::None,
        on_enter_back: ToggleAction::None,
        on_leave_back: ToggleAction::None,
    };

    pub fn action_for(&self, crossing: Crossing) -> ToggleAction {
        match crossing {
            Crossing::Enter => self.on_enter,
            Crossing::Leave => self.on_leave,
            Crossing::EnterBack => self.on_enter_back,
            Crossing::LeaveBack => self.on_leave_back,
        }
    }
}

impl FromStr for ToggleActions {
    type Err = MotionError;

    /// Four space separated words, e.g. `"play none none reverse"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let actions = s
            .split_whitespace()
            .map(|w| match w {
                "none" => Ok(ToggleAction::None),
                "play" => Ok(ToggleAction::Play),
                "reverse" => Ok(ToggleAction::Reverse),
                "reset" => Ok(ToggleAction::Reset),
                _ => Err(MotionError::InvalidTrigger(s.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;
        match actions[..] {
            [on_enter, on_leave, on_enter_back, on_leave_back] => Ok(Self {
                on_enter,
                on_leave,
                on_enter_back,
                on_leave_back,
            }),
            _ => Err(MotionError::InvalidTrigger(s.to_string())),
        }
    }
}
