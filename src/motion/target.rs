use std::time::Duration;

use super::{Pose, Tween};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Before,
    /// Running forward since `at`, beginning at `from` progress after `wait`.
    Entering { at: Duration, from: f64, wait: Duration },
    Shown,
    Reversing { at: Duration, from: f64 },
    Hidden,
}

/// Animation state of a single target, driven by crossing events.
///
/// Progress is linear in `[0, 1]`; the tween's easing is applied only when
/// sampling, so a reverse retraces the same curve.
#[derive(Debug, Clone)]
pub struct TargetAnimation {
    tween: Tween,
    phase: Phase,
}

impl TargetAnimation {
    pub fn new(tween: Tween) -> Self {
        Self {
            tween,
            phase: Phase::Before,
        }
    }

    pub fn tween(&self) -> &Tween {
        &self.tween
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Entering { .. } | Phase::Reversing { .. })
    }

    pub fn progress(&self, now: Duration) -> f64 {
        let span = self.tween.duration.as_secs_f64();
        match self.phase {
            Phase::Before | Phase::Hidden => 0.0,
            Phase::Shown => 1.0,
            Phase::Entering { at, from, wait } => {
                let run = now.saturating_sub(at).saturating_sub(wait).as_secs_f64();
                if span == 0.0 {
                    if now >= at + wait {
                        1.0
                    } else {
                        from
                    }
                } else {
                    (from + run / span).min(1.0)
                }
            }
            Phase::Reversing { at, from } => {
                if span == 0.0 {
                    return 0.0;
                }
                let run = now.saturating_sub(at).as_secs_f64();
                (from - run / span).max(0.0)
            }
        }
    }

    /// When forward motion began (or will begin) for the current play.
    pub fn started_at(&self) -> Option<Duration> {
        match self.phase {
            Phase::Entering { at, wait, .. } => Some(at + wait),
            _ => None,
        }
    }

    pub fn play(&mut self, now: Duration) {
        self.phase = match self.phase {
            Phase::Before | Phase::Hidden => Phase::Entering {
                at: now,
                from: 0.0,
                wait: self.tween.delay,
            },
            Phase::Reversing { .. } => Phase::Entering {
                at: now,
                from: self.progress(now),
                wait: Duration::ZERO,
            },
            other => other,
        };
        self.update(now);
    }

    pub fn reverse(&mut self, now: Duration) {
        self.phase = match self.phase {
            Phase::Entering { .. } | Phase::Shown => Phase::Reversing {
                at: now,
                from: self.progress(now),
            },
            other => other,
        };
        self.update(now);
    }

    pub fn reset(&mut self) {
        self.phase = Phase::Before;
    }

    /// Settle finished runs. Returns true while still animating.
    pub fn update(&mut self, now: Duration) -> bool {
        match self.phase {
            Phase::Entering { .. } if self.progress(now) >= 1.0 => self.phase = Phase::Shown,
            Phase::Reversing { .. } if self.progress(now) <= 0.0 => self.phase = Phase::Hidden,
            _ => {}
        }
        self.is_animating()
    }

    pub fn pose(&self, now: Duration) -> Pose {
        self.tween.pose_at(self.progress(now))
    }
}
