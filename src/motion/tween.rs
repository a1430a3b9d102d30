use std::f64::consts::TAU;
use std::time::Duration;

/// Visual state of an element relative to its laid-out position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
    pub scale: f64,
    pub rotate: f64,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        x: 0.0,
        y: 0.0,
        opacity: 1.0,
        scale: 1.0,
        rotate: 0.0,
    };

    /// Identity with zero opacity, the usual starting point for a reveal.
    pub const fn hidden() -> Self {
        Pose {
            opacity: 0.0,
            ..Self::IDENTITY
        }
    }

    pub const fn x(self, x: f64) -> Self {
        Pose { x, ..self }
    }

    pub const fn y(self, y: f64) -> Self {
        Pose { y, ..self }
    }

    pub const fn opacity(self, opacity: f64) -> Self {
        Pose { opacity, ..self }
    }

    pub const fn scale(self, scale: f64) -> Self {
        Pose { scale, ..self }
    }

    pub const fn rotate(self, rotate: f64) -> Self {
        Pose { rotate, ..self }
    }

    /// Interpolate between two poses. `t == 0` yields `from` and `t == 1`
    /// yields `to` bit for bit; overshooting easings may go past either.
    pub fn lerp(from: &Pose, to: &Pose, t: f64) -> Pose {
        if t == 0.0 {
            return *from;
        }
        if t == 1.0 {
            return *to;
        }
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Pose {
            x: mix(from.x, to.x),
            y: mix(from.y, to.y),
            opacity: mix(from.opacity, to.opacity),
            scale: mix(from.scale, to.scale),
            rotate: mix(from.rotate, to.rotate),
        }
    }

    pub fn css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({}) rotate({}deg)",
            round3(self.x),
            round3(self.y),
            round3(self.scale),
            round3(self.rotate)
        )
    }

    /// Opacity is clamped here because back/elastic easings overshoot.
    pub fn css_opacity(&self) -> String {
        round3(self.opacity.clamp(0.0, 1.0)).to_string()
    }
}

fn round3(v: f64) -> f64 {
    let r = (v * 1000.0).round() / 1000.0;
    // avoid printing "-0"
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// `1 - (1-t)³`
    Power2Out,
    /// `1 - (1-t)⁴`
    Power3Out,
    BackOut(f64),
    ElasticOut { amplitude: f64, period: f64 },
}

impl Easing {
    pub const BACK: Easing = Easing::BackOut(1.7);

    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match *self {
            Easing::Linear => t,
            Easing::Power2Out => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Easing::Power3Out => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv * inv
            }
            Easing::BackOut(overshoot) => {
                let p = t - 1.0;
                p * p * ((overshoot + 1.0) * p + overshoot) + 1.0
            }
            Easing::ElasticOut { amplitude, period } => {
                let a = amplitude.max(1.0);
                let p = period / amplitude.min(1.0).max(f64::EPSILON);
                let shift = p / TAU * (1.0 / a).asin();
                a * 2f64.powf(-10.0 * t) * ((t - shift) * (TAU / p)).sin() + 1.0
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: Pose,
    pub to: Pose,
    pub duration: Duration,
    pub delay: Duration,
    pub easing: Easing,
}

impl Tween {
    /// Reveal from `from` to the element's natural pose.
    pub fn reveal(from: Pose, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to: Pose::IDENTITY,
            duration,
            delay: Duration::ZERO,
            easing,
        }
    }

    pub fn between(from: Pose, to: Pose, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            delay: Duration::ZERO,
            easing,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Linear progress for a time measured from the end of the delay.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn pose_at(&self, progress: f64) -> Pose {
        Pose::lerp(&self.from, &self.to, self.easing.apply(progress))
    }

    /// Pose at `elapsed` since the tween was started, delay included.
    pub fn sample(&self, elapsed: Duration) -> Pose {
        self.pose_at(self.progress(elapsed.saturating_sub(self.delay)))
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.delay + self.duration
    }
}

/// Per-sibling delay: `base + index × step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stagger {
    pub base: Duration,
    pub step: Duration,
}

impl Stagger {
    pub const fn new(base: Duration, step: Duration) -> Self {
        Self { base, step }
    }

    pub const fn each(step: Duration) -> Self {
        Self {
            base: Duration::ZERO,
            step,
        }
    }

    pub fn delay_for(&self, index: usize) -> Duration {
        self.base + self.step * index as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::Power2Out,
        Easing::Power3Out,
        Easing::BACK,
        Easing::ElasticOut {
            amplitude: 1.0,
            period: 0.8,
        },
    ];

    #[test]
    fn test_easing_boundaries() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{:?} at t=0", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{:?} at t=1", easing);
            assert_eq!(easing.apply(-3.0), 0.0);
            assert_eq!(easing.apply(7.0), 1.0);
        }
    }

    #[test]
    fn test_power_curves() {
        assert!((Easing::Power2Out.apply(0.5) - 0.875).abs() < 1e-9);
        assert!((Easing::Power3Out.apply(0.5) - 0.9375).abs() < 1e-9);
    }

    #[test]
    fn test_back_and_elastic_overshoot() {
        let peak = (1..100)
            .map(|i| Easing::BACK.apply(i as f64 / 100.0))
            .fold(0.0, f64::max);
        assert!(peak > 1.0, "back ease should overshoot, got {peak}");

        let elastic = Easing::ElasticOut {
            amplitude: 1.0,
            period: 0.8,
        };
        let peak = (1..100)
            .map(|i| elastic.apply(i as f64 / 100.0))
            .fold(0.0, f64::max);
        assert!(peak > 1.0);
        assert!((elastic.apply(0.99) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_lerp_endpoints_are_exact() {
        let from = Pose::hidden().y(40.0).scale(0.95);
        assert_eq!(Pose::lerp(&from, &Pose::IDENTITY, 0.0), from);
        assert_eq!(Pose::lerp(&from, &Pose::IDENTITY, 1.0), Pose::IDENTITY);
        let mid = Pose::lerp(&from, &Pose::IDENTITY, 0.5);
        assert!((mid.y - 20.0).abs() < 1e-9);
        assert!((mid.opacity - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_tween_sample_respects_delay() {
        let tween = Tween::reveal(
            Pose::hidden().y(60.0),
            Duration::from_millis(800),
            Easing::Power2Out,
        )
        .with_delay(Duration::from_millis(200));
        assert_eq!(tween.sample(Duration::from_millis(100)), tween.from);
        assert_eq!(tween.sample(Duration::from_millis(200)), tween.from);
        assert_eq!(tween.sample(Duration::from_millis(1000)), Pose::IDENTITY);
        assert!(tween.is_finished(Duration::from_millis(1000)));
        assert!(!tween.is_finished(Duration::from_millis(999)));
    }

    #[test]
    fn test_css_output() {
        let pose = Pose::hidden().x(-60.0).rotate(-5.0);
        assert_eq!(
            pose.css_transform(),
            "translate(-60px, 0px) scale(1) rotate(-5deg)"
        );
        assert_eq!(pose.css_opacity(), "0");
        assert_eq!(Pose::IDENTITY.opacity(1.2).css_opacity(), "1");
    }

    #[test]
    fn test_stagger() {
        let stagger = Stagger::new(Duration::from_millis(800), Duration::from_millis(50));
        assert_eq!(stagger.delay_for(0), Duration::from_millis(800));
        assert_eq!(stagger.delay_for(3), Duration::from_millis(950));
        assert_eq!(
            Stagger::each(Duration::from_millis(100)).delay_for(2),
            Duration::from_millis(200)
        );
    }
}
