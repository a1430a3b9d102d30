use std::time::Duration;

use super::{Easing, Edge, Pose, Stagger, Threshold, ToggleActions, TriggerZone, Tween};

const fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

const ELASTIC: Easing = Easing::ElasticOut {
    amplitude: 1.0,
    period: 0.8,
};

/// Canned reveal for each kind of element on the page. Indexed variants
/// carry the element's ordinal among its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Section,
    OutlinedCard(usize),
    Header,
    LogoTile(usize),
    SkillCard(usize),
    SkillItem(usize),
    ContactMain,
    ContactSidebar,
    ContactCard(usize),
    HeroHeading,
    HeroSubtitle,
}

impl Profile {
    pub fn tween(&self) -> Tween {
        let hidden = Pose::hidden();
        let tween = match *self {
            Profile::Section => Tween::reveal(hidden.y(60.0), ms(800), Easing::Power2Out),
            Profile::OutlinedCard(_) => {
                Tween::reveal(hidden.y(40.0).scale(0.95), ms(600), Easing::BACK)
            }
            Profile::Header => Tween::reveal(hidden.y(-80.0), ms(800), Easing::Power2Out),
            Profile::LogoTile(_) => {
                Tween::reveal(hidden.scale(0.5).rotate(-10.0), ms(500), ELASTIC)
            }
            Profile::SkillCard(i) => {
                let side = if i % 2 == 0 { -1.0 } else { 1.0 };
                Tween::reveal(
                    hidden.x(60.0 * side).rotate(5.0 * side),
                    ms(700),
                    Easing::Power3Out,
                )
            }
            Profile::SkillItem(_) => Tween::reveal(hidden.y(20.0), ms(400), Easing::Power2Out),
            Profile::ContactMain => Tween::reveal(hidden.x(-80.0), ms(800), Easing::Power2Out),
            Profile::ContactSidebar => Tween::reveal(hidden.x(80.0), ms(800), Easing::Power2Out),
            Profile::ContactCard(_) => {
                Tween::reveal(hidden.y(30.0).scale(0.9), ms(500), Easing::BACK)
            }
            Profile::HeroHeading => Tween::reveal(hidden.y(24.0), ms(600), Easing::Power2Out),
            Profile::HeroSubtitle => Tween::reveal(hidden.y(16.0), ms(600), Easing::Power2Out),
        };
        tween.with_delay(self.delay())
    }

    pub fn stagger(&self) -> Stagger {
        match self {
            Profile::OutlinedCard(_) => Stagger::each(ms(100)),
            Profile::LogoTile(_) => Stagger::each(ms(80)),
            Profile::SkillCard(_) => Stagger::each(ms(150)),
            Profile::SkillItem(_) => Stagger::new(ms(800), ms(50)),
            Profile::ContactCard(_) => Stagger::new(ms(400), ms(100)),
            Profile::ContactSidebar => Stagger::new(ms(200), Duration::ZERO),
            Profile::HeroSubtitle => Stagger::new(ms(100), Duration::ZERO),
            _ => Stagger::default(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.stagger().delay_for(self.index())
    }

    fn index(&self) -> usize {
        match *self {
            Profile::OutlinedCard(i)
            | Profile::LogoTile(i)
            | Profile::SkillCard(i)
            | Profile::SkillItem(i)
            | Profile::ContactCard(i) => i,
            _ => 0,
        }
    }

    /// Header and hero intros play on mount instead of on scroll.
    pub fn is_scroll_linked(&self) -> bool {
        !matches!(
            self,
            Profile::Header | Profile::HeroHeading | Profile::HeroSubtitle
        )
    }

    /// Trigger start and optional end, as `"<edge> <percent>%"`.
    fn trigger(&self) -> (&'static str, Option<&'static str>) {
        match self {
            Profile::Section => ("top 85%", Some("bottom 20%")),
            Profile::OutlinedCard(_) | Profile::SkillCard(_) | Profile::SkillItem(_) => {
                ("top 75%", None)
            }
            _ => ("top 80%", None),
        }
    }

    fn toggle_actions(&self) -> &'static str {
        if self.is_scroll_linked() {
            "play none none reverse"
        } else {
            "play none none none"
        }
    }

    pub fn zone(&self) -> TriggerZone {
        let (start, end) = self.trigger();
        TriggerZone::parse(start, end).unwrap_or_else(|e| {
            log::warn!("{self:?}: {e}, falling back to top 80%");
            TriggerZone::starting(Threshold::new(Edge::Top, 80.0))
        })
    }

    pub fn actions(&self) -> ToggleActions {
        self.toggle_actions().parse().unwrap_or_else(|e| {
            log::warn!("{self:?}: {e}, falling back to play none none reverse");
            ToggleActions::default()
        })
    }
}
