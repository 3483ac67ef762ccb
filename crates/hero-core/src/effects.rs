//! Static effect catalog and the weighted anti-repeat selector.

use crate::channel::{Channel, ChannelClaim, LockType};
use crate::error::HeroError;
use crate::visuals::VisualKind;
use rand::Rng;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    Local = 1,
    Viewport = 2,
    Persistent = 3,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Local, Tier::Viewport, Tier::Persistent];

    #[inline]
    pub fn level(self) -> u8 {
        self as u8
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectDuration {
    Timed { ms: u32 },
    /// Runs for as long as the effect stays active (tier 3).
    Persistent,
}

impl EffectDuration {
    pub fn as_duration(self) -> Option<Duration> {
        match self {
            EffectDuration::Timed { ms } => Some(Duration::from_millis(ms as u64)),
            EffectDuration::Persistent => None,
        }
    }

    /// Milliseconds with `-1` for persistent, the convention the JS animation
    /// engine expects.
    pub fn as_ms_hint(self) -> i64 {
        match self {
            EffectDuration::Timed { ms } => ms as i64,
            EffectDuration::Persistent => -1,
        }
    }
}

/// Easing tag handed to the animation engine untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    PowerOut,
    BackOut,
    ElasticOut,
    SineInOut,
    ExpoOut,
}

impl Easing {
    pub fn tag(self) -> &'static str {
        match self {
            Easing::Linear => "none",
            Easing::PowerOut => "power2.out",
            Easing::BackOut => "back.out(1.7)",
            Easing::ElasticOut => "elastic.out(1, 0.4)",
            Easing::SineInOut => "sine.inOut",
            Easing::ExpoOut => "expo.out",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Effect {
    pub id: &'static str,
    pub tier: Tier,
    pub channels: &'static [ChannelClaim],
    pub duration: EffectDuration,
    /// Relative selection weight, 0..=100. Each pool is authored to sum to 100.
    pub weight: u32,
    pub easing: Easing,
    pub visual: VisualKind,
}

const fn claim(channel: Channel, lock: LockType) -> ChannelClaim {
    ChannelClaim::new(channel, lock)
}

const LETTERS_HARD: ChannelClaim = claim(Channel::Letters, LockType::Hard);
const LETTERS_SOFT: ChannelClaim = claim(Channel::Letters, LockType::Soft);
const LETTERS_TRANSFORM: ChannelClaim = claim(Channel::Letters, LockType::TransformSoft);
const LIGHTING_HARD: ChannelClaim = claim(Channel::HeroLighting, LockType::Hard);
const LIGHTING_SOFT: ChannelClaim = claim(Channel::HeroLighting, LockType::Soft);
const CAMERA_HARD: ChannelClaim = claim(Channel::ViewportCamera, LockType::Hard);
const CAMERA_SOFT: ChannelClaim = claim(Channel::ViewportCamera, LockType::Soft);
const OVERLAY_HARD: ChannelClaim = claim(Channel::WebglOverlay, LockType::Hard);
const OVERLAY_SOFT: ChannelClaim = claim(Channel::WebglOverlay, LockType::Soft);

const fn timed(ms: u32) -> EffectDuration {
    EffectDuration::Timed { ms }
}

pub static LOCAL_EFFECTS: [Effect; 8] = [
    Effect {
        id: "letterBounce",
        tier: Tier::Local,
        channels: &[LETTERS_TRANSFORM],
        duration: timed(600),
        weight: 20,
        easing: Easing::BackOut,
        visual: VisualKind::LetterOnly,
    },
    Effect {
        id: "letterSpin",
        tier: Tier::Local,
        channels: &[LETTERS_HARD],
        duration: timed(800),
        weight: 15,
        easing: Easing::PowerOut,
        visual: VisualKind::LetterOnly,
    },
    Effect {
        id: "letterGlow",
        tier: Tier::Local,
        channels: &[LETTERS_SOFT, LIGHTING_SOFT],
        duration: timed(700),
        weight: 15,
        easing: Easing::SineInOut,
        visual: VisualKind::LetterOnly,
    },
    Effect {
        id: "letterWave",
        tier: Tier::Local,
        channels: &[LETTERS_HARD],
        duration: timed(900),
        weight: 10,
        easing: Easing::SineInOut,
        visual: VisualKind::LetterOnly,
    },
    Effect {
        id: "letterScatter",
        tier: Tier::Local,
        channels: &[LETTERS_HARD],
        duration: timed(1000),
        weight: 10,
        easing: Easing::ExpoOut,
        visual: VisualKind::LetterOnly,
    },
    Effect {
        id: "letterShimmer",
        tier: Tier::Local,
        channels: &[LIGHTING_SOFT],
        duration: timed(800),
        weight: 10,
        easing: Easing::Linear,
        visual: VisualKind::LetterOnly,
    },
    Effect {
        id: "letterPulse",
        tier: Tier::Local,
        channels: &[LETTERS_TRANSFORM],
        duration: timed(500),
        weight: 10,
        easing: Easing::PowerOut,
        visual: VisualKind::LetterOnly,
    },
    Effect {
        id: "letterFlip",
        tier: Tier::Local,
        channels: &[LETTERS_HARD],
        duration: timed(700),
        weight: 10,
        easing: Easing::ElasticOut,
        visual: VisualKind::LetterOnly,
    },
];

pub static VIEWPORT_EFFECTS: [Effect; 3] = [
    Effect {
        id: "ripple",
        tier: Tier::Viewport,
        channels: &[OVERLAY_HARD, CAMERA_SOFT],
        duration: timed(1800),
        weight: 40,
        easing: Easing::ExpoOut,
        visual: VisualKind::Ripple,
    },
    Effect {
        id: "lightSweep",
        tier: Tier::Viewport,
        channels: &[LIGHTING_HARD, OVERLAY_SOFT],
        duration: timed(2200),
        weight: 35,
        easing: Easing::SineInOut,
        visual: VisualKind::LightSweep,
    },
    Effect {
        id: "vignettePulse",
        tier: Tier::Viewport,
        channels: &[CAMERA_HARD],
        duration: timed(1500),
        weight: 25,
        easing: Easing::PowerOut,
        visual: VisualKind::Vignette,
    },
];

/// CSS-only stand-ins used when no accelerated graphics context exists.
pub static DEGRADED_VIEWPORT_EFFECTS: [Effect; 3] = [
    Effect {
        id: "cssRipple",
        tier: Tier::Viewport,
        channels: &[CAMERA_SOFT, LETTERS_SOFT],
        duration: timed(1200),
        weight: 40,
        easing: Easing::PowerOut,
        visual: VisualKind::Ripple,
    },
    Effect {
        id: "cssSweep",
        tier: Tier::Viewport,
        channels: &[LIGHTING_HARD],
        duration: timed(1600),
        weight: 35,
        easing: Easing::SineInOut,
        visual: VisualKind::LightSweep,
    },
    Effect {
        id: "cssVignette",
        tier: Tier::Viewport,
        channels: &[CAMERA_HARD],
        duration: timed(1200),
        weight: 25,
        easing: Easing::PowerOut,
        visual: VisualKind::Vignette,
    },
];

/// Ambient layers drawn beneath the transient overlay effects. They run for
/// as long as they are unlocked and visible, so they hold no channel lock;
/// a viewport effect may take the overlay hard on top of them.
pub static PERSISTENT_EFFECTS: [Effect; 2] = [
    Effect {
        id: "caustics",
        tier: Tier::Persistent,
        channels: &[],
        duration: EffectDuration::Persistent,
        weight: 50,
        easing: Easing::Linear,
        visual: VisualKind::Caustics,
    },
    Effect {
        id: "particleTrail",
        tier: Tier::Persistent,
        channels: &[],
        duration: EffectDuration::Persistent,
        weight: 50,
        easing: Easing::Linear,
        visual: VisualKind::ParticleTrail,
    },
];

/// The three tier pools in use for a session.
#[derive(Clone, Copy, Debug)]
pub struct EffectCatalog {
    local: &'static [Effect],
    viewport: &'static [Effect],
    persistent: &'static [Effect],
}

impl EffectCatalog {
    pub fn standard() -> Self {
        Self {
            local: &LOCAL_EFFECTS,
            viewport: &VIEWPORT_EFFECTS,
            persistent: &PERSISTENT_EFFECTS,
        }
    }

    /// Catalog for hosts without an accelerated graphics context.
    pub fn degraded() -> Self {
        Self {
            viewport: &DEGRADED_VIEWPORT_EFFECTS,
            ..Self::standard()
        }
    }

    pub fn for_capability(accelerated_graphics: bool) -> Self {
        if accelerated_graphics {
            Self::standard()
        } else {
            Self::degraded()
        }
    }

    pub fn pool(&self, tier: Tier) -> &'static [Effect] {
        match tier {
            Tier::Local => self.local,
            Tier::Viewport => self.viewport,
            Tier::Persistent => self.persistent,
        }
    }

    pub fn find(&self, id: &str) -> Option<&'static Effect> {
        Tier::ALL
            .iter()
            .flat_map(|t| self.pool(*t).iter())
            .find(|e| e.id == id)
    }

    /// Check the authoring convention: no pool is empty, each pool's weights
    /// sum to 100 and persistent entries claim no channels. Selection itself
    /// works for any positive weights.
    pub fn validate(&self) -> Result<(), HeroError> {
        for tier in Tier::ALL {
            let pool = self.pool(tier);
            if pool.is_empty() {
                return Err(HeroError::EmptyPool(tier));
            }
            let sum: u32 = pool.iter().map(|e| e.weight).sum();
            if sum != 100 {
                return Err(HeroError::WeightSum { tier, sum });
            }
        }
        if let Some(e) = self.persistent.iter().find(|e| !e.channels.is_empty()) {
            return Err(HeroError::PersistentClaim(e.id));
        }
        Ok(())
    }
}

/// Pick an effect from `pool`, weighted by `Effect::weight`, never returning
/// the entry whose id is `exclude_id`.
///
/// Returns `None` when nothing is left after exclusion, so a single-entry pool
/// yields nothing rather than repeating itself.
pub fn select_weighted<'a, R: Rng + ?Sized>(
    pool: &'a [Effect],
    exclude_id: Option<&str>,
    rng: &mut R,
) -> Option<&'a Effect> {
    let mut eligible = pool
        .iter()
        .filter(|e| Some(e.id) != exclude_id)
        .peekable();
    let first = *eligible.peek()?;
    let total: u32 = pool
        .iter()
        .filter(|e| Some(e.id) != exclude_id)
        .map(|e| e.weight)
        .sum();
    if total == 0 {
        return Some(first);
    }
    let mut remaining = rng.gen::<f64>() * total as f64;
    let mut last = first;
    for e in eligible {
        last = e;
        if e.weight == 0 {
            continue;
        }
        remaining -= e.weight as f64;
        if remaining <= 0.0 {
            return Some(e);
        }
    }
    Some(last)
}
