//! Renderer-facing view of running effects.
//!
//! The renderer never touches locks or hero state; each frame it samples the
//! running effects and receives a flat uniform block per effect.

use crate::constants::*;
use crate::effects::{Effect, EffectDuration};
use crate::locks::EffectInstanceId;
use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use instant::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisualKind {
    /// Pure DOM animation; nothing for the renderer to draw.
    LetterOnly,
    Ripple,
    LightSweep,
    Vignette,
    Caustics,
    ParticleTrail,
}

impl VisualKind {
    pub fn code(self) -> u32 {
        match self {
            VisualKind::LetterOnly => 0,
            VisualKind::Ripple => 1,
            VisualKind::LightSweep => 2,
            VisualKind::Vignette => 3,
            VisualKind::Caustics => 4,
            VisualKind::ParticleTrail => 5,
        }
    }
}

/// One effect's parameters for the current frame (std140-friendly, 32 bytes).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct EffectUniforms {
    pub origin: [f32; 2],
    pub radius: f32,
    pub strength: f32,
    pub sweep_x: f32,
    pub vignette: f32,
    pub progress: f32,
    pub kind: u32,
}

#[derive(Clone, Debug)]
pub struct ActiveEffect {
    pub instance: EffectInstanceId,
    pub effect: &'static Effect,
    /// Normalised viewport coordinates, (0,0) top-left.
    pub origin: Vec2,
    pub intensity: f32,
    pub started_at: Instant,
}

impl ActiveEffect {
    /// 0..=1 for timed effects; persistent effects report a sawtooth over 10s
    /// so their visuals keep moving.
    pub fn progress(&self, now: Instant) -> f32 {
        let elapsed = crate::elapsed_between(self.started_at, now).as_secs_f32();
        match self.effect.duration {
            EffectDuration::Timed { ms } if ms > 0 => (elapsed * 1000.0 / ms as f32).min(1.0),
            EffectDuration::Timed { .. } => 1.0,
            EffectDuration::Persistent => (elapsed / 10.0).fract(),
        }
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        matches!(self.effect.duration, EffectDuration::Timed { .. }) && self.progress(now) >= 1.0
    }

    pub fn sample(&self, now: Instant) -> EffectUniforms {
        update(self.effect.visual, self.progress(now), self.origin, self.intensity)
    }
}

#[inline]
fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Visual parameters for an effect kind at `progress` in \[0, 1\].
pub fn update(kind: VisualKind, progress: f32, origin: Vec2, intensity: f32) -> EffectUniforms {
    let p = progress.clamp(0.0, 1.0);
    let fade = 1.0 - smoothstep(p);
    let mut u = EffectUniforms {
        origin: origin.to_array(),
        progress: p,
        kind: kind.code(),
        ..Default::default()
    };
    match kind {
        VisualKind::LetterOnly => {}
        VisualKind::Ripple => {
            u.radius = RIPPLE_MAX_RADIUS * smoothstep(p);
            u.strength = intensity * fade;
        }
        VisualKind::LightSweep => {
            u.sweep_x = SWEEP_START + SWEEP_SPAN * smoothstep(p);
            u.strength = intensity * (std::f32::consts::PI * p).sin();
        }
        VisualKind::Vignette => {
            u.vignette = intensity * (std::f32::consts::PI * p).sin();
            u.strength = u.vignette;
        }
        VisualKind::Caustics | VisualKind::ParticleTrail => {
            u.strength = intensity;
        }
    }
    u
}
