//! Scroll-driven styling values exposed to the page as CSS custom properties.

use crate::constants::*;
use crate::scroll::ScrollSample;

pub const CSS_SHIMMER: &str = "--hero-shimmer";
pub const CSS_GLOW: &str = "--hero-glow";
pub const CSS_ROTATION: &str = "--hero-rotate";

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HeroStyle {
    /// Percent along the headline, -20..=120.
    pub shimmer_position: f32,
    pub glow_intensity: f32,
    pub rotation_deg: f32,
}

#[inline]
pub fn shimmer_position(progress: f32) -> f32 {
    SHIMMER_START_PCT + SHIMMER_SPAN_PCT * progress.clamp(0.0, 1.0)
}

#[inline]
pub fn glow_intensity(velocity: f32, intensity: f32) -> f32 {
    let speed = (velocity.abs() / GLOW_VELOCITY_FULL).min(1.0);
    (GLOW_BASE + GLOW_SPAN * speed) * intensity.clamp(0.0, 1.0)
}

#[inline]
pub fn rotation_deg(progress: f32, velocity: f32) -> f32 {
    let lean = (velocity / ROTATION_LEAN_PX_PER_DEG)
        .clamp(-ROTATION_LEAN_MAX_DEG, ROTATION_LEAN_MAX_DEG);
    progress.clamp(0.0, 1.0) * ROTATION_PROGRESS_DEG + lean
}

impl HeroStyle {
    pub fn from_scroll(sample: &ScrollSample, intensity: f32) -> Self {
        Self {
            shimmer_position: shimmer_position(sample.progress),
            glow_intensity: glow_intensity(sample.velocity, intensity),
            rotation_deg: rotation_deg(sample.progress, sample.velocity),
        }
    }

    /// `(property, value)` pairs ready for `style.setProperty`.
    pub fn css_vars(&self) -> [(&'static str, String); 3] {
        [
            (CSS_SHIMMER, format!("{:.1}%", self.shimmer_position)),
            (CSS_GLOW, format!("{:.3}", self.glow_intensity)),
            (CSS_ROTATION, format!("{:.2}deg", self.rotation_deg)),
        ]
    }
}
