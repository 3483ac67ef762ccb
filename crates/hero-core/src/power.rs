//! Device capability detection and the low-power configuration presets.

use crate::constants::*;
use crate::error::HeroError;
use std::str::FromStr;

/// Static knobs the renderer and the tier gate honour for a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerConfig {
    pub intensity_multiplier: f32,
    pub max_device_scale: f32,
    pub target_fps: u32,
    /// Lower bound of the tier 2 cooldown draw.
    pub tier2_cooldown_ms: u32,
    pub tier3_enabled: bool,
}

pub const NORMAL_POWER: PowerConfig = PowerConfig {
    intensity_multiplier: 1.0,
    max_device_scale: 2.0,
    target_fps: 60,
    tier2_cooldown_ms: 8_000,
    tier3_enabled: true,
};

pub const LOW_POWER: PowerConfig = PowerConfig {
    intensity_multiplier: 0.5,
    max_device_scale: 1.0,
    target_fps: 30,
    tier2_cooldown_ms: 15_000,
    tier3_enabled: false,
};

impl Default for PowerConfig {
    fn default() -> Self {
        NORMAL_POWER
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PowerOverride {
    #[default]
    Auto,
    Low,
    High,
}

impl PowerOverride {
    pub fn as_str(self) -> &'static str {
        match self {
            PowerOverride::Auto => "auto",
            PowerOverride::Low => "low",
            PowerOverride::High => "high",
        }
    }
}

impl FromStr for PowerOverride {
    type Err = HeroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(PowerOverride::Auto),
            "low" => Ok(PowerOverride::Low),
            "high" => Ok(PowerOverride::High),
            _ => Err(HeroError::UnknownPowerMode(s.to_string())),
        }
    }
}

/// Advisory facts about the device, read once from the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeviceSignals {
    pub device_memory_gb: Option<f32>,
    pub logical_cores: Option<u32>,
    pub prefers_reduced_motion: bool,
    pub accelerated_graphics: bool,
}

impl Default for DeviceSignals {
    fn default() -> Self {
        Self {
            device_memory_gb: None,
            logical_cores: None,
            prefers_reduced_motion: false,
            accelerated_graphics: true,
        }
    }
}

impl DeviceSignals {
    /// Any single signal is enough to select the low-power preset. Unknown
    /// values count as capable.
    pub fn is_low_power(&self) -> bool {
        self.device_memory_gb.is_some_and(|gb| gb < LOW_POWER_MEMORY_GB)
            || self.logical_cores.is_some_and(|c| c < LOW_POWER_CORES)
            || self.prefers_reduced_motion
    }
}

/// Cached capability detection plus the manual override.
///
/// Detection runs at most once between `reset` calls; the override can change
/// at any time and re-derives the active config immediately.
#[derive(Clone, Debug, Default)]
pub struct CapabilityService {
    detected: Option<DeviceSignals>,
    mode: PowerOverride,
    active: PowerConfig,
}

impl CapabilityService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `probe` unless detection already happened. Returns the active config.
    pub fn init(&mut self, probe: impl FnOnce() -> DeviceSignals) -> PowerConfig {
        if self.detected.is_none() {
            let signals = probe();
            log::info!(
                "[power] detected memory={:?}GB cores={:?} reduced_motion={} gpu={}",
                signals.device_memory_gb,
                signals.logical_cores,
                signals.prefers_reduced_motion,
                signals.accelerated_graphics
            );
            self.detected = Some(signals);
            self.rederive();
        }
        self.active
    }

    /// Forget the cached detection so the next `init` probes again.
    pub fn reset(&mut self) {
        self.detected = None;
        self.rederive();
    }

    pub fn set_override(&mut self, mode: PowerOverride) -> PowerConfig {
        self.mode = mode;
        self.rederive();
        self.active
    }

    fn rederive(&mut self) {
        let low = match self.mode {
            PowerOverride::Low => true,
            PowerOverride::High => false,
            PowerOverride::Auto => self.detected.is_some_and(|s| s.is_low_power()),
        };
        self.active = if low { LOW_POWER } else { NORMAL_POWER };
        log::info!(
            "[power] mode={} preset={}",
            self.mode.as_str(),
            if low { "low" } else { "normal" }
        );
    }

    pub fn config(&self) -> PowerConfig {
        self.active
    }

    pub fn mode(&self) -> PowerOverride {
        self.mode
    }

    pub fn is_low_power(&self) -> bool {
        self.active == LOW_POWER
    }

    pub fn signals(&self) -> Option<DeviceSignals> {
        self.detected
    }

    pub fn is_detected(&self) -> bool {
        self.detected.is_some()
    }

    /// Without detection results the host is assumed capable.
    pub fn accelerated_graphics(&self) -> bool {
        self.detected.map_or(true, |s| s.accelerated_graphics)
    }
}
