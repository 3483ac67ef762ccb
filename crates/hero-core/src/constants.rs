// Shared tuning constants for the hero effect engine.

// Visibility hysteresis (ratio of the hero visible in the viewport)
pub const VIS_FULL_EXIT: f32 = 0.65; // Full -> Reduced below this
pub const VIS_FULL_ENTER: f32 = 0.70; // Reduced/Frozen -> Full at or above this
pub const VIS_FROZEN_ENTER: f32 = 0.45; // -> Frozen below this
pub const VIS_FROZEN_EXIT: f32 = 0.50; // Frozen -> Reduced at or above this

pub const INTENSITY_FULL: f32 = 1.0;
pub const INTENSITY_REDUCED: f32 = 0.6;
pub const INTENSITY_FROZEN: f32 = 0.0;

// Tier 2 gate
pub const TIER2_MIN_INTERACTIONS: u32 = 5;
pub const TIER2_MIN_DWELL_SECS: f32 = 8.0;
pub const TIER2_COOLDOWN_JITTER_MS: u32 = 4_000; // cooldown drawn from [base, base + jitter]

// Tier 3 unlocks
pub const CAUSTICS_UNLOCK_INTERACTIONS: u32 = 10;

// Performance monitor
pub const PERF_WINDOW_SAMPLES: usize = 60;
pub const TARGET_FRAME_MS: f32 = 1000.0 / 60.0;
pub const DROPPED_FRAME_FACTOR: f32 = 1.5; // a frame longer than 1.5x target counts as dropped
pub const LOW_FPS_THRESHOLD: f32 = 30.0;
pub const REDUCE_HYSTERESIS_SAMPLES: u32 = 10;
pub const MAX_FRAME_DELTA_MS: f32 = 1_000.0; // longer gaps are tab suspensions, not frames
pub const PERF_REDUCE_MULTIPLIER: f32 = 0.5;

// Low-power detection
pub const LOW_POWER_MEMORY_GB: f32 = 4.0;
pub const LOW_POWER_CORES: u32 = 4;

// Panic reset
pub const RESIZE_DEBOUNCE_MS: u64 = 150;

// Scroll tracking
pub const SCROLL_INTENT_MIN_PX: f32 = 150.0;
pub const SCROLL_ACTIVE_WINDOW_MS: u64 = 200; // movement older than this is not "currently scrolling"
pub const SCROLL_VELOCITY_BLEND_ALPHA: f32 = 0.3; // new = (1-α)*old + α*sample

// Scroll-driven styling
pub const SHIMMER_START_PCT: f32 = -20.0;
pub const SHIMMER_SPAN_PCT: f32 = 140.0;
pub const GLOW_BASE: f32 = 0.3;
pub const GLOW_SPAN: f32 = 0.7;
pub const GLOW_VELOCITY_FULL: f32 = 2_000.0; // px/s for full glow
pub const ROTATION_PROGRESS_DEG: f32 = 8.0;
pub const ROTATION_LEAN_MAX_DEG: f32 = 4.0;
pub const ROTATION_LEAN_PX_PER_DEG: f32 = 400.0;

// Effect visuals (normalised viewport units)
pub const RIPPLE_MAX_RADIUS: f32 = 1.2;
pub const SWEEP_START: f32 = -0.2;
pub const SWEEP_SPAN: f32 = 1.4;
