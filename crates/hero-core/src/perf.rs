//! Frame-timing monitor with an asymmetric "reduce effects" signal.

use crate::constants::*;
use instant::Instant;
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerfConfig {
    /// Number of frame deltas in the sliding window.
    pub window: usize,
    pub low_fps_threshold: f32,
    /// Consecutive low (or recovered) updates needed to flip the reduce signal.
    pub hysteresis_samples: u32,
    pub target_frame_ms: f32,
}

impl Default for PerfConfig {
    fn default() -> Self {
        Self {
            window: PERF_WINDOW_SAMPLES,
            low_fps_threshold: LOW_FPS_THRESHOLD,
            hysteresis_samples: REDUCE_HYSTERESIS_SAMPLES,
            target_frame_ms: TARGET_FRAME_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PerformanceMetrics {
    pub fps: f32,
    pub average_frame_time_ms: f32,
    pub dropped_frame_count: u64,
    pub effects_running_count: u32,
}

#[derive(Clone, Debug)]
pub struct PerformanceMonitor {
    cfg: PerfConfig,
    deltas: VecDeque<f32>,
    metrics: PerformanceMetrics,
    low_streak: u32,
    high_streak: u32,
    reduce: bool,
    last_frame: Option<Instant>,
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new(PerfConfig::default())
    }
}

impl PerformanceMonitor {
    pub fn new(cfg: PerfConfig) -> Self {
        let cfg = PerfConfig {
            window: cfg.window.max(1),
            hysteresis_samples: cfg.hysteresis_samples.max(1),
            ..cfg
        };
        Self {
            deltas: VecDeque::with_capacity(cfg.window),
            cfg,
            metrics: PerformanceMetrics::default(),
            low_streak: 0,
            high_streak: 0,
            reduce: false,
            last_frame: None,
        }
    }

    pub fn config(&self) -> &PerfConfig {
        &self.cfg
    }

    /// Record an animation frame at `now`. The first call only sets the
    /// baseline.
    pub fn record_frame(&mut self, now: Instant) {
        if let Some(prev) = self.last_frame.replace(now) {
            let delta = crate::elapsed_between(prev, now).as_secs_f32() * 1000.0;
            self.record_delta(delta);
        }
    }

    /// Feed one inter-frame delta in milliseconds.
    ///
    /// Non-finite, non-positive and suspension-sized gaps are ignored. Returns
    /// true when this update flipped `should_reduce_effects`.
    pub fn record_delta(&mut self, delta_ms: f32) -> bool {
        if !delta_ms.is_finite() || delta_ms <= 0.0 || delta_ms > MAX_FRAME_DELTA_MS {
            return false;
        }
        if self.deltas.len() == self.cfg.window {
            self.deltas.pop_front();
        }
        self.deltas.push_back(delta_ms);

        let avg = self.deltas.iter().sum::<f32>() / self.deltas.len() as f32;
        self.metrics.average_frame_time_ms = avg;
        self.metrics.fps = if avg > 0.0 { 1000.0 / avg } else { 0.0 };

        let target = self.cfg.target_frame_ms;
        if delta_ms > target * DROPPED_FRAME_FACTOR {
            let dropped = (delta_ms / target).floor() as u64;
            self.metrics.dropped_frame_count += dropped.saturating_sub(1);
        }

        self.update_reduce_signal()
    }

    fn update_reduce_signal(&mut self) -> bool {
        if self.is_performance_ok() {
            self.high_streak = self.high_streak.saturating_add(1);
            self.low_streak = 0;
        } else {
            self.low_streak = self.low_streak.saturating_add(1);
            self.high_streak = 0;
        }
        let n = self.cfg.hysteresis_samples;
        if !self.reduce && self.low_streak >= n {
            self.reduce = true;
            log::warn!(
                "[perf] reducing effects (fps {:.1} < {:.0})",
                self.metrics.fps,
                self.cfg.low_fps_threshold
            );
            return true;
        }
        if self.reduce && self.high_streak >= n {
            self.reduce = false;
            log::info!("[perf] performance recovered (fps {:.1})", self.metrics.fps);
            return true;
        }
        false
    }

    pub fn metrics(&self) -> PerformanceMetrics {
        self.metrics
    }

    pub fn is_performance_ok(&self) -> bool {
        self.metrics.fps >= self.cfg.low_fps_threshold
    }

    pub fn should_reduce_effects(&self) -> bool {
        self.reduce
    }

    pub fn track_effect_start(&mut self) {
        self.metrics.effects_running_count = self.metrics.effects_running_count.saturating_add(1);
    }

    pub fn track_effect_end(&mut self) {
        self.metrics.effects_running_count = self.metrics.effects_running_count.saturating_sub(1);
    }

    pub fn clear_running_effects(&mut self) {
        self.metrics.effects_running_count = 0;
    }

    /// Forget the frame baseline so the next frame after a pause is not
    /// counted as one huge delta.
    pub fn rebase(&mut self) {
        self.last_frame = None;
    }
}
