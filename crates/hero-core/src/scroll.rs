use crate::constants::*;
use instant::Instant;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollDirection {
    #[default]
    Idle,
    Down,
    Up,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollSample {
    pub direction: ScrollDirection,
    /// Smoothed velocity in px/s, positive when scrolling down.
    pub velocity: f32,
    /// How far the page has scrolled past the hero, 0..=1.
    pub progress: f32,
}

/// Derives direction, velocity, progress and scroll intent from raw scroll
/// offsets.
#[derive(Clone, Debug, Default)]
pub struct ScrollTracker {
    last_y: Option<f32>,
    last_at: Option<Instant>,
    last_moved_at: Option<Instant>,
    sample: ScrollSample,
    down_travel: f32,
    intent: bool,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, scroll_y: f32, hero_height: f32, now: Instant) -> ScrollSample {
        let progress = if hero_height > 0.0 {
            (scroll_y / hero_height).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.sample.progress = progress;

        if let (Some(prev_y), Some(prev_at)) = (self.last_y, self.last_at) {
            let dy = scroll_y - prev_y;
            let dt = crate::elapsed_between(prev_at, now).as_secs_f32();
            if dy != 0.0 {
                self.sample.direction = if dy > 0.0 {
                    ScrollDirection::Down
                } else {
                    ScrollDirection::Up
                };
                self.last_moved_at = Some(now);
                if dy > 0.0 {
                    self.down_travel += dy;
                }
            }
            if dt > 0.0 {
                let instant_v = dy / dt;
                self.sample.velocity = (1.0 - SCROLL_VELOCITY_BLEND_ALPHA) * self.sample.velocity
                    + SCROLL_VELOCITY_BLEND_ALPHA * instant_v;
            }
        }
        self.last_y = Some(scroll_y);
        self.last_at = Some(now);

        if !self.intent && self.down_travel >= SCROLL_INTENT_MIN_PX {
            self.intent = true;
            log::debug!("[hero] scroll intent after {:.0}px", self.down_travel);
        }
        self.sample
    }

    /// Let velocity settle and direction go idle when no scroll event arrives.
    pub fn settle(&mut self, now: Instant) {
        if !self.is_moving(now) {
            self.sample.direction = ScrollDirection::Idle;
            self.sample.velocity = 0.0;
        }
    }

    fn is_moving(&self, now: Instant) -> bool {
        self.last_moved_at.is_some_and(|at| {
            crate::elapsed_between(at, now) <= Duration::from_millis(SCROLL_ACTIVE_WINDOW_MS)
        })
    }

    /// Last movement was upward and recent enough to count as ongoing.
    pub fn is_scrolling_up(&self, now: Instant) -> bool {
        self.sample.direction == ScrollDirection::Up && self.is_moving(now)
    }

    pub fn intent(&self) -> bool {
        self.intent
    }

    pub fn sample(&self) -> ScrollSample {
        self.sample
    }

    /// Forget movement history; the current offset becomes the new baseline.
    pub fn clear(&mut self) {
        self.last_at = None;
        self.last_moved_at = None;
        self.sample.direction = ScrollDirection::Idle;
        self.sample.velocity = 0.0;
        self.down_travel = 0.0;
        self.intent = false;
    }
}
