//! Panic reset triggers.
//!
//! Disruptive layout or navigation events collapse the whole hero to its rest
//! state. This module decides *when* to reset (debouncing resize bursts,
//! detecting route changes); the orchestrator performs the reset itself.

use crate::constants::RESIZE_DEBOUNCE_MS;
use instant::Instant;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResetTrigger {
    Resize,
    OrientationChange,
    RouteChange,
    Manual,
}

impl ResetTrigger {
    pub fn as_str(self) -> &'static str {
        match self {
            ResetTrigger::Resize => "resize",
            ResetTrigger::OrientationChange => "orientation",
            ResetTrigger::RouteChange => "route",
            ResetTrigger::Manual => "manual",
        }
    }
}

/// Side effects of a reset that live outside the core: the animation engine
/// and the renderer.
pub trait ResetHooks {
    /// Stop every in-flight animation on managed elements.
    fn kill_animations(&mut self);
    /// Strip transform, filter and opacity styling back to neutral.
    fn clear_styles(&mut self);
    /// Let the renderer discard GPU resources.
    fn release_renderer(&mut self);
}

/// Hooks that do nothing, for hosts without an animation engine attached.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHooks;

impl ResetHooks for NoopHooks {
    fn kill_animations(&mut self) {}
    fn clear_styles(&mut self) {}
    fn release_renderer(&mut self) {}
}

/// Records which hooks a reset asked for, to be replayed once the caller has
/// let go of the orchestrator. Host callbacks may then re-enter it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeferredHooks {
    pub kill_animations: bool,
    pub clear_styles: bool,
    pub release_renderer: bool,
}

impl DeferredHooks {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Run the recorded steps on `hooks` in reset order.
    pub fn replay(self, hooks: &mut dyn ResetHooks) {
        if self.kill_animations {
            hooks.kill_animations();
        }
        if self.clear_styles {
            hooks.clear_styles();
        }
        if self.release_renderer {
            hooks.release_renderer();
        }
    }
}

impl ResetHooks for DeferredHooks {
    fn kill_animations(&mut self) {
        self.kill_animations = true;
    }
    fn clear_styles(&mut self) {
        self.clear_styles = true;
    }
    fn release_renderer(&mut self) {
        self.release_renderer = true;
    }
}

#[derive(Clone, Debug)]
pub struct PanicReset {
    debounce: Duration,
    resize_deadline: Option<Instant>,
    last_route: Option<String>,
    reset_count: u64,
    generation: u64,
}

impl Default for PanicReset {
    fn default() -> Self {
        Self::new(Duration::from_millis(RESIZE_DEBOUNCE_MS))
    }
}

impl PanicReset {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            resize_deadline: None,
            last_route: None,
            reset_count: 0,
            generation: 0,
        }
    }

    /// A resize event: (re)arm the debounce so a burst yields one reset.
    pub fn on_resize(&mut self, now: Instant) {
        self.resize_deadline = Some(now + self.debounce);
    }

    /// Returns `Resize` once the debounce window has passed without another
    /// resize event.
    pub fn poll(&mut self, now: Instant) -> Option<ResetTrigger> {
        match self.resize_deadline {
            Some(deadline) if now >= deadline => {
                self.resize_deadline = None;
                Some(ResetTrigger::Resize)
            }
            _ => None,
        }
    }

    /// Compare the current navigational path with the previous one. The first
    /// observation only records the path.
    pub fn observe_route(&mut self, path: &str) -> Option<ResetTrigger> {
        match self.last_route.as_deref() {
            Some(prev) if prev == path => None,
            Some(_) => {
                self.last_route = Some(path.to_string());
                Some(ResetTrigger::RouteChange)
            }
            None => {
                self.last_route = Some(path.to_string());
                None
            }
        }
    }

    /// Book-keep a completed reset.
    pub(crate) fn record(&mut self, trigger: ResetTrigger) {
        if trigger == ResetTrigger::Resize || trigger == ResetTrigger::OrientationChange {
            self.resize_deadline = None;
        }
        self.reset_count += 1;
        self.generation += 1;
    }

    pub fn reset_count(&self) -> u64 {
        self.reset_count
    }

    /// Bumped on every reset; work started in an older generation is stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
