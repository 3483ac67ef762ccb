//! Effect orchestration core for the portfolio hero banner.
//!
//! Nothing in this crate touches browser APIs. Every component is a plain
//! state-holding object whose transitions take an explicit `now`, so the whole
//! engine can be driven (and tested) on the host. The wasm front-end subscribes
//! these objects to DOM events and forwards play requests to the page's
//! animation engine.

pub mod channel;
pub mod constants;
pub mod effects;
pub mod error;
pub mod locks;
pub mod orchestrator;
pub mod panic_reset;
pub mod perf;
pub mod power;
pub mod scroll;
pub mod state;
pub mod styles;
pub mod tiers;
pub mod visibility;
pub mod visuals;

pub use channel::*;
pub use effects::*;
pub use error::*;
pub use locks::*;
pub use orchestrator::*;
pub use panic_reset::*;
pub use perf::*;
pub use power::*;
pub use scroll::*;
pub use state::*;
pub use styles::*;
pub use tiers::*;
pub use visibility::*;
pub use visuals::*;

use instant::Instant;
use std::time::Duration;

/// `now - earlier`, clamped at zero when `earlier` is in the future.
#[inline]
pub(crate) fn elapsed_between(earlier: Instant, now: Instant) -> Duration {
    if now > earlier {
        now - earlier
    } else {
        Duration::ZERO
    }
}
