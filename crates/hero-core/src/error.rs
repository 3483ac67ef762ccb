use crate::effects::Tier;
use thiserror::Error;

/// Genuine misuse of the engine.
///
/// Contention, empty pools and expired locks are expected outcomes and are
/// reported as `None`/`false`, never through this type.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HeroError {
    #[error("letter index {index} out of range (hero has {count} letters)")]
    LetterOutOfRange { index: usize, count: usize },
    #[error("unknown power mode '{0}' (expected auto, low or high)")]
    UnknownPowerMode(String),
    #[error("{tier:?} pool weights sum to {sum}, expected 100")]
    WeightSum { tier: Tier, sum: u32 },
    #[error("{0:?} pool is empty")]
    EmptyPool(Tier),
    #[error("persistent effect {0} claims channels")]
    PersistentClaim(&'static str),
}
