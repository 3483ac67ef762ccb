//! Channel lock table.
//!
//! Locks are bookkeeping entries, not mutexes: the hero runs on a single UI
//! thread and every check/acquire pair completes within one synchronous turn.
//! A host with real parallelism must put this table behind a mutex or actor.
//!
//! Each lock carries an absolute expiry. Expired entries are pruned lazily on
//! every query, so a lock whose owner never reports completion simply lapses.

use crate::channel::{Channel, ChannelClaim, LockType};
use instant::Instant;
use smallvec::SmallVec;
use std::fmt;
use std::time::Duration;

/// Identifies one triggered run of a catalog effect. Lock ownership is keyed
/// on this, so two overlapping runs of the same effect never release each
/// other's locks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectInstanceId(pub u64);

impl fmt::Display for EffectInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChannelLock {
    pub channel: Channel,
    pub lock_type: LockType,
    pub owner: EffectInstanceId,
    pub effect_id: &'static str,
    pub expires_at: Instant,
}

impl ChannelLock {
    #[inline]
    pub fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

pub type AcquiredLocks = SmallVec<[ChannelLock; 4]>;

#[derive(Debug, Default)]
pub struct ChannelLockManager {
    locks: Vec<ChannelLock>,
}

impl ChannelLockManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn prune(&mut self, now: Instant) {
        let before = self.locks.len();
        self.locks.retain(|l| l.is_live(now));
        let pruned = before - self.locks.len();
        if pruned > 0 {
            log::trace!("[locks] pruned {} expired lock(s)", pruned);
        }
    }

    fn is_free_for(&self, channel: Channel, lock_type: LockType) -> bool {
        self.locks
            .iter()
            .filter(|l| l.channel == channel)
            .all(|l| lock_type.coexists_with(l.lock_type))
    }

    pub fn can_acquire(&mut self, channel: Channel, lock_type: LockType, now: Instant) -> bool {
        self.prune(now);
        self.is_free_for(channel, lock_type)
    }

    pub fn acquire(
        &mut self,
        channel: Channel,
        lock_type: LockType,
        owner: EffectInstanceId,
        effect_id: &'static str,
        duration: Duration,
        now: Instant,
    ) -> Option<ChannelLock> {
        if !self.can_acquire(channel, lock_type, now) {
            log::debug!(
                "[locks] refused {}:{} for {} {}",
                channel.as_str(),
                lock_type.as_str(),
                effect_id,
                owner
            );
            return None;
        }
        let lock = ChannelLock {
            channel,
            lock_type,
            owner,
            effect_id,
            expires_at: now + duration,
        };
        self.locks.push(lock.clone());
        Some(lock)
    }

    /// Reserve every claim for one effect run.
    ///
    /// All claims are checked before any is taken. If the claims conflict with
    /// each other (so a later acquisition fails after an earlier one succeeded),
    /// the owner's partial locks are dropped and `None` is returned.
    pub fn acquire_all(
        &mut self,
        claims: &[ChannelClaim],
        owner: EffectInstanceId,
        effect_id: &'static str,
        duration: Duration,
        now: Instant,
    ) -> Option<AcquiredLocks> {
        self.prune(now);
        if !claims.iter().all(|c| self.is_free_for(c.channel, c.lock)) {
            log::debug!("[locks] {} {} blocked by contention", effect_id, owner);
            return None;
        }
        let mut acquired = AcquiredLocks::new();
        for c in claims {
            match self.acquire(c.channel, c.lock, owner, effect_id, duration, now) {
                Some(lock) => acquired.push(lock),
                None => {
                    self.release(owner);
                    return None;
                }
            }
        }
        Some(acquired)
    }

    /// Drop every lock held by `owner`. Releasing an unknown owner is a no-op.
    pub fn release(&mut self, owner: EffectInstanceId) {
        self.locks.retain(|l| l.owner != owner);
    }

    pub fn release_all(&mut self) {
        if !self.locks.is_empty() {
            log::debug!("[locks] releasing all {} lock(s)", self.locks.len());
        }
        self.locks.clear();
    }

    pub fn active_locks(&mut self, now: Instant) -> Vec<ChannelLock> {
        self.prune(now);
        self.locks.clone()
    }

    pub fn is_empty(&mut self, now: Instant) -> bool {
        self.prune(now);
        self.locks.is_empty()
    }
}
