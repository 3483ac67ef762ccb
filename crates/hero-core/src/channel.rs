use std::fmt;

/// Logical animation resource an effect can claim.
///
/// Channels are a fixed set known at compile time; they stand for a category of
/// visual property (letter transforms, hero lighting, ...) rather than a DOM node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Letters,
    HeroLighting,
    ViewportCamera,
    WebglOverlay,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Letters,
        Channel::HeroLighting,
        Channel::ViewportCamera,
        Channel::WebglOverlay,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Letters => "letters",
            Channel::HeroLighting => "heroLighting",
            Channel::ViewportCamera => "viewportCamera",
            Channel::WebglOverlay => "webglOverlay",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LockType {
    /// Exclusive: blocks and is blocked by every other lock on the channel.
    Hard,
    /// Cooperative with Soft and TransformSoft.
    Soft,
    /// Cooperative except with another TransformSoft.
    TransformSoft,
}

impl LockType {
    pub fn as_str(self) -> &'static str {
        match self {
            LockType::Hard => "hard",
            LockType::Soft => "soft",
            LockType::TransformSoft => "transformSoft",
        }
    }

    /// Whether a lock of this type may be taken while `existing` is held on the
    /// same base channel.
    #[inline]
    pub fn coexists_with(self, existing: LockType) -> bool {
        match (existing, self) {
            (LockType::Hard, _) | (_, LockType::Hard) => false,
            (LockType::TransformSoft, LockType::TransformSoft) => false,
            _ => true,
        }
    }
}

/// A channel plus the lock flavour an effect needs on it, e.g. `letters:hard`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChannelClaim {
    pub channel: Channel,
    pub lock: LockType,
}

impl ChannelClaim {
    pub const fn new(channel: Channel, lock: LockType) -> Self {
        Self { channel, lock }
    }
}

impl fmt::Display for ChannelClaim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.channel.as_str(), self.lock.as_str())
    }
}
