//! Channel identifiers, channel bitmasks and run modes

use core::fmt;

use crate::{PulseError, PulseResult};

/// Number of independent pulse channels
pub const NUM_CHANNELS: usize = 4;

/// One independent pulse-train generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelId {
    Ch0,
    Ch1,
    Ch2,
    Ch3,
}

impl ChannelId {
    /// All channels in index order
    pub const ALL: [ChannelId; NUM_CHANNELS] =
        [ChannelId::Ch0, ChannelId::Ch1, ChannelId::Ch2, ChannelId::Ch3];

    /// Zero-based channel index
    pub const fn index(self) -> usize {
        match self {
            ChannelId::Ch0 => 0,
            ChannelId::Ch1 => 1,
            ChannelId::Ch2 => 2,
            ChannelId::Ch3 => 3,
        }
    }

    /// Channel for a zero-based index
    pub const fn from_index(index: usize) -> Option<ChannelId> {
        match index {
            0 => Some(ChannelId::Ch0),
            1 => Some(ChannelId::Ch1),
            2 => Some(ChannelId::Ch2),
            3 => Some(ChannelId::Ch3),
            _ => None,
        }
    }

    /// The bit this channel occupies in a [`ChannelMask`]
    pub const fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CH{}", self.index())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ChannelId {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "CH{}", self.index());
    }
}

/// Run mode for a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMode {
    /// Stop automatically after the configured number of pulses
    Count,
    /// Run until explicitly stopped
    Infinite,
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelMode::Count => write!(f, "Count"),
            ChannelMode::Infinite => write!(f, "Infinite"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ChannelMode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ChannelMode::Count => defmt::write!(fmt, "Count"),
            ChannelMode::Infinite => defmt::write!(fmt, "Infinite"),
        }
    }
}

/// Bitmask over the four channels
///
/// Only the low four bits are defined; constructing a mask from a raw byte
/// with any other bit set is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelMask(u8);

impl ChannelMask {
    /// Mask selecting no channel
    pub const EMPTY: Self = Self(0);

    /// Mask selecting every channel
    pub const FULL: Self = Self(0x0F);

    /// Build a mask from its wire representation
    pub fn new(raw: u8) -> PulseResult<Self> {
        if raw & !Self::FULL.0 != 0 {
            return Err(PulseError::ReservedBits);
        }
        Ok(Self(raw))
    }

    /// Mask selecting a single channel
    pub const fn single(ch: ChannelId) -> Self {
        Self(ch.bit())
    }

    /// Wire representation
    pub const fn raw(self) -> u8 {
        self.0
    }

    pub const fn contains(self, ch: ChannelId) -> bool {
        self.0 & ch.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, ch: ChannelId) {
        self.0 |= ch.bit();
    }

    pub fn remove(&mut self, ch: ChannelId) {
        self.0 &= !ch.bit();
    }

    /// Channels present in either mask
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Channels present in `self` but not in `other`
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Iterate the selected channels in index order
    pub fn iter(self) -> impl Iterator<Item = ChannelId> {
        ChannelId::ALL.into_iter().filter(move |ch| self.contains(*ch))
    }
}

impl fmt::Display for ChannelMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06b}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ChannelMask {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=u8:b}", self.0);
    }
}
