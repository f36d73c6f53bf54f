//! Trigger input identifiers and trigger semantics

use core::fmt;

use crate::{ChannelId, PulseError, PulseResult};

/// Number of discrete trigger inputs
pub const NUM_TRIGGERS: usize = 4;

/// One discrete trigger input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerId {
    Trig0,
    Trig1,
    Trig2,
    Trig3,
}

impl TriggerId {
    /// All discrete trigger inputs in index order
    pub const ALL: [TriggerId; NUM_TRIGGERS] =
        [TriggerId::Trig0, TriggerId::Trig1, TriggerId::Trig2, TriggerId::Trig3];

    /// Zero-based trigger index
    pub const fn index(self) -> usize {
        match self {
            TriggerId::Trig0 => 0,
            TriggerId::Trig1 => 1,
            TriggerId::Trig2 => 2,
            TriggerId::Trig3 => 3,
        }
    }

    /// The bit this trigger occupies in a [`TriggerMask`]
    pub const fn bit(self) -> u8 {
        1 << self.index()
    }

    /// The channel sharing this trigger's index
    pub const fn same_channel(self) -> ChannelId {
        match self {
            TriggerId::Trig0 => ChannelId::Ch0,
            TriggerId::Trig1 => ChannelId::Ch1,
            TriggerId::Trig2 => ChannelId::Ch2,
            TriggerId::Trig3 => ChannelId::Ch3,
        }
    }
}

impl fmt::Display for TriggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TRIG{}", self.index())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TriggerId {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "TRIG{}", self.index());
    }
}

/// Any of the five trigger lines: the four discrete inputs or the shared
/// "trigger all" line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerLine {
    Input(TriggerId),
    All,
}

/// Bitmask over the four discrete trigger inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriggerMask(u8);

impl TriggerMask {
    pub const EMPTY: Self = Self(0);
    pub const FULL: Self = Self(0x0F);

    /// Build a mask from its wire representation
    pub fn new(raw: u8) -> PulseResult<Self> {
        if raw & !Self::FULL.0 != 0 {
            return Err(PulseError::ReservedBits);
        }
        Ok(Self(raw))
    }

    /// Mask selecting a single trigger input
    pub const fn single(trig: TriggerId) -> Self {
        Self(trig.bit())
    }

    /// Wire representation
    pub const fn raw(self) -> u8 {
        self.0
    }

    pub const fn contains(self, trig: TriggerId) -> bool {
        self.0 & trig.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the selected trigger inputs in index order
    pub fn iter(self) -> impl Iterator<Item = TriggerId> {
        TriggerId::ALL.into_iter().filter(move |trig| self.contains(*trig))
    }
}

impl fmt::Display for TriggerMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06b}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TriggerMask {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=u8:b}", self.0);
    }
}

/// What a discrete trigger input does with its target channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    /// The active edge starts the targets; the opposite edge is ignored
    StartOnly,
    /// The active edge starts the targets, the opposite edge stops them
    StartAndStop,
}

impl fmt::Display for TriggerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerAction::StartOnly => write!(f, "StartOnly"),
            TriggerAction::StartAndStop => write!(f, "StartAndStop"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TriggerAction {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TriggerAction::StartOnly => defmt::write!(fmt, "StartOnly"),
            TriggerAction::StartAndStop => defmt::write!(fmt, "StartAndStop"),
        }
    }
}

/// What the shared "trigger all" line does on its active edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllAction {
    /// Start all four channels
    TriggerAll,
    /// Start all four channels; the opposite edge stops them
    TriggerAllAndStop,
    /// Set every channel's enable bit without starting any timer
    Enable,
    /// Set every enable bit; the opposite edge stops running channels
    EnableAndStop,
}

impl AllAction {
    /// Whether the opposite edge carries a stop action
    pub const fn stops_on_opposite_edge(self) -> bool {
        matches!(self, AllAction::TriggerAllAndStop | AllAction::EnableAndStop)
    }

    /// Whether the active edge enables instead of starting
    pub const fn is_enable(self) -> bool {
        matches!(self, AllAction::Enable | AllAction::EnableAndStop)
    }
}

impl fmt::Display for AllAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllAction::TriggerAll => write!(f, "TriggerAll"),
            AllAction::TriggerAllAndStop => write!(f, "TriggerAllAndStop"),
            AllAction::Enable => write!(f, "Enable"),
            AllAction::EnableAndStop => write!(f, "EnableAndStop"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AllAction {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            AllAction::TriggerAll => defmt::write!(fmt, "TriggerAll"),
            AllAction::TriggerAllAndStop => defmt::write!(fmt, "TriggerAllAndStop"),
            AllAction::Enable => defmt::write!(fmt, "Enable"),
            AllAction::EnableAndStop => defmt::write!(fmt, "EnableAndStop"),
        }
    }
}
