//! Trigger source routing configuration

use pulsegen_core::{AllAction, ChannelMask, TriggerAction, TriggerId};

/// Routing and edge semantics for one discrete trigger input
#[derive(Debug, Clone, Copy)]
pub struct TriggerSlot {
    /// Channels this input starts and, in [`TriggerAction::StartAndStop`]
    /// mode, stops
    pub targets: ChannelMask,
    /// When set, a falling level is the active edge
    pub invert: bool,
    pub action: TriggerAction,
}

impl TriggerSlot {
    /// Power-on routing: each input drives only its same-index channel
    pub(crate) const fn new(trig: TriggerId) -> Self {
        Self {
            targets: ChannelMask::single(trig.same_channel()),
            invert: false,
            action: TriggerAction::StartOnly,
        }
    }

    /// Whether the observed level is this input's active edge
    pub(crate) fn is_active_level(&self, level: bool) -> bool {
        level != self.invert
    }
}

/// Semantics of the shared "trigger all" input
#[derive(Debug, Clone, Copy)]
pub struct AllTriggerSlot {
    /// When set, a falling level is the active edge
    pub invert: bool,
    pub action: AllAction,
}

impl AllTriggerSlot {
    pub(crate) const fn new() -> Self {
        Self {
            invert: false,
            action: AllAction::TriggerAll,
        }
    }

    pub(crate) fn is_active_level(&self, level: bool) -> bool {
        level != self.invert
    }
}
