//! Application events handed from stack and board callbacks to the dispatcher

use crate::gap::{BdAddr, LinkState};
use crate::smp::PairingState;
use bitflags::bitflags;

bitflags! {
    /// Board key bitmask
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Keys: u8 {
        const SELECT = 0x01;
        const UP = 0x02;
        const DOWN = 0x04;
        const LEFT = 0x08;
        const RIGHT = 0x10;
    }
}

bitflags! {
    /// Output capabilities the bond manager asks the application to use
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct UiOutputs: u8 {
        /// Show the passcode or comparison value
        const DISPLAY = 0x01;
    }
}

/// Passcode or numeric comparison request from the bond manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasscodeRequest {
    /// Peer that triggered the request
    pub peer: BdAddr,
    /// Connection the request belongs to
    pub handle: u16,
    /// Requested output capabilities
    pub ui_outputs: UiOutputs,
    /// Value to compare, zero when numeric comparison is not in use
    pub numeric_comparison: u32,
}

impl PasscodeRequest {
    /// Whether the request is a numeric comparison
    pub fn is_numeric_comparison(&self) -> bool {
        self.numeric_comparison != 0
    }
}

/// Event queued for the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// GAP role link state changed
    LinkStateChanged(LinkState),
    /// Board keys changed
    KeysChanged(Keys),
    /// Bond manager pairing progress
    PairingStateChanged {
        handle: u16,
        state: PairingState,
        status: u8,
    },
    /// Bond manager needs a passcode or a comparison decision
    PasscodeNeeded(PasscodeRequest),
}

impl AppEvent {
    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            AppEvent::LinkStateChanged(_) => "state-change",
            AppEvent::KeysChanged(_) => "key-change",
            AppEvent::PairingStateChanged { .. } => "pairing-state",
            AppEvent::PasscodeNeeded(_) => "passcode-needed",
        }
    }
}
