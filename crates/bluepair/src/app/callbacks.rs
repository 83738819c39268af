//! Producer side: stack and board callbacks
//!
//! Each callback packs its arguments into an [`AppEvent`] and returns at
//! once. Delivery is best effort: an event the queue cannot take is lost.

use super::event::{AppEvent, Keys, PasscodeRequest, UiOutputs};
use super::queue::EventSender;
use crate::gap::{BdAddr, LinkState};
use crate::smp::PairingState;
use tracing::trace;

/// Callback entry points handed to the stack and board drivers
#[derive(Debug, Clone)]
pub struct StackCallbacks {
    sender: EventSender,
}

impl StackCallbacks {
    pub fn new(sender: EventSender) -> Self {
        Self { sender }
    }

    /// GAP role state change
    pub fn link_state_changed(&self, state: LinkState) {
        let _ = self.sender.send(AppEvent::LinkStateChanged(state));
    }

    /// Board key change, raw key bitmask
    pub fn keys_changed(&self, keys: u8) {
        let _ = self
            .sender
            .send(AppEvent::KeysChanged(Keys::from_bits_truncate(keys)));
    }

    /// Bond manager pairing state, raw state code
    pub fn pairing_state(&self, handle: u16, state: u8, status: u8) {
        let Some(state) = PairingState::from_u8(state) else {
            trace!("Ignoring pairing state 0x{:02X}", state);
            return;
        };

        let _ = self.sender.send(AppEvent::PairingStateChanged {
            handle,
            state,
            status,
        });
    }

    /// Bond manager passcode request
    pub fn passcode_needed(
        &self,
        peer: BdAddr,
        handle: u16,
        _ui_inputs: u8,
        ui_outputs: u8,
        numeric_comparison: u32,
    ) {
        let _ = self.sender.send(AppEvent::PasscodeNeeded(PasscodeRequest {
            peer,
            handle,
            ui_outputs: UiOutputs::from_bits_retain(ui_outputs),
            numeric_comparison,
        }));
    }

    /// Crypto subsystem finished the local ECC keys
    pub fn ecc_keys_ready(&self) {
        self.sender.signal_keys_ready();
    }
}
