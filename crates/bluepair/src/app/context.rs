//! State shared by the event handlers
//!
//! One owned value the dispatcher passes to every handler, instead of
//! process-wide connection handle, decision flag and key material.

use super::decision::{KeyAction, UserDecisionGate};
use super::display::StatusDisplay;
use super::event::AppEvent;
use super::pairing::PairingStateMachine;
use super::stack::PeripheralStack;
use crate::config::BondConfig;
use crate::smp::OobExchangeEngine;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct PairingContext {
    pub pairing: PairingStateMachine,
    pub gate: UserDecisionGate,
    pub oob: OobExchangeEngine,
}

impl PairingContext {
    pub fn new(bond: &BondConfig) -> Self {
        if let Err(e) = bond.peer_oob.validate() {
            warn!("Configured peer OOB record is unusable: {}", e);
        }

        Self {
            pairing: PairingStateMachine::new(),
            gate: UserDecisionGate::new(),
            oob: OobExchangeEngine::new(
                bond.ecc_keys.clone(),
                bond.local_oob_random,
                bond.peer_oob.clone(),
            ),
        }
    }

    /// Route one queued event to its handler
    pub fn handle_event<S, D>(&mut self, stack: &mut S, display: &mut D, event: AppEvent)
    where
        S: PeripheralStack + ?Sized,
        D: StatusDisplay + ?Sized,
    {
        debug!("Processing {} event", event.kind());

        match event {
            AppEvent::LinkStateChanged(state) => {
                if self.pairing.on_link_state(stack, display, state) {
                    self.gate.invalidate();
                }
            }
            AppEvent::KeysChanged(keys) => {
                let action = self
                    .gate
                    .on_keys(stack, display, keys, self.pairing.connection());
                if action != KeyAction::Ignored {
                    debug!("Keys {:?}: {:?}", keys, action);
                }
            }
            AppEvent::PairingStateChanged {
                handle,
                state,
                status,
            } => {
                debug!("Pairing state {:?} on 0x{:04X}", state, handle);
                self.pairing.on_pairing_state(display, state, status);
            }
            AppEvent::PasscodeNeeded(request) => {
                if self.gate.on_passcode_needed(display, &request) {
                    self.pairing.set_connection_handle(request.handle);
                }
            }
        }
    }

    /// Deferred key-ready action: derive the local OOB confirm value
    pub fn on_keys_ready<S>(&mut self, stack: &mut S)
    where
        S: PeripheralStack + ?Sized,
    {
        if let Err(e) = self.oob.on_keys_ready(stack) {
            warn!("OOB confirm computation failed: {}", e);
        }
    }
}
