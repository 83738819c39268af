//! User decision gate for numeric comparison
//!
//! Maps board keys to the passcode response and the security request. Only
//! one comparison decision is outstanding at a time and it is honoured once.

use super::display::{DisplayLine, StatusDisplay};
use super::event::{Keys, PasscodeRequest, UiOutputs};
use super::pairing::Connection;
use super::stack::PeripheralStack;
use crate::error::{PairingError, PairingResult};
use crate::smp::{AuthRequirements, BOND_STATUS_SUCCESS};
use tracing::{debug, info, warn};

/// A numeric comparison waiting for the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub handle: u16,
    pub ui_outputs: UiOutputs,
    pub numeric_comparison: u32,
}

/// What a key event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Comparison confirmed as matching
    Accepted,
    /// Comparison rejected
    Rejected,
    /// Security request sent
    SecurityRequested,
    /// Nothing to do for these keys
    Ignored,
}

/// Holds the pending comparison, if any
#[derive(Debug, Default)]
pub struct UserDecisionGate {
    pending: Option<ConfirmationRequest>,
}

impl UserDecisionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<&ConfirmationRequest> {
        self.pending.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Set up a decision for a passcode request.
    ///
    /// Only numeric comparison is supported; other requests are left
    /// unanswered. A newer request replaces an older one.
    pub fn on_passcode_needed<D>(&mut self, display: &mut D, request: &PasscodeRequest) -> bool
    where
        D: StatusDisplay + ?Sized,
    {
        if !request.is_numeric_comparison() {
            warn!(
                "Passcode entry requested on 0x{:04X}, only numeric comparison is supported",
                request.handle
            );
            return false;
        }

        if let Some(previous) = self.pending.replace(ConfirmationRequest {
            handle: request.handle,
            ui_outputs: request.ui_outputs,
            numeric_comparison: request.numeric_comparison,
        }) {
            debug!("Replacing unanswered comparison on 0x{:04X}", previous.handle);
        }

        info!(
            "Numeric comparison {} for {} on 0x{:04X}",
            request.numeric_comparison, request.peer, request.handle
        );
        display.write_line(
            DisplayLine::Comparison,
            &format!("Num Cmp: {}", request.numeric_comparison),
        );
        true
    }

    /// Confirm the pending comparison as a match
    pub fn accept<S, D>(&mut self, stack: &mut S, display: &mut D) -> bool
    where
        S: PeripheralStack + ?Sized,
        D: StatusDisplay + ?Sized,
    {
        self.respond(stack, display, true)
    }

    /// Reject the pending comparison
    pub fn reject<S, D>(&mut self, stack: &mut S, display: &mut D) -> bool
    where
        S: PeripheralStack + ?Sized,
        D: StatusDisplay + ?Sized,
    {
        self.respond(stack, display, false)
    }

    /// Ask the central to pair with bonding, MITM and Secure Connections
    pub fn request_security<S>(
        &self,
        stack: &mut S,
        connection: Option<&Connection>,
    ) -> PairingResult<()>
    where
        S: PeripheralStack + ?Sized,
    {
        let connection = connection.ok_or(PairingError::NotConnected)?;
        let auth_req = AuthRequirements::secure();

        info!(
            "Sending security request on 0x{:04X}, auth 0x{:02X}",
            connection.handle,
            auth_req.to_u8()
        );
        stack.send_security_request(connection.handle, auth_req)
    }

    /// Handle a key change. UP accepts and DOWN rejects a pending comparison;
    /// RIGHT sends a security request.
    pub fn on_keys<S, D>(
        &mut self,
        stack: &mut S,
        display: &mut D,
        keys: Keys,
        connection: Option<&Connection>,
    ) -> KeyAction
    where
        S: PeripheralStack + ?Sized,
        D: StatusDisplay + ?Sized,
    {
        if keys.contains(Keys::UP) && self.accept(stack, display) {
            return KeyAction::Accepted;
        }

        if keys.contains(Keys::DOWN) && self.reject(stack, display) {
            return KeyAction::Rejected;
        }

        if keys.contains(Keys::RIGHT) {
            match self.request_security(stack, connection) {
                Ok(()) => return KeyAction::SecurityRequested,
                Err(PairingError::NotConnected) => {
                    debug!("Security request ignored, not connected");
                }
                Err(e) => {
                    warn!("Security request failed: {}", e);
                    display.write_line(DisplayLine::Decision, "Sec Req failed");
                }
            }
        }

        KeyAction::Ignored
    }

    /// Forget the pending comparison, e.g. after the link dropped
    pub fn invalidate(&mut self) {
        if let Some(request) = self.pending.take() {
            debug!("Comparison on 0x{:04X} invalidated", request.handle);
        }
    }

    fn respond<S, D>(&mut self, stack: &mut S, display: &mut D, matched: bool) -> bool
    where
        S: PeripheralStack + ?Sized,
        D: StatusDisplay + ?Sized,
    {
        let Some(request) = self.pending.take() else {
            return false;
        };

        info!(
            "Comparison {} on 0x{:04X}: {}",
            request.numeric_comparison,
            request.handle,
            if matched { "match" } else { "no match" }
        );

        match stack.passcode_response(request.handle, BOND_STATUS_SUCCESS, matched) {
            Ok(()) => {
                let text = if matched {
                    "Codes Match!"
                } else {
                    "Codes Don't Match :("
                };
                display.write_line(DisplayLine::Decision, text);
            }
            Err(e) => {
                warn!("Passcode response failed: {}", e);
                display.write_line(DisplayLine::Decision, "Response failed");
            }
        }

        true
    }
}
