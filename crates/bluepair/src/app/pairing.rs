//! Link and pairing progress of the single tracked connection
//!
//! Link states come from the GAP role, pairing states from the bond manager.
//! Each transition produces one status line.

use super::display::{DisplayLine, StatusDisplay};
use super::stack::PeripheralStack;
use crate::gap::{BdAddr, LinkState, SystemId};
use crate::smp::{reason_description, PairingState, BOND_STATUS_SUCCESS};
use tracing::{debug, info, warn};

/// The connection this peripheral is serving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub handle: u16,
    pub peer: BdAddr,
}

/// Result of a pairing or bond step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingOutcome {
    Success,
    /// Stack status code, shown as reported
    Failed(u8),
}

impl PairingOutcome {
    pub fn from_status(status: u8) -> Self {
        if status == BOND_STATUS_SUCCESS {
            PairingOutcome::Success
        } else {
            PairingOutcome::Failed(status)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PairingOutcome::Success)
    }
}

/// Progress of the current pairing attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairingPhase {
    #[default]
    Idle,
    Started,
    Complete(PairingOutcome),
    Bonded(PairingOutcome),
    BondSaved(PairingOutcome),
}

/// Tracks the link and the pairing session on it
#[derive(Debug, Default)]
pub struct PairingStateMachine {
    link: Option<LinkState>,
    connection: Option<Connection>,
    phase: PairingPhase,
    system_id: Option<SystemId>,
}

impl PairingStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last link state reported, if any
    pub fn link(&self) -> Option<LinkState> {
        self.link
    }

    pub fn connection(&self) -> Option<&Connection> {
        self.connection.as_ref()
    }

    pub fn phase(&self) -> PairingPhase {
        self.phase
    }

    /// System ID published for the current connection
    pub fn system_id(&self) -> Option<SystemId> {
        self.system_id
    }

    /// Adopt the handle a passcode request arrived on.
    ///
    /// Only a connection the link reported is updated; a request on an
    /// untracked link does not create one.
    pub fn set_connection_handle(&mut self, handle: u16) {
        match self.connection.as_mut() {
            Some(connection) => connection.handle = handle,
            None => debug!("Passcode request on 0x{:04X} without a tracked connection", handle),
        }
    }

    /// Handle a GAP role state change.
    ///
    /// Returns `true` when the link went down, so pending user decisions can
    /// be dropped.
    pub fn on_link_state<S, D>(&mut self, stack: &mut S, display: &mut D, state: LinkState) -> bool
    where
        S: PeripheralStack + ?Sized,
        D: StatusDisplay + ?Sized,
    {
        info!("Link state 0x{:02X} {:?}", state.code(), state);
        self.link = Some(state);

        match state {
            LinkState::Started { own_address } => {
                display.write_line(DisplayLine::Address, &own_address.to_string());
                display.write_line(DisplayLine::Status, "Initialized");
            }
            LinkState::Advertising => {
                display.write_line(DisplayLine::Status, "Advertising");
            }
            LinkState::Connected { handle, peer } => {
                self.connection = Some(Connection { handle, peer });
                self.phase = PairingPhase::Idle;

                let id = SystemId::from_address(&peer);
                self.system_id = Some(id);
                if let Err(e) = stack.set_system_id(id) {
                    warn!("Failed to publish system ID {}: {}", id, e);
                }
                debug!("System ID {}", id);

                display.write_line(DisplayLine::Status, "Connected");
                display.write_line(DisplayLine::Peer, &peer.to_string());
            }
            LinkState::ConnectedAdvertising => {
                display.write_line(DisplayLine::Status, "Connected Advertising");
            }
            LinkState::Waiting => {
                display.write_line(DisplayLine::Status, "Disconnected");
            }
            LinkState::WaitingAfterTimeout => {
                display.write_line(DisplayLine::Status, "Timed Out");
            }
            LinkState::Error => {
                display.write_line(DisplayLine::Status, "Error");
            }
            LinkState::Init | LinkState::Unknown(_) => {
                display.clear_line(DisplayLine::Status);
            }
        }

        if state.is_disconnected() {
            self.drop_connection(display);
        }
        state.is_disconnected()
    }

    /// Handle a bond manager pairing state report
    pub fn on_pairing_state<D>(&mut self, display: &mut D, state: PairingState, status: u8)
    where
        D: StatusDisplay + ?Sized,
    {
        let outcome = PairingOutcome::from_status(status);

        match state {
            PairingState::Started => {
                info!("Pairing started");
                self.phase = PairingPhase::Started;
                display.write_line(DisplayLine::Status, "Pairing started");
            }
            PairingState::Complete => {
                self.phase = PairingPhase::Complete(outcome);
                match outcome {
                    PairingOutcome::Success => {
                        info!("Pairing complete");
                        display.write_line(DisplayLine::Status, "Pairing success");
                    }
                    PairingOutcome::Failed(code) => {
                        warn!(
                            "Pairing failed: 0x{:02X} ({})",
                            code,
                            reason_description(code)
                        );
                        let text = format!("Pairing fail: {}", code);
                        display.write_line(DisplayLine::Status, &text);
                    }
                }
            }
            PairingState::Bonded => {
                self.phase = PairingPhase::Bonded(outcome);
                match outcome {
                    PairingOutcome::Success => {
                        info!("Bonded");
                        display.write_line(DisplayLine::Status, "Bonding success");
                    }
                    PairingOutcome::Failed(code) => {
                        warn!("Bonding failed: 0x{:02X}", code);
                    }
                }
            }
            PairingState::BondSaved => {
                self.phase = PairingPhase::BondSaved(outcome);
                match outcome {
                    PairingOutcome::Success => {
                        info!("Bond saved");
                        display.write_line(DisplayLine::Status, "Bond save success");
                    }
                    PairingOutcome::Failed(code) => {
                        warn!("Bond save failed: 0x{:02X}", code);
                        let text = format!("Bond save failed: {}", code);
                        display.write_line(DisplayLine::Status, &text);
                    }
                }
            }
        }
    }

    fn drop_connection<D>(&mut self, display: &mut D)
    where
        D: StatusDisplay + ?Sized,
    {
        if let Some(connection) = self.connection.take() {
            debug!("Connection 0x{:04X} to {} dropped", connection.handle, connection.peer);
        }
        self.phase = PairingPhase::Idle;
        self.system_id = None;

        display.clear_line(DisplayLine::Peer);
        display.clear_line(DisplayLine::Comparison);
        display.clear_line(DisplayLine::Decision);
    }
}
