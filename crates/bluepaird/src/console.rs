//! Console collaborators for running the coordinator without hardware
//!
//! A stack that logs every outbound call, a display that logs every line,
//! and a parser turning typed commands into stack and board callbacks.

use bluepair::app::{BondManagerParams, DisplayLine, Keys, StackCallbacks, StatusDisplay};
use bluepair::smp::{
    AuthRequirements, EccProvider, PairingState, ECC_KEY_LEN, OOB_VALUE_LEN,
};
use bluepair::{BdAddr, LinkState, PairingError, PairingResult, PeripheralStack, SystemId};
use tracing::{info, warn};

/// Display that writes each line to the log
#[derive(Debug, Default)]
pub struct ConsoleDisplay;

impl StatusDisplay for ConsoleDisplay {
    fn write_line(&mut self, line: DisplayLine, text: &str) {
        info!(target: "display", "[{}] {}", line, text);
    }
}

/// Stack stand-in that logs outbound calls.
///
/// It has no crypto subsystem: the OOB confirm it returns is a fixed demo
/// value, not one derived from the key.
#[derive(Debug)]
pub struct LoggingStack {
    demo_confirm: [u8; OOB_VALUE_LEN],
}

impl LoggingStack {
    pub fn new(demo_confirm: [u8; OOB_VALUE_LEN]) -> Self {
        Self { demo_confirm }
    }
}

impl EccProvider for LoggingStack {
    fn request_ecc_keys(&mut self) -> PairingResult<()> {
        info!(target: "stack", "request ECC keys");
        Ok(())
    }

    fn sc_confirm_oob(
        &mut self,
        public_key_x: &[u8; ECC_KEY_LEN],
        oob_random: &[u8; OOB_VALUE_LEN],
    ) -> PairingResult<[u8; OOB_VALUE_LEN]> {
        info!(
            target: "stack",
            "SC OOB confirm for PKx {} r {}",
            hex::encode_upper(public_key_x),
            hex::encode_upper(oob_random)
        );
        warn!(target: "stack", "No crypto subsystem, returning the demo confirm value");
        Ok(self.demo_confirm)
    }
}

impl PeripheralStack for LoggingStack {
    fn set_own_address(&mut self, addr: BdAddr) -> PairingResult<()> {
        info!(target: "stack", "own address {}", addr);
        Ok(())
    }

    fn set_advertising_enabled(&mut self, enabled: bool, off_time: u16) -> PairingResult<()> {
        info!(target: "stack", "advertising enabled={} off_time={}", enabled, off_time);
        Ok(())
    }

    fn set_advertising_data(&mut self, data: &[u8]) -> PairingResult<()> {
        info!(target: "stack", "advertising data {}", hex::encode_upper(data));
        Ok(())
    }

    fn set_scan_response_data(&mut self, data: &[u8]) -> PairingResult<()> {
        info!(target: "stack", "scan response data {}", hex::encode_upper(data));
        Ok(())
    }

    fn set_advertising_interval(&mut self, interval: u16) -> PairingResult<()> {
        info!(target: "stack", "advertising interval {}", interval);
        Ok(())
    }

    fn set_device_name(&mut self, name: &str) -> PairingResult<()> {
        info!(target: "stack", "device name '{}'", name);
        Ok(())
    }

    fn set_bond_manager_params(&mut self, params: &BondManagerParams) -> PairingResult<()> {
        info!(
            target: "stack",
            "bond manager: mode 0x{:02X} mitm={} io={} bonding={} sc 0x{:02X} remote_oob={}",
            params.pairing_mode.to_u8(),
            params.mitm,
            params.io_capability,
            params.bonding,
            params.secure_connections.to_u8(),
            params.remote_oob.is_some()
        );
        Ok(())
    }

    fn start(&mut self) -> PairingResult<()> {
        info!(target: "stack", "start peripheral role");
        Ok(())
    }

    fn set_system_id(&mut self, id: SystemId) -> PairingResult<()> {
        info!(target: "stack", "system ID {}", id);
        Ok(())
    }

    fn passcode_response(&mut self, handle: u16, status: u8, matched: bool) -> PairingResult<()> {
        info!(
            target: "stack",
            "passcode response handle 0x{:04X} status 0x{:02X} match={}",
            handle, status, matched
        );
        Ok(())
    }

    fn send_security_request(
        &mut self,
        handle: u16,
        auth_req: AuthRequirements,
    ) -> PairingResult<()> {
        info!(
            target: "stack",
            "security request handle 0x{:04X} auth 0x{:02X}",
            handle,
            auth_req.to_u8()
        );
        Ok(())
    }
}

/// A simulated stack or board event typed on the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Link(LinkState),
    Pairing { state: u8, status: u8 },
    NumericComparison { handle: u16, value: u32 },
    Keys(Keys),
    KeysReady,
}

impl Command {
    /// Hand the command to the matching callback
    pub fn deliver(&self, callbacks: &StackCallbacks, peer: BdAddr) {
        match self {
            Command::Link(state) => callbacks.link_state_changed(*state),
            Command::Pairing { state, status } => callbacks.pairing_state(0, *state, *status),
            Command::NumericComparison { handle, value } => {
                callbacks.passcode_needed(peer, *handle, 0, 0x01, *value)
            }
            Command::Keys(keys) => callbacks.keys_changed(keys.bits()),
            Command::KeysReady => callbacks.ecc_keys_ready(),
        }
    }
}

/// Parse one console line
pub fn parse_command(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();

    match words.as_slice() {
        ["advertise"] => Ok(Command::Link(LinkState::Advertising)),
        ["connect", handle, addr] => Ok(Command::Link(LinkState::Connected {
            handle: parse_u16(handle)?,
            peer: addr.parse().map_err(|e: PairingError| e.to_string())?,
        })),
        ["disconnect"] => Ok(Command::Link(LinkState::Waiting)),
        ["timeout"] => Ok(Command::Link(LinkState::WaitingAfterTimeout)),
        ["pair", state, status] => Ok(Command::Pairing {
            state: pairing_state(state)?,
            status: status.parse().map_err(|_| format!("bad status: {}", status))?,
        }),
        ["numcmp", handle, value] => Ok(Command::NumericComparison {
            handle: parse_u16(handle)?,
            value: value.parse().map_err(|_| format!("bad value: {}", value))?,
        }),
        ["keys", names @ ..] if !names.is_empty() => {
            let mut keys = Keys::empty();
            for name in names {
                keys |= match *name {
                    "select" => Keys::SELECT,
                    "up" => Keys::UP,
                    "down" => Keys::DOWN,
                    "left" => Keys::LEFT,
                    "right" => Keys::RIGHT,
                    other => return Err(format!("unknown key: {}", other)),
                };
            }
            Ok(Command::Keys(keys))
        }
        ["keys-ready"] => Ok(Command::KeysReady),
        _ => Err(format!("unknown command: {}", line.trim())),
    }
}

fn parse_u16(text: &str) -> Result<u16, String> {
    let parsed = match text.strip_prefix("0x") {
        Some(digits) => u16::from_str_radix(digits, 16),
        None => text.parse(),
    };
    parsed.map_err(|_| format!("bad handle: {}", text))
}

fn pairing_state(text: &str) -> Result<u8, String> {
    let state = match text {
        "started" => PairingState::Started,
        "complete" => PairingState::Complete,
        "bonded" => PairingState::Bonded,
        "saved" => PairingState::BondSaved,
        other => return Err(format!("unknown pairing state: {}", other)),
    };
    Ok(state.to_u8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_link_commands() {
        assert_eq!(
            parse_command("connect 0x0001 AA:BB:CC:DD:EE:FF"),
            Ok(Command::Link(LinkState::Connected {
                handle: 1,
                peer: "AA:BB:CC:DD:EE:FF".parse().unwrap(),
            }))
        );
        assert_eq!(
            parse_command("disconnect"),
            Ok(Command::Link(LinkState::Waiting))
        );
        assert!(parse_command("connect 1 nonsense").is_err());
    }

    #[test]
    fn test_logging_stack_returns_demo_confirm() {
        let mut stack = LoggingStack::new([0x5A; OOB_VALUE_LEN]);
        let confirm = stack
            .sc_confirm_oob(&[0x11; ECC_KEY_LEN], &[0x22; OOB_VALUE_LEN])
            .unwrap();
        assert_eq!(confirm, [0x5A; OOB_VALUE_LEN]);
    }

    #[test]
    fn test_connect_publishes_reversed_system_id() {
        let Ok(Command::Link(LinkState::Connected { peer, .. })) =
            parse_command("connect 1 AA:BB:CC:DD:EE:FF")
        else {
            panic!("connect did not parse");
        };
        assert_eq!(
            SystemId::from_address(&peer).to_string(),
            "FF EE DD 00 00 CC BB AA"
        );
    }

    #[test]
    fn test_parse_pairing_and_keys() {
        assert_eq!(
            parse_command("pair complete 1"),
            Ok(Command::Pairing {
                state: PairingState::Complete.to_u8(),
                status: 1
            })
        );
        assert_eq!(
            parse_command("numcmp 2 123456"),
            Ok(Command::NumericComparison {
                handle: 2,
                value: 123456
            })
        );
        assert_eq!(
            parse_command("keys up right"),
            Ok(Command::Keys(Keys::UP | Keys::RIGHT))
        );
        assert!(parse_command("keys").is_err());
        assert!(parse_command("keys sideways").is_err());
        assert!(parse_command("pair finished 0").is_err());
    }
}
