use crate::error::PairingError;
use crate::gap::constants::*;
use std::fmt;
use std::str::FromStr;

/// Bluetooth device address, stored in over-the-air (little-endian) order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BdAddr {
    pub bytes: [u8; 6],
}

impl BdAddr {
    pub fn new(bytes: [u8; 6]) -> Self {
        Self { bytes }
    }
}

impl fmt::Display for BdAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            self.bytes[5],
            self.bytes[4],
            self.bytes[3],
            self.bytes[2],
            self.bytes[1],
            self.bytes[0]
        )
    }
}

/// Parses the `Display` form, most significant byte first.
impl FromStr for BdAddr {
    type Err = PairingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 6 {
            return Err(PairingError::InvalidParameter(format!(
                "address must have 6 octets: {}",
                s
            )));
        }

        let mut bytes = [0u8; 6];
        for (i, part) in parts.iter().enumerate() {
            bytes[5 - i] = u8::from_str_radix(part, 16).map_err(|_| {
                PairingError::InvalidParameter(format!("invalid address octet: {}", part))
            })?;
        }

        Ok(Self { bytes })
    }
}

/// Device Information system ID derived from a device address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemId(pub [u8; SYSTEM_ID_LEN]);

impl SystemId {
    /// Spreads the six address bytes over eight, with bytes 3 and 4 zeroed.
    ///
    /// Works on the stored over-the-air order, least significant byte first.
    /// An address displayed as `AA:BB:CC:DD:EE:FF` therefore yields
    /// `FF EE DD 00 00 CC BB AA`.
    pub fn from_address(addr: &BdAddr) -> Self {
        let a = &addr.bytes;
        SystemId([a[0], a[1], a[2], 0x00, 0x00, a[3], a[4], a[5]])
    }

    pub fn as_bytes(&self) -> &[u8; SYSTEM_ID_LEN] {
        &self.0
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let octets: Vec<String> = self.0.iter().map(|b| hex::encode_upper([*b])).collect();
        write!(f, "{}", octets.join(" "))
    }
}

/// Link state reported by the GAP peripheral role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Role created, not yet started
    Init,
    /// Device started with the given own address
    Started { own_address: BdAddr },
    /// Advertising, not connected
    Advertising,
    /// Connection established
    Connected { handle: u16, peer: BdAddr },
    /// Connected and advertising at the same time
    ConnectedAdvertising,
    /// Disconnected, waiting to advertise again
    Waiting,
    /// Disconnected after a supervision timeout
    WaitingAfterTimeout,
    /// The role reported an error
    Error,
    /// A state code this library does not know about
    Unknown(u8),
}

impl LinkState {
    /// Raw role state code
    pub fn code(&self) -> u8 {
        match self {
            LinkState::Init => LINK_STATE_INIT,
            LinkState::Started { .. } => LINK_STATE_STARTED,
            LinkState::Advertising => LINK_STATE_ADVERTISING,
            LinkState::Connected { .. } => LINK_STATE_CONNECTED,
            LinkState::ConnectedAdvertising => LINK_STATE_CONNECTED_ADV,
            LinkState::Waiting => LINK_STATE_WAITING,
            LinkState::WaitingAfterTimeout => LINK_STATE_WAITING_AFTER_TIMEOUT,
            LinkState::Error => LINK_STATE_ERROR,
            LinkState::Unknown(code) => *code,
        }
    }

    /// Whether the link is gone in this state
    pub fn is_disconnected(&self) -> bool {
        matches!(self, LinkState::Waiting | LinkState::WaitingAfterTimeout)
    }
}
