//! Type definitions for the Security Manager and bond manager
use super::constants::*;
use std::fmt;

/// IO Capability types for pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoCapability {
    /// Display only capability
    DisplayOnly,
    /// Display with yes/no capability
    DisplayYesNo,
    /// Keyboard only
    KeyboardOnly,
    /// No input, no output
    NoInputNoOutput,
    /// Both keyboard and display
    KeyboardDisplay,
}

impl IoCapability {
    /// Convert to u8 value for protocol
    pub fn to_u8(&self) -> u8 {
        match self {
            IoCapability::DisplayOnly => SMP_IO_CAPABILITY_DISPLAY_ONLY,
            IoCapability::DisplayYesNo => SMP_IO_CAPABILITY_DISPLAY_YES_NO,
            IoCapability::KeyboardOnly => SMP_IO_CAPABILITY_KEYBOARD_ONLY,
            IoCapability::NoInputNoOutput => SMP_IO_CAPABILITY_NO_INPUT_NO_OUTPUT,
            IoCapability::KeyboardDisplay => SMP_IO_CAPABILITY_KEYBOARD_DISPLAY,
        }
    }
}

impl fmt::Display for IoCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoCapability::DisplayOnly => write!(f, "Display Only"),
            IoCapability::DisplayYesNo => write!(f, "Display Yes/No"),
            IoCapability::KeyboardOnly => write!(f, "Keyboard Only"),
            IoCapability::NoInputNoOutput => write!(f, "No Input No Output"),
            IoCapability::KeyboardDisplay => write!(f, "Keyboard Display"),
        }
    }
}

/// Authentication requirements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthRequirements {
    /// Whether bonding is required
    pub bonding: bool,
    /// Whether MITM protection is required
    pub mitm: bool,
    /// Whether Secure Connections is required
    pub secure_connections: bool,
    /// Whether keypress notifications are required
    pub keypress_notifications: bool,
    /// Whether CT2 feature is supported
    pub ct2: bool,
}

impl AuthRequirements {
    /// Create new authentication requirements
    pub fn new(bonding: bool, mitm: bool, secure_connections: bool) -> Self {
        Self {
            bonding,
            mitm,
            secure_connections,
            keypress_notifications: false,
            ct2: false,
        }
    }

    /// Bonding, MITM and Secure Connections; sent with a security request
    pub fn secure() -> Self {
        Self::new(true, true, true)
    }

    /// Convert to u8 value for protocol
    pub fn to_u8(&self) -> u8 {
        let mut value = 0;

        if self.bonding {
            value |= SMP_AUTH_REQ_BONDING;
        }

        if self.mitm {
            value |= SMP_AUTH_REQ_MITM;
        }

        if self.secure_connections {
            value |= SMP_AUTH_REQ_SC;
        }

        if self.keypress_notifications {
            value |= SMP_AUTH_REQ_KEYPRESS;
        }

        if self.ct2 {
            value |= SMP_AUTH_REQ_CT2;
        }

        value
    }
}

/// When the bond manager pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingMode {
    /// Reject pairing requests
    NoPairing,
    /// Wait for the central to request pairing
    WaitForRequest,
    /// Send a security request as soon as connected
    Initiate,
}

impl PairingMode {
    pub fn to_u8(&self) -> u8 {
        match self {
            PairingMode::NoPairing => PAIRING_MODE_NO_PAIRING,
            PairingMode::WaitForRequest => PAIRING_MODE_WAIT_FOR_REQ,
            PairingMode::Initiate => PAIRING_MODE_INITIATE,
        }
    }
}

/// Secure Connections policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecureConnectionsMode {
    /// Legacy pairing only
    None,
    /// Secure Connections when the peer supports it
    Allow,
    /// Refuse legacy pairing
    Only,
}

impl SecureConnectionsMode {
    pub fn to_u8(&self) -> u8 {
        match self {
            SecureConnectionsMode::None => SECURE_CONNECTION_NONE,
            SecureConnectionsMode::Allow => SECURE_CONNECTION_ALLOW,
            SecureConnectionsMode::Only => SECURE_CONNECTION_ONLY,
        }
    }
}

/// Pairing progress reported by the bond manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingState {
    /// Pairing request received or sent
    Started,
    /// Pairing finished, successfully or not
    Complete,
    /// Link encrypted with a stored bond
    Bonded,
    /// Bond written to persistent storage
    BondSaved,
}

impl PairingState {
    /// Convert to u8 value
    pub fn to_u8(&self) -> u8 {
        match self {
            PairingState::Started => PAIRING_STATE_STARTED,
            PairingState::Complete => PAIRING_STATE_COMPLETE,
            PairingState::Bonded => PAIRING_STATE_BONDED,
            PairingState::BondSaved => PAIRING_STATE_BOND_SAVED,
        }
    }

    /// Convert from u8 value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            PAIRING_STATE_STARTED => Some(PairingState::Started),
            PAIRING_STATE_COMPLETE => Some(PairingState::Complete),
            PAIRING_STATE_BONDED => Some(PairingState::Bonded),
            PAIRING_STATE_BOND_SAVED => Some(PairingState::BondSaved),
            _ => None,
        }
    }
}

/// Short description of a pairing failure reason, for logs
pub fn reason_description(status: u8) -> &'static str {
    match status {
        BOND_STATUS_SUCCESS => "success",
        SMP_REASON_PASSKEY_ENTRY_FAILED => "passkey entry failed",
        SMP_REASON_OOB_NOT_AVAILABLE => "OOB data not available",
        SMP_REASON_AUTHENTICATION_REQUIREMENTS => "authentication requirements not met",
        SMP_REASON_CONFIRM_VALUE_FAILED => "confirm value failed",
        SMP_REASON_PAIRING_NOT_SUPPORTED => "pairing not supported",
        SMP_REASON_ENCRYPTION_KEY_SIZE => "encryption key size",
        SMP_REASON_COMMAND_NOT_SUPPORTED => "command not supported",
        SMP_REASON_UNSPECIFIED_REASON => "unspecified reason",
        SMP_REASON_REPEATED_ATTEMPTS => "repeated attempts",
        SMP_REASON_INVALID_PARAMETERS => "invalid parameters",
        SMP_REASON_DHKEY_CHECK_FAILED => "DHKey check failed",
        SMP_REASON_NUMERIC_COMPARISON_FAILED => "numeric comparison failed",
        _ => "stack specific",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_request_auth_byte() {
        assert_eq!(AuthRequirements::secure().to_u8(), 0x0D);
        assert_eq!(AuthRequirements::new(true, false, false).to_u8(), 0x01);
        assert_eq!(AuthRequirements::default().to_u8(), 0x00);
    }

    #[test]
    fn test_pairing_state_codes() {
        for state in [
            PairingState::Started,
            PairingState::Complete,
            PairingState::Bonded,
            PairingState::BondSaved,
        ] {
            assert_eq!(PairingState::from_u8(state.to_u8()), Some(state));
        }
        assert_eq!(PairingState::from_u8(0x04), None);
    }

    #[test]
    fn test_io_capability() {
        assert_eq!(IoCapability::DisplayOnly.to_u8(), 0x00);
        assert_eq!(IoCapability::KeyboardDisplay.to_u8(), 0x04);
        assert_eq!(IoCapability::DisplayOnly.to_string(), "Display Only");
    }

    #[test]
    fn test_reason_description() {
        assert_eq!(reason_description(0x0C), "numeric comparison failed");
        assert_eq!(reason_description(0x3D), "stack specific");
    }
}
