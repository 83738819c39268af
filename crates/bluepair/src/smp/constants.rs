//! Constants for the Security Manager and bond manager

// IO Capability values
pub const SMP_IO_CAPABILITY_DISPLAY_ONLY: u8 = 0x00;
pub const SMP_IO_CAPABILITY_DISPLAY_YES_NO: u8 = 0x01;
pub const SMP_IO_CAPABILITY_KEYBOARD_ONLY: u8 = 0x02;
pub const SMP_IO_CAPABILITY_NO_INPUT_NO_OUTPUT: u8 = 0x03;
pub const SMP_IO_CAPABILITY_KEYBOARD_DISPLAY: u8 = 0x04;

// Authentication Requirements bit masks
pub const SMP_AUTH_REQ_BONDING: u8 = 0x01;
pub const SMP_AUTH_REQ_MITM: u8 = 0x04;
pub const SMP_AUTH_REQ_SC: u8 = 0x08;
pub const SMP_AUTH_REQ_KEYPRESS: u8 = 0x10;
pub const SMP_AUTH_REQ_CT2: u8 = 0x20;

// Pairing Failed reason codes
pub const SMP_REASON_PASSKEY_ENTRY_FAILED: u8 = 0x01;
pub const SMP_REASON_OOB_NOT_AVAILABLE: u8 = 0x02;
pub const SMP_REASON_AUTHENTICATION_REQUIREMENTS: u8 = 0x03;
pub const SMP_REASON_CONFIRM_VALUE_FAILED: u8 = 0x04;
pub const SMP_REASON_PAIRING_NOT_SUPPORTED: u8 = 0x05;
pub const SMP_REASON_ENCRYPTION_KEY_SIZE: u8 = 0x06;
pub const SMP_REASON_COMMAND_NOT_SUPPORTED: u8 = 0x07;
pub const SMP_REASON_UNSPECIFIED_REASON: u8 = 0x08;
pub const SMP_REASON_REPEATED_ATTEMPTS: u8 = 0x09;
pub const SMP_REASON_INVALID_PARAMETERS: u8 = 0x0A;
pub const SMP_REASON_DHKEY_CHECK_FAILED: u8 = 0x0B;
pub const SMP_REASON_NUMERIC_COMPARISON_FAILED: u8 = 0x0C;

/// Status reported by the bond manager for a successful step
pub const BOND_STATUS_SUCCESS: u8 = 0x00;

// Bond manager pairing state codes
pub const PAIRING_STATE_STARTED: u8 = 0x00;
pub const PAIRING_STATE_COMPLETE: u8 = 0x01;
pub const PAIRING_STATE_BONDED: u8 = 0x02;
pub const PAIRING_STATE_BOND_SAVED: u8 = 0x03;

// Bond manager pairing modes
pub const PAIRING_MODE_NO_PAIRING: u8 = 0x00;
pub const PAIRING_MODE_WAIT_FOR_REQ: u8 = 0x01;
pub const PAIRING_MODE_INITIATE: u8 = 0x02;

// Secure Connections modes
pub const SECURE_CONNECTION_NONE: u8 = 0x00;
pub const SECURE_CONNECTION_ALLOW: u8 = 0x01;
pub const SECURE_CONNECTION_ONLY: u8 = 0x02;

/// Length of an OOB random or confirm value
pub const OOB_VALUE_LEN: usize = 16;

/// Length of one P-256 coordinate or private scalar
pub const ECC_KEY_LEN: usize = 32;
