// GAP role link states as reported by the peripheral role
pub const LINK_STATE_INIT: u8 = 0x00;
pub const LINK_STATE_STARTED: u8 = 0x01;
pub const LINK_STATE_ADVERTISING: u8 = 0x02;
pub const LINK_STATE_WAITING: u8 = 0x03;
pub const LINK_STATE_WAITING_AFTER_TIMEOUT: u8 = 0x04;
pub const LINK_STATE_CONNECTED: u8 = 0x05;
pub const LINK_STATE_CONNECTED_ADV: u8 = 0x06;
pub const LINK_STATE_ERROR: u8 = 0x07;

// Advertising Data Types
pub const ADV_TYPE_FLAGS: u8 = 0x01;
pub const ADV_TYPE_COMPLETE_LOCAL_NAME: u8 = 0x09;
pub const ADV_TYPE_TX_POWER_LEVEL: u8 = 0x0A;
pub const ADV_TYPE_SLAVE_CONN_INTERVAL_RANGE: u8 = 0x12;

// Advertising flags
pub const ADV_FLAG_GENERAL_DISCOVERABLE: u8 = 0x02;
pub const ADV_FLAG_BREDR_NOT_SUPPORTED: u8 = 0x04;

/// Maximum advertising or scan response payload
pub const MAX_ADV_DATA_LEN: usize = 31;

/// Length of the Device Information system ID characteristic
pub const SYSTEM_ID_LEN: usize = 8;

// Advertising and connection defaults
pub const DEFAULT_ADVERTISING_INTERVAL: u16 = 160; // 100 ms in 0.625 ms units
pub const DEFAULT_DESIRED_MIN_CONN_INTERVAL: u16 = 80; // 100 ms in 1.25 ms units
pub const DEFAULT_DESIRED_MAX_CONN_INTERVAL: u16 = 800; // 1 s in 1.25 ms units
