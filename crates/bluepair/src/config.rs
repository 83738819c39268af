//! Peripheral configuration
//!
//! Everything the coordinator hands to the stack at start-up. The defaults
//! describe the Secure Connections OOB example peripheral.

use crate::error::PairingResult;
use crate::gap::{self, AdvertisingData, BdAddr};
use crate::smp::{
    EccKeyPair, IoCapability, PairingMode, PeerOobData, SecureConnectionsMode, OOB_VALUE_LEN,
};

/// Default capacity of the application event queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 32;

/// Peripheral configuration
#[derive(Debug, Clone)]
pub struct PeripheralConfig {
    /// GAP device name characteristic
    pub device_name: String,
    /// Text written to the first display line
    pub title: String,
    /// Static own address to program before starting, if any
    pub own_address: Option<BdAddr>,
    /// Advertising setup
    pub advertising: AdvertisingConfig,
    /// Bond manager setup
    pub bond: BondConfig,
    /// Upper bound on queued application events
    pub queue_capacity: usize,
}

impl Default for PeripheralConfig {
    fn default() -> Self {
        Self {
            device_name: "Security Ex Periph".to_string(),
            title: "Security Ex Periph".to_string(),
            own_address: Some(BdAddr::new([0xBB; 6])),
            advertising: AdvertisingConfig::default(),
            bond: BondConfig::default(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// Advertising configuration
#[derive(Debug, Clone)]
pub struct AdvertisingConfig {
    /// Start advertising when the device starts
    pub initial_enable: bool,
    /// Delay before re-advertising after a timeout, 0 disables re-advertising
    pub off_time: u16,
    /// Advertising interval in 0.625 ms units
    pub interval: u16,
    /// Advertising flags (discoverable mode and BR/EDR support)
    pub flags: u8,
    /// Name carried in the scan response
    pub scan_response_name: String,
    /// Preferred connection interval minimum, 1.25 ms units
    pub min_conn_interval: u16,
    /// Preferred connection interval maximum, 1.25 ms units
    pub max_conn_interval: u16,
    /// Advertised TX power in dBm
    pub tx_power: i8,
}

impl Default for AdvertisingConfig {
    fn default() -> Self {
        Self {
            initial_enable: true,
            off_time: 0,
            interval: gap::DEFAULT_ADVERTISING_INTERVAL,
            flags: gap::ADV_FLAG_GENERAL_DISCOVERABLE | gap::ADV_FLAG_BREDR_NOT_SUPPORTED,
            scan_response_name: "SimpleBLEPeripheral".to_string(),
            min_conn_interval: gap::DEFAULT_DESIRED_MIN_CONN_INTERVAL,
            max_conn_interval: gap::DEFAULT_DESIRED_MAX_CONN_INTERVAL,
            tx_power: 0,
        }
    }
}

impl AdvertisingConfig {
    /// Advertising payload: the flags structure only
    pub fn advert_data(&self) -> PairingResult<AdvertisingData> {
        let mut data = AdvertisingData::new();
        data.flags(self.flags)?;
        Ok(data)
    }

    /// Scan response payload: name, connection interval range and TX power
    pub fn scan_response_data(&self) -> PairingResult<AdvertisingData> {
        let mut data = AdvertisingData::new();
        data.complete_local_name(&self.scan_response_name)?
            .slave_conn_interval_range(self.min_conn_interval, self.max_conn_interval)?
            .tx_power_level(self.tx_power)?;
        Ok(data)
    }
}

/// Bond manager configuration
#[derive(Debug, Clone)]
pub struct BondConfig {
    pub pairing_mode: PairingMode,
    pub mitm: bool,
    pub io_capability: IoCapability,
    pub bonding: bool,
    pub secure_connections: SecureConnectionsMode,
    /// Accept the peer's OOB record for Secure Connections
    pub remote_oob_enabled: bool,
    /// Peer OOB record received out of band
    pub peer_oob: PeerOobData,
    /// Local ECC key record handed to the bond manager
    pub ecc_keys: EccKeyPair,
    /// Local OOB random value
    pub local_oob_random: [u8; OOB_VALUE_LEN],
}

const PEER_OOB_CONFIRM: [u8; 16] = [
    0x38, 0xc0, 0x4d, 0x01, 0xe8, 0xb1, 0x7b, 0x90, 0x28, 0xad, 0x99, 0x48, 0xad, 0x89, 0x79, 0x4c,
];

const OOB_RANDOM: [u8; 16] = [
    0xA3, 0xDE, 0xBB, 0x31, 0xE6, 0x42, 0x4E, 0x2F, 0x39, 0x7F, 0xF2, 0xD2, 0xC4, 0x89, 0xC6, 0xA7,
];

const LOCAL_PRIVATE_KEY: [u8; 32] = [
    0xe0, 0xbe, 0x5f, 0x31, 0x91, 0xcb, 0xcf, 0x00, 0x4b, 0x8d, 0xc1, 0x4b, 0x90, 0x56, 0x70, 0x8d,
    0x3e, 0x13, 0xaa, 0xfe, 0xea, 0xe5, 0x88, 0xfb, 0x20, 0xcc, 0x51, 0xce, 0x80, 0x65, 0x78, 0x05,
];

const LOCAL_PUBLIC_KEY_X: [u8; 32] = [
    0x9b, 0xa1, 0xdb, 0x47, 0xfd, 0xd2, 0x10, 0xb5, 0x1d, 0x89, 0x98, 0x00, 0x9a, 0xbd, 0xa2, 0x0c,
    0xf1, 0x61, 0x31, 0x72, 0x24, 0xfb, 0x6d, 0x59, 0x25, 0x99, 0x45, 0xc9, 0x3b, 0x11, 0x55, 0x81,
];

const LOCAL_PUBLIC_KEY_Y: [u8; 32] = [
    0x85, 0x18, 0x3b, 0x6b, 0x70, 0x04, 0x9d, 0xb6, 0x7e, 0x8d, 0xef, 0x8a, 0x98, 0xf2, 0x2e, 0xbf,
    0x78, 0xce, 0x6f, 0x76, 0xdf, 0x75, 0x62, 0x33, 0x65, 0x65, 0x41, 0x7b, 0xb3, 0x10, 0x8d, 0xbf,
];

impl Default for BondConfig {
    fn default() -> Self {
        Self {
            pairing_mode: PairingMode::WaitForRequest,
            mitm: true,
            io_capability: IoCapability::DisplayOnly,
            bonding: false,
            secure_connections: SecureConnectionsMode::Only,
            remote_oob_enabled: true,
            peer_oob: PeerOobData::new(BdAddr::new([0xAA; 6]), PEER_OOB_CONFIRM, OOB_RANDOM),
            ecc_keys: EccKeyPair {
                private_key: LOCAL_PRIVATE_KEY,
                public_key_x: LOCAL_PUBLIC_KEY_X,
                public_key_y: LOCAL_PUBLIC_KEY_Y,
            },
            local_oob_random: OOB_RANDOM,
        }
    }
}
