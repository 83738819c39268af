//! Outbound calls into the BLE stack
//!
//! The link layer, GAP role, GATT services and bond manager sit behind
//! [`PeripheralStack`]. Its crypto subsystem is reached through the
//! [`EccProvider`] supertrait.

use crate::config::BondConfig;
use crate::error::PairingResult;
use crate::gap::{BdAddr, SystemId};
use crate::smp::{
    AuthRequirements, EccKeyPair, EccProvider, IoCapability, PairingMode, PeerOobData,
    SecureConnectionsMode,
};

/// Bond manager parameters written at start-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BondManagerParams {
    pub pairing_mode: PairingMode,
    pub mitm: bool,
    pub io_capability: IoCapability,
    pub bonding: bool,
    pub secure_connections: SecureConnectionsMode,
    /// Peer OOB record, present when remote OOB is enabled
    pub remote_oob: Option<PeerOobData>,
    /// Local ECC key record
    pub ecc_keys: EccKeyPair,
}

impl From<&BondConfig> for BondManagerParams {
    fn from(config: &BondConfig) -> Self {
        Self {
            pairing_mode: config.pairing_mode,
            mitm: config.mitm,
            io_capability: config.io_capability,
            bonding: config.bonding,
            secure_connections: config.secure_connections,
            remote_oob: config
                .remote_oob_enabled
                .then(|| config.peer_oob.clone()),
            ecc_keys: config.ecc_keys.clone(),
        }
    }
}

/// BLE stack as seen by the pairing coordinator
pub trait PeripheralStack: EccProvider {
    /// Program a static own address
    fn set_own_address(&mut self, addr: BdAddr) -> PairingResult<()>;

    /// Enable advertising at start-up; `off_time` 0 keeps it off after a timeout
    fn set_advertising_enabled(&mut self, enabled: bool, off_time: u16) -> PairingResult<()>;

    fn set_advertising_data(&mut self, data: &[u8]) -> PairingResult<()>;

    fn set_scan_response_data(&mut self, data: &[u8]) -> PairingResult<()>;

    /// Advertising interval for limited and general discovery, 0.625 ms units
    fn set_advertising_interval(&mut self, interval: u16) -> PairingResult<()>;

    /// GAP device name characteristic
    fn set_device_name(&mut self, name: &str) -> PairingResult<()>;

    fn set_bond_manager_params(&mut self, params: &BondManagerParams) -> PairingResult<()>;

    /// Start the peripheral role and register for pairing callbacks
    fn start(&mut self) -> PairingResult<()>;

    /// Device Information system ID characteristic
    fn set_system_id(&mut self, id: SystemId) -> PairingResult<()>;

    /// Answer a passcode request. For numeric comparison `matched` carries
    /// the user's verdict in place of a passcode.
    fn passcode_response(&mut self, handle: u16, status: u8, matched: bool) -> PairingResult<()>;

    /// Ask the central to (re)start pairing
    fn send_security_request(&mut self, handle: u16, auth_req: AuthRequirements)
        -> PairingResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_follow_config() {
        let mut config = BondConfig::default();
        let params = BondManagerParams::from(&config);

        assert_eq!(params.pairing_mode, PairingMode::WaitForRequest);
        assert_eq!(params.io_capability, IoCapability::DisplayOnly);
        assert_eq!(params.remote_oob.as_ref(), Some(&config.peer_oob));
        assert_eq!(params.ecc_keys, config.ecc_keys);

        config.remote_oob_enabled = false;
        assert!(BondManagerParams::from(&config).remote_oob.is_none());
    }
}
