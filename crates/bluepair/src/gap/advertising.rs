//! Advertising and scan response payloads
//!
//! Builds the length/type/value structures handed to the stack for the
//! advertising and scan response data.

use crate::error::{PairingError, PairingResult};
use crate::gap::constants::*;
use byteorder::{LittleEndian, WriteBytesExt};

/// Advertising data under construction, at most 31 bytes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvertisingData {
    data: Vec<u8>,
}

impl AdvertisingData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one AD structure
    pub fn push(&mut self, ad_type: u8, value: &[u8]) -> PairingResult<&mut Self> {
        let needed = 2 + value.len();
        if self.data.len() + needed > MAX_ADV_DATA_LEN {
            return Err(PairingError::InvalidParameter(format!(
                "AD type 0x{:02X} does not fit: {} of {} bytes used",
                ad_type,
                self.data.len(),
                MAX_ADV_DATA_LEN
            )));
        }

        self.data.push((value.len() + 1) as u8);
        self.data.push(ad_type);
        self.data.extend_from_slice(value);

        Ok(self)
    }

    pub fn flags(&mut self, flags: u8) -> PairingResult<&mut Self> {
        self.push(ADV_TYPE_FLAGS, &[flags])
    }

    pub fn complete_local_name(&mut self, name: &str) -> PairingResult<&mut Self> {
        self.push(ADV_TYPE_COMPLETE_LOCAL_NAME, name.as_bytes())
    }

    /// Preferred connection interval range, both in 1.25 ms units
    pub fn slave_conn_interval_range(&mut self, min: u16, max: u16) -> PairingResult<&mut Self> {
        let mut value = Vec::with_capacity(4);
        value
            .write_u16::<LittleEndian>(min)
            .and_then(|_| value.write_u16::<LittleEndian>(max))
            .map_err(|e| PairingError::InvalidParameter(e.to_string()))?;

        self.push(ADV_TYPE_SLAVE_CONN_INTERVAL_RANGE, &value)
    }

    pub fn tx_power_level(&mut self, dbm: i8) -> PairingResult<&mut Self> {
        self.push(ADV_TYPE_TX_POWER_LEVEL, &[dbm as u8])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Parse advertisement data into (type, data) tuples
pub fn parse_advertising_data(data: &[u8]) -> Vec<(u8, Vec<u8>)> {
    let mut result = Vec::new();
    let mut i = 0;

    while i < data.len() {
        let length = data[i] as usize;
        if length == 0 || i + length >= data.len() {
            break;
        }

        let ad_type = data[i + 1];
        let ad_data = data[i + 2..i + 1 + length].to_vec();

        result.push((ad_type, ad_data));

        i += 1 + length;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_response_layout() {
        let mut data = AdvertisingData::new();
        data.complete_local_name("SimpleBLEPeripheral")
            .unwrap()
            .slave_conn_interval_range(80, 800)
            .unwrap()
            .tx_power_level(0)
            .unwrap();

        // 2 + 19 name, 2 + 4 interval, 2 + 1 power
        assert_eq!(data.len(), 30);
        assert_eq!(data.as_bytes()[0], 0x14);
        assert_eq!(data.as_bytes()[1], ADV_TYPE_COMPLETE_LOCAL_NAME);

        let parsed = parse_advertising_data(data.as_bytes());
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].1, b"SimpleBLEPeripheral".to_vec());
        assert_eq!(parsed[1].0, ADV_TYPE_SLAVE_CONN_INTERVAL_RANGE);
        assert_eq!(parsed[1].1, vec![0x50, 0x00, 0x20, 0x03]);
        assert_eq!(parsed[2], (ADV_TYPE_TX_POWER_LEVEL, vec![0x00]));
    }

    #[test]
    fn test_flags_only_advert() {
        let mut data = AdvertisingData::new();
        data.flags(ADV_FLAG_GENERAL_DISCOVERABLE | ADV_FLAG_BREDR_NOT_SUPPORTED)
            .unwrap();

        assert_eq!(data.as_bytes(), &[0x02, ADV_TYPE_FLAGS, 0x06]);
    }

    #[test]
    fn test_overflow_rejected() {
        let mut data = AdvertisingData::new();
        assert!(data.complete_local_name(&"x".repeat(29)).is_ok());
        assert!(data.flags(0x06).is_err());
        assert_eq!(data.len(), 31);
    }
}
