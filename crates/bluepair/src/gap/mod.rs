//! Generic Access Profile types used by the peripheral
//!
//! Addresses, link states reported by the GAP peripheral role and the
//! advertising payload builder.

pub mod advertising;
pub mod constants;
pub mod types;

pub use advertising::{parse_advertising_data, AdvertisingData};
pub use constants::*;
pub use types::*;
