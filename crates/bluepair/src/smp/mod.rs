//! Security Manager types and the out-of-band exchange
//!
//! This module holds the wire values the bond manager is configured with and
//! the engine that owns the local ECC key record and the Secure Connections
//! OOB confirm material.

mod constants;
mod oob;
mod types;

// Re-export public API
pub use self::constants::*;
pub use self::oob::*;
pub use self::types::*;
