//! bluepair - Secure Connections pairing coordinator for a BLE peripheral
//!
//! This library serialises the asynchronous callbacks of a BLE stack onto a
//! single event loop and drives out-of-band and numeric comparison pairing:
//! it tracks link and pairing progress, derives the local OOB confirm value
//! once the ECC keys are ready, and gates the user's accept/reject decision.
//! The stack and the display are collaborators behind traits.

pub mod app;
pub mod config;
pub mod error;
pub mod gap;
pub mod smp;

// Re-export common types for convenience
pub use app::{
    AppEvent, Dispatcher, DisplayLine, EventQueue, Keys, MemoryDisplay, PairingContext,
    PeripheralStack, StackCallbacks, StatusDisplay,
};
pub use config::PeripheralConfig;
pub use error::{PairingError, PairingResult};
pub use gap::{BdAddr, LinkState, SystemId};
pub use smp::{EccProvider, OobExchangeEngine, PairingState};
