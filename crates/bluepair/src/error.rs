//! Error types for the bluepair library
//!
//! This module defines the error types used throughout the library.

use thiserror::Error;

/// Errors that can occur while coordinating pairing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PairingError {
    #[error("Stack call failed: {0}")]
    Stack(String),

    #[error("Event queue cannot store the message")]
    QueueFull,

    #[error("Invalid OOB data: {0}")]
    InvalidOobData(&'static str),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("No active connection")]
    NotConnected,
}

/// Result type for pairing operations
pub type PairingResult<T> = Result<T, PairingError>;
