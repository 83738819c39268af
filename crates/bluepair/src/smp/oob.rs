//! Secure Connections out-of-band exchange
//!
//! The engine owns the local ECC key record handed to the bond manager, the
//! local OOB random value and the confirm value derived from them, plus the
//! peer's OOB record received over the side channel. The ECC and AES-CMAC
//! primitives live in the stack's crypto subsystem and are reached through
//! [`EccProvider`].

use super::constants::*;
use crate::error::{PairingError, PairingResult};
use crate::gap::BdAddr;
use std::fmt;
use tracing::{debug, info};

/// Crypto subsystem of the stack
pub trait EccProvider {
    /// Ask for the device's own ECC keys. Completion is signalled later by the
    /// key-ready notification, never by this call.
    fn request_ecc_keys(&mut self) -> PairingResult<()>;

    /// Secure Connections OOB confirm value, `f4(PKx, PKx, r, 0)`
    fn sc_confirm_oob(
        &mut self,
        public_key_x: &[u8; ECC_KEY_LEN],
        oob_random: &[u8; OOB_VALUE_LEN],
    ) -> PairingResult<[u8; OOB_VALUE_LEN]>;
}

/// SMP OOB (Out of Band) data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OobData {
    /// Random value (r)
    pub r: [u8; OOB_VALUE_LEN],
    /// Confirm value (c = f4(PKx, PKx, r, 0))
    pub c: [u8; OOB_VALUE_LEN],
}

impl OobData {
    /// Generate a fresh 128-bit OOB random value
    pub fn random() -> [u8; OOB_VALUE_LEN] {
        rand::random::<[u8; OOB_VALUE_LEN]>()
    }
}

impl Default for OobData {
    fn default() -> Self {
        Self {
            r: [0; OOB_VALUE_LEN],
            c: [0; OOB_VALUE_LEN],
        }
    }
}

/// Static P-256 key pair of this device
#[derive(Clone, PartialEq, Eq)]
pub struct EccKeyPair {
    pub private_key: [u8; ECC_KEY_LEN],
    pub public_key_x: [u8; ECC_KEY_LEN],
    pub public_key_y: [u8; ECC_KEY_LEN],
}

impl fmt::Debug for EccKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EccKeyPair")
            .field("private_key", &"<redacted>")
            .field("public_key_x", &hex::encode(self.public_key_x))
            .field("public_key_y", &hex::encode(self.public_key_y))
            .finish()
    }
}

/// OOB record of the remote device, delivered over the side channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerOobData {
    /// Address the record belongs to
    pub addr: BdAddr,
    /// Peer confirm value
    pub confirm: [u8; OOB_VALUE_LEN],
    /// Peer random value
    pub random: [u8; OOB_VALUE_LEN],
}

impl PeerOobData {
    pub fn new(addr: BdAddr, confirm: [u8; OOB_VALUE_LEN], random: [u8; OOB_VALUE_LEN]) -> Self {
        Self {
            addr,
            confirm,
            random,
        }
    }

    /// Reject records that cannot have come from a real exchange.
    ///
    /// Provenance of the record is the side channel's business; this only
    /// checks its shape.
    pub fn validate(&self) -> PairingResult<()> {
        if self.confirm.iter().all(|b| *b == 0) {
            return Err(PairingError::InvalidOobData("confirm value is all zero"));
        }
        if self.random.iter().all(|b| *b == 0) {
            return Err(PairingError::InvalidOobData("random value is all zero"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyState {
    Unrequested,
    Requested,
    Ready,
}

/// Holds the local key record and OOB confirm material
#[derive(Debug)]
pub struct OobExchangeEngine {
    keys: EccKeyPair,
    local_random: [u8; OOB_VALUE_LEN],
    local_confirm: Option<[u8; OOB_VALUE_LEN]>,
    peer: PeerOobData,
    key_state: KeyState,
}

impl OobExchangeEngine {
    /// Create an engine for a fixed key pair. The key pair does not rotate;
    /// a new one needs a new engine and a new key request.
    pub fn new(keys: EccKeyPair, local_random: [u8; OOB_VALUE_LEN], peer: PeerOobData) -> Self {
        Self {
            keys,
            local_random,
            local_confirm: None,
            peer,
            key_state: KeyState::Unrequested,
        }
    }

    /// Request the device's own ECC keys from the crypto subsystem
    pub fn request_local_keys<P>(&mut self, provider: &mut P) -> PairingResult<()>
    where
        P: EccProvider + ?Sized,
    {
        provider.request_ecc_keys()?;
        self.key_state = KeyState::Requested;
        debug!("Requested local ECC keys");
        Ok(())
    }

    /// Record that the crypto subsystem reported the local keys as ready
    pub fn keys_ready(&mut self) {
        if self.key_state == KeyState::Unrequested {
            debug!("ECC keys reported ready without a request");
        }
        self.key_state = KeyState::Ready;
    }

    /// Whether the key-ready notification has been seen
    pub fn has_local_keys(&self) -> bool {
        self.key_state == KeyState::Ready
    }

    /// Compute the local confirm value from the local public key X coordinate
    /// and the local OOB random value.
    ///
    /// # Panics
    ///
    /// Panics if called before the local keys are ready; the confirm would be
    /// derived from key material the stack has not committed to.
    pub fn compute_confirm<P: EccProvider + ?Sized>(
        &mut self,
        provider: &mut P,
    ) -> PairingResult<[u8; OOB_VALUE_LEN]> {
        assert!(
            self.key_state == KeyState::Ready,
            "OOB confirm computed before the local ECC keys are ready"
        );

        let confirm = provider.sc_confirm_oob(&self.keys.public_key_x, &self.local_random)?;
        self.local_confirm = Some(confirm);
        info!("Local OOB confirm value: {}", hex::encode(confirm));

        Ok(confirm)
    }

    /// Key-ready handling: mark the keys present and derive the confirm value
    pub fn on_keys_ready<P: EccProvider + ?Sized>(
        &mut self,
        provider: &mut P,
    ) -> PairingResult<[u8; OOB_VALUE_LEN]> {
        self.keys_ready();
        self.compute_confirm(provider)
    }

    /// Local OOB record to hand to the peer, once the confirm is known
    pub fn local_oob_data(&self) -> Option<OobData> {
        self.local_confirm.map(|c| OobData {
            r: self.local_random,
            c,
        })
    }

    pub fn local_confirm(&self) -> Option<&[u8; OOB_VALUE_LEN]> {
        self.local_confirm.as_ref()
    }

    pub fn key_pair(&self) -> &EccKeyPair {
        &self.keys
    }

    pub fn peer_oob(&self) -> &PeerOobData {
        &self.peer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic stand-in for the stack's f4
    #[derive(Default)]
    struct FakeCrypto {
        key_requests: usize,
        confirm_calls: usize,
        fail_confirm: bool,
    }

    impl EccProvider for FakeCrypto {
        fn request_ecc_keys(&mut self) -> PairingResult<()> {
            self.key_requests += 1;
            Ok(())
        }

        fn sc_confirm_oob(
            &mut self,
            public_key_x: &[u8; ECC_KEY_LEN],
            oob_random: &[u8; OOB_VALUE_LEN],
        ) -> PairingResult<[u8; OOB_VALUE_LEN]> {
            self.confirm_calls += 1;
            if self.fail_confirm {
                return Err(PairingError::Stack("crypto busy".into()));
            }
            let mut out = [0u8; OOB_VALUE_LEN];
            for i in 0..OOB_VALUE_LEN {
                out[i] = public_key_x[i] ^ public_key_x[i + 16] ^ oob_random[i];
            }
            Ok(out)
        }
    }

    fn engine() -> OobExchangeEngine {
        let keys = EccKeyPair {
            private_key: [0x11; ECC_KEY_LEN],
            public_key_x: [0x22; ECC_KEY_LEN],
            public_key_y: [0x33; ECC_KEY_LEN],
        };
        let peer = PeerOobData::new(BdAddr::new([0xAA; 6]), [0x38; 16], [0xA3; 16]);
        OobExchangeEngine::new(keys, [0x5A; OOB_VALUE_LEN], peer)
    }

    #[test]
    fn test_confirm_after_keys_ready() {
        let mut crypto = FakeCrypto::default();
        let mut engine = engine();

        engine.request_local_keys(&mut crypto).unwrap();
        assert_eq!(crypto.key_requests, 1);
        assert!(engine.local_oob_data().is_none());

        let confirm = engine.on_keys_ready(&mut crypto).unwrap();
        assert_eq!(confirm, [0x5A; 16]);
        assert_eq!(crypto.confirm_calls, 1);

        let oob = engine.local_oob_data().unwrap();
        assert_eq!(oob.r, [0x5A; 16]);
        assert_eq!(oob.c, confirm);
    }

    #[test]
    fn test_confirm_is_deterministic() {
        let mut crypto = FakeCrypto::default();
        let mut first = engine();
        let mut second = engine();

        first.keys_ready();
        second.keys_ready();

        assert_eq!(
            first.compute_confirm(&mut crypto).unwrap(),
            second.compute_confirm(&mut crypto).unwrap()
        );
    }

    #[test]
    #[should_panic(expected = "before the local ECC keys are ready")]
    fn test_confirm_before_keys_panics() {
        let mut crypto = FakeCrypto::default();
        let mut engine = engine();
        engine.request_local_keys(&mut crypto).unwrap();

        let _ = engine.compute_confirm(&mut crypto);
    }

    #[test]
    fn test_confirm_failure_keeps_no_value() {
        let mut crypto = FakeCrypto {
            fail_confirm: true,
            ..Default::default()
        };
        let mut engine = engine();

        assert!(engine.on_keys_ready(&mut crypto).is_err());
        assert!(engine.has_local_keys());
        assert!(engine.local_confirm().is_none());
    }

    #[test]
    fn test_peer_oob_validation() {
        let addr = BdAddr::new([0xAA; 6]);
        assert!(PeerOobData::new(addr, [0x38; 16], [0xA3; 16]).validate().is_ok());
        assert_eq!(
            PeerOobData::new(addr, [0; 16], [0xA3; 16]).validate(),
            Err(PairingError::InvalidOobData("confirm value is all zero"))
        );
        assert!(PeerOobData::new(addr, [0x38; 16], [0; 16]).validate().is_err());
    }

    #[test]
    fn test_private_key_not_in_debug() {
        let text = format!("{:?}", engine().key_pair());
        assert!(text.contains("<redacted>"));
        assert!(!text.contains(&hex::encode([0x11u8; 32])));
    }

    #[test]
    fn test_random_varies() {
        assert_ne!(OobData::random(), OobData::random());
    }
}
