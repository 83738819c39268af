//! Application side of the pairing coordinator
//!
//! Stack and board callbacks feed an [`EventQueue`]; the [`Dispatcher`]
//! drains it on one thread and hands each event to the handlers sharing a
//! [`PairingContext`].

pub mod callbacks;
pub mod context;
pub mod decision;
pub mod dispatcher;
pub mod display;
pub mod event;
pub mod pairing;
pub mod queue;
pub mod stack;


pub use callbacks::StackCallbacks;
pub use context::PairingContext;
pub use decision::{ConfirmationRequest, KeyAction, UserDecisionGate};
pub use dispatcher::Dispatcher;
pub use display::{DisplayLine, MemoryDisplay, StatusDisplay};
pub use event::{AppEvent, Keys, PasscodeRequest, UiOutputs};
pub use pairing::{Connection, PairingOutcome, PairingPhase, PairingStateMachine};
pub use queue::{EventQueue, EventSender, InternalEvents, WakeSignal};
pub use stack::{BondManagerParams, PeripheralStack};
