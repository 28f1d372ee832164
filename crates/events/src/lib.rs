//! `stockdesk-events` — process-wide session signals (mechanics only).
//!
//! The transport layer publishes control signals here; the session owner
//! subscribes. Keeping the channel explicit (instead of a language-level
//! global event target) keeps the dependency direction visible and lets the
//! transport layer be tested by asserting what it published.

pub mod bus;
pub mod in_memory_bus;
pub mod signal;

pub use bus::{SignalBus, Subscription};
pub use in_memory_bus::{InMemoryBusError, InMemorySignalBus};
pub use signal::SessionSignal;
