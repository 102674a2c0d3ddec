//! Inbound event bus.

pub mod queue;
pub mod types;

pub use queue::EventBus;
pub use types::InboundEvent;
