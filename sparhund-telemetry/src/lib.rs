//! # Sparhund Telemetry
//!
//! Crate for the structured event model: record construction, the
//! per-run event store, and logging initialization.

pub mod events;
pub mod logging;
pub mod store;

pub use events::{
    EventCategory, EventPayload, EventRecord, ExecutablePayload, FileActivityKind, FilePayload,
    Identity, IdentityError, NetworkPayload,
};
pub use logging::EventLogger;
pub use store::EventStore;
