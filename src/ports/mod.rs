//! Port traits. API boundaries for the hexagon.
//!
//! - Outbound: Called by application into infrastructure (storage, clock)
//!
//! The inbound side is the HTTP adapter, which calls use cases directly.

pub mod outbound;

pub use outbound::{ClockPort, TaskFilter, TaskRepoPort};
