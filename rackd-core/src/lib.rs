//! Core resource model and tree stabilization for the rackd hardware agent.
//!
//! Discovery populates the resource tables with ephemeral, process-local
//! identifiers. The stabilization layer in [`stability`] replaces those with
//! deterministic identifiers that survive restarts and re-discovery, and
//! repairs every relationship that referenced the old values.

pub mod context;
pub mod error;
pub mod model;
pub mod registry;
pub mod stability;
pub mod types;

pub use context::NetworkContext;
pub use error::{RackdError, RackdResult};
pub use stability::NetworkTreeStabilizer;
pub use types::{ResourceId, ResourceKind};
