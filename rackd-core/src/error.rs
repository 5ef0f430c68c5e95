use crate::types::{ResourceId, ResourceKind};
use thiserror::Error;

/// Errors produced by the resource registries and the tree stabilizer.
///
/// The variants map onto the failure taxonomy of stabilization:
/// `IdentityPending` is recoverable (retry on the next discovery pass),
/// `ParentNotPersistent` indicates a caller walked the tree in the wrong
/// order, and `IdentifierCollision` is a data-integrity failure that must
/// never be papered over.
#[derive(Error, Debug)]
pub enum RackdError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: ResourceKind, id: ResourceId },

    #[error("identity attributes of {kind} {id} are not discovered yet")]
    IdentityPending { kind: ResourceKind, id: ResourceId },

    #[error("cannot stabilize {kind} {id}: parent {parent} has no persistent identifier")]
    ParentNotPersistent {
        kind: ResourceKind,
        id: ResourceId,
        parent: ResourceId,
    },

    #[error("rekey of {kind} {old} collides with existing entry {new}")]
    IdentifierCollision {
        kind: ResourceKind,
        old: ResourceId,
        new: ResourceId,
    },

    #[error("no {kind} found under {parent}")]
    TopologyMissing {
        kind: ResourceKind,
        parent: ResourceId,
    },

    #[error("multiple {kind} entries found under {parent}, expected exactly one")]
    TopologyAmbiguous {
        kind: ResourceKind,
        parent: ResourceId,
    },

    #[error("internal error: {message}")]
    Internal { message: String },
}

pub type RackdResult<T> = Result<T, RackdError>;
