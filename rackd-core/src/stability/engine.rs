use std::collections::HashMap;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{RackdError, RackdResult};
use crate::stability::key::{derive_persistent_id, StabilityKey};
use crate::types::{ResourceId, ResourceKind};

/// Result of evaluating a resource's identity rule.
pub enum SeedOutcome {
    /// All identity attributes are discovered; the seed is ready.
    Ready(StabilityKey),
    /// Discovery has not filled in the identity attributes yet. The resource
    /// keeps its ephemeral identifier for this pass.
    Pending,
}

/// Derives the stability key for one resource, or reports why it cannot be
/// derived yet. Must fail with `ParentNotPersistent` when the seed references
/// a parent that has not been stabilized.
pub type SeedFn<C> = fn(&C, ResourceId) -> RackdResult<SeedOutcome>;

/// Re-keys the resource in its table and flags it persistent.
pub type PersistFn<C> = fn(&C, ResourceId, ResourceId) -> RackdResult<()>;

/// Updates the resource's stored parent reference.
pub type SetParentFn<C> = fn(&C, ResourceId, ResourceId) -> RackdResult<()>;

/// Rewrites stale references to the old identifier in other collections.
/// Must only ever touch fields literally equal to the old identifier.
pub type RelationFixer<C> = fn(&C, ResourceId, ResourceId) -> RackdResult<()>;

/// Lists the identifiers of one child collection under the given parent.
pub type ChildListFn<C> = fn(&C, ResourceId) -> Vec<ResourceId>;

/// Everything the stabilizer needs to know about one resource type.
///
/// Child collections are listed in the order they must be descended into;
/// relation fixers of an earlier sibling type may be referenced by a later
/// one, so the order is part of the contract.
pub struct TypeRule<C: 'static> {
    pub kind: ResourceKind,
    pub seed: SeedFn<C>,
    pub persist: PersistFn<C>,
    pub set_parent: SetParentFn<C>,
    pub fixers: &'static [RelationFixer<C>],
    pub children: &'static [(ResourceKind, ChildListFn<C>)],
}

/// Generic, table-driven tree stabilizer.
///
/// An agent registers one [`TypeRule`] per resource type; the engine then
/// walks any subtree top-down, deriving persistent identifiers, re-keying
/// tables, repairing relations and propagating the new identifiers into the
/// children before recursing.
pub struct TreeStabilizer<C: 'static> {
    namespace: Uuid,
    rules: HashMap<ResourceKind, TypeRule<C>>,
}

impl<C: 'static> TreeStabilizer<C> {
    pub fn new(namespace: Uuid) -> Self {
        Self {
            namespace,
            rules: HashMap::new(),
        }
    }

    pub fn register(&mut self, rule: TypeRule<C>) {
        self.rules.insert(rule.kind, rule);
    }

    fn rule(&self, kind: ResourceKind) -> RackdResult<&TypeRule<C>> {
        self.rules.get(&kind).ok_or_else(|| RackdError::Internal {
            message: format!("no stabilization rule registered for {kind}"),
        })
    }

    /// Stabilize one resource and its whole subtree.
    ///
    /// Returns the persistent identifier, or `IdentityPending` when the
    /// resource itself cannot be stabilized this pass. Pending descendants do
    /// not fail the walk; their subtrees are simply left ephemeral and picked
    /// up by a later discovery pass.
    pub fn stabilize(&self, ctx: &C, kind: ResourceKind, id: ResourceId) -> RackdResult<ResourceId> {
        let rule = self.rule(kind)?;

        let key = match (rule.seed)(ctx, id)? {
            SeedOutcome::Ready(key) => key,
            SeedOutcome::Pending => {
                warn!(%kind, %id, "identity attributes not discovered yet, leaving identifier ephemeral");
                return Err(RackdError::IdentityPending { kind, id });
            }
        };

        // Children are keyed under the current identifier; collect them
        // before the rekey invalidates it.
        let child_sets: Vec<(ResourceKind, Vec<ResourceId>)> = rule
            .children
            .iter()
            .map(|(child_kind, list)| (*child_kind, list(ctx, id)))
            .collect();

        let new_id = derive_persistent_id(self.namespace, &key);
        debug!(%kind, old = %id, new = %new_id, "stabilizing resource");
        (rule.persist)(ctx, id, new_id)?;

        // Relation fixup runs before descending: child identity rules may
        // read relationship state that still names the old identifier.
        for fixer in rule.fixers {
            fixer(ctx, id, new_id)?;
        }

        for (child_kind, child_ids) in child_sets {
            let child_rule = self.rule(child_kind)?;
            for child_id in child_ids {
                (child_rule.set_parent)(ctx, child_id, new_id)?;
                match self.stabilize(ctx, child_kind, child_id) {
                    Ok(_) => {}
                    // Already logged at the point of detection; the subtree
                    // stays ephemeral until the next pass.
                    Err(RackdError::IdentityPending { .. }) => {}
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(new_id)
    }
}
