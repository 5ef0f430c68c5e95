//! Resource-tree stabilization.
//!
//! Discovery assigns every resource a random identifier; this module replaces
//! those with deterministic ones derived from a stable seed (parent identity
//! plus immutable hardware attributes), re-keys the tables and repairs every
//! relationship that referenced the old identifiers. Given identical hardware
//! state the result is byte-for-byte identical across restarts.

mod engine;
mod key;
mod relations;
mod rules;

pub use engine::{
    ChildListFn, PersistFn, RelationFixer, SeedFn, SeedOutcome, SetParentFn, TreeStabilizer,
    TypeRule,
};
pub use key::{derive_persistent_id, StabilityKey};

use uuid::Uuid;

use crate::context::NetworkContext;
use crate::error::{RackdError, RackdResult};
use crate::types::{ResourceId, ResourceKind};

/// Tree stabilizer for the network agent.
///
/// Wraps the generic engine with the network rule set and the root traversal
/// order. Per-type entry points allow a single resource added after initial
/// discovery (a new port, a new ACL) to be stabilized without touching the
/// rest of the tree.
pub struct NetworkTreeStabilizer {
    engine: TreeStabilizer<NetworkContext>,
}

impl NetworkTreeStabilizer {
    /// `namespace` is the agent's service UUID; see
    /// [`NetworkContext::service_uuid`].
    pub fn new(namespace: Uuid) -> Self {
        let mut engine = TreeStabilizer::new(namespace);
        for rule in rules::network_rules() {
            engine.register(rule);
        }
        Self { engine }
    }

    /// Stabilize the whole tree under a manager.
    ///
    /// The manager's identity is derived from its child switch, so the walk
    /// is: switch subtree first (ports before ACLs), then the chassis, then
    /// the manager itself, and finally the switch and chassis parent
    /// references are re-pointed at the manager's persistent identifier.
    ///
    /// A module must contain exactly one switch; zero or several is a
    /// topology error surfaced to the caller.
    pub fn stabilize(&self, ctx: &NetworkContext, manager_id: ResourceId) -> RackdResult<ResourceId> {
        let switch_keys = ctx.switches.get_keys_by_parent(manager_id);
        let switch_id = match switch_keys.as_slice() {
            [] => {
                return Err(RackdError::TopologyMissing {
                    kind: ResourceKind::EthernetSwitch,
                    parent: manager_id,
                })
            }
            [key] => *key,
            _ => {
                return Err(RackdError::TopologyAmbiguous {
                    kind: ResourceKind::EthernetSwitch,
                    parent: manager_id,
                })
            }
        };

        let switch_persistent_id = self.stabilize_switch(ctx, switch_id)?;

        let chassis_id = ctx
            .switches
            .get(switch_persistent_id)?
            .chassis
            .ok_or(RackdError::TopologyMissing {
                kind: ResourceKind::Chassis,
                parent: switch_persistent_id,
            })?;
        let chassis_persistent_id = self.stabilize_chassis(ctx, chassis_id)?;

        let manager_persistent_id =
            self.engine
                .stabilize(ctx, ResourceKind::Manager, manager_id)?;

        ctx.switches
            .set_parent(switch_persistent_id, manager_persistent_id)?;
        ctx.chassis
            .set_parent(chassis_persistent_id, manager_persistent_id)?;

        Ok(manager_persistent_id)
    }

    /// Stabilize a switch and its whole subtree (ports, VLANs, static MACs,
    /// ACLs and their rules).
    pub fn stabilize_switch(
        &self,
        ctx: &NetworkContext,
        switch_id: ResourceId,
    ) -> RackdResult<ResourceId> {
        self.engine
            .stabilize(ctx, ResourceKind::EthernetSwitch, switch_id)
    }

    pub fn stabilize_chassis(
        &self,
        ctx: &NetworkContext,
        chassis_id: ResourceId,
    ) -> RackdResult<ResourceId> {
        self.engine.stabilize(ctx, ResourceKind::Chassis, chassis_id)
    }

    /// Stabilize one port and its static MAC / VLAN children.
    pub fn stabilize_port(
        &self,
        ctx: &NetworkContext,
        port_id: ResourceId,
    ) -> RackdResult<ResourceId> {
        self.engine.stabilize(ctx, ResourceKind::SwitchPort, port_id)
    }

    pub fn stabilize_port_vlan(
        &self,
        ctx: &NetworkContext,
        port_vlan_id: ResourceId,
    ) -> RackdResult<ResourceId> {
        self.engine
            .stabilize(ctx, ResourceKind::PortVlan, port_vlan_id)
    }

    pub fn stabilize_static_mac(
        &self,
        ctx: &NetworkContext,
        static_mac_id: ResourceId,
    ) -> RackdResult<ResourceId> {
        self.engine
            .stabilize(ctx, ResourceKind::StaticMac, static_mac_id)
    }

    /// Stabilize one ACL and its rule subtree.
    pub fn stabilize_acl(&self, ctx: &NetworkContext, acl_id: ResourceId) -> RackdResult<ResourceId> {
        self.engine.stabilize(ctx, ResourceKind::Acl, acl_id)
    }

    pub fn stabilize_acl_rule(
        &self,
        ctx: &NetworkContext,
        acl_rule_id: ResourceId,
    ) -> RackdResult<ResourceId> {
        self.engine.stabilize(ctx, ResourceKind::AclRule, acl_rule_id)
    }
}
