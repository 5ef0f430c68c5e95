//! Identity rules and traversal layout for the network agent's resource tree.
//!
//! One [`TypeRule`] per resource type: how the stability key is derived, how
//! the entry is re-keyed in its table, which relation fixers run afterwards
//! and which child collections are descended into, in which order.
//!
//! Ports are stabilized before ACLs under a switch: the port fixers rewrite
//! the port references embedded in ACL rules and in the ACL/port link table,
//! and those must be consistent before the ACL subtree is walked.

use crate::context::NetworkContext;
use crate::error::{RackdError, RackdResult};
use crate::stability::engine::{SeedOutcome, TypeRule};
use crate::stability::key::StabilityKey;
use crate::stability::relations;
use crate::types::{ResourceId, ResourceKind};

/// Per-type key prefixes; part of every derived identifier, so changing one
/// re-identifies every resource of that type.
const MANAGER_KEY_BASE: &str = "NetworkModule";
const CHASSIS_KEY_BASE: &str = "NetworkChassis";
const SWITCH_KEY_BASE: &str = "EthernetSwitch";
const PORT_KEY_BASE: &str = "Port";
const PORT_VLAN_KEY_BASE: &str = "PortVLAN";
const STATIC_MAC_KEY_BASE: &str = "StaticMac";
const ACL_KEY_BASE: &str = "ACL";
const ACL_RULE_KEY_BASE: &str = "ACLRule";

/// The complete rule set registered into the generic engine.
pub(super) fn network_rules() -> Vec<TypeRule<NetworkContext>> {
    vec![
        TypeRule {
            kind: ResourceKind::Manager,
            seed: manager_seed,
            persist: persist_manager,
            set_parent: set_manager_parent,
            fixers: &[],
            // The switch and chassis are stabilized before the manager (see
            // the root walk); the engine's generic recursion is not used here.
            children: &[],
        },
        TypeRule {
            kind: ResourceKind::Chassis,
            seed: chassis_seed,
            persist: persist_chassis,
            set_parent: set_chassis_parent,
            fixers: &[relations::update_chassis_in_relations],
            children: &[],
        },
        TypeRule {
            kind: ResourceKind::EthernetSwitch,
            seed: switch_seed,
            persist: persist_switch,
            set_parent: set_switch_parent,
            fixers: &[],
            children: &[
                (ResourceKind::SwitchPort, list_switch_ports),
                (ResourceKind::Acl, list_switch_acls),
            ],
        },
        TypeRule {
            kind: ResourceKind::SwitchPort,
            seed: port_seed,
            persist: persist_port,
            set_parent: set_port_parent,
            fixers: &[relations::update_port_in_relations],
            children: &[
                (ResourceKind::StaticMac, list_port_static_macs),
                (ResourceKind::PortVlan, list_port_vlans),
            ],
        },
        TypeRule {
            kind: ResourceKind::StaticMac,
            seed: static_mac_seed,
            persist: persist_static_mac,
            set_parent: set_static_mac_parent,
            fixers: &[],
            children: &[],
        },
        TypeRule {
            kind: ResourceKind::PortVlan,
            seed: port_vlan_seed,
            persist: persist_port_vlan,
            set_parent: set_port_vlan_parent,
            fixers: &[],
            children: &[],
        },
        TypeRule {
            kind: ResourceKind::Acl,
            seed: acl_seed,
            persist: persist_acl,
            set_parent: set_acl_parent,
            fixers: &[relations::update_acl_in_relations],
            children: &[(ResourceKind::AclRule, list_acl_rules)],
        },
        TypeRule {
            kind: ResourceKind::AclRule,
            seed: acl_rule_seed,
            persist: persist_acl_rule,
            set_parent: set_acl_rule_parent,
            fixers: &[],
            children: &[],
        },
    ]
}

fn require_parent(
    kind: ResourceKind,
    id: ResourceId,
    parent: Option<ResourceId>,
) -> RackdResult<ResourceId> {
    parent.ok_or_else(|| RackdError::Internal {
        message: format!("{kind} {id} has no parent reference"),
    })
}

/// The manager borrows its identity from its child switch: the seed uses the
/// switch's persistent identifier, so the switch subtree must be stabilized
/// first. This is the one place where the tree is not walked parent-first.
fn manager_seed(ctx: &NetworkContext, id: ResourceId) -> RackdResult<SeedOutcome> {
    let switch_keys = ctx.switches.get_keys_by_parent(id);
    let switch_key = match switch_keys.as_slice() {
        [] => {
            return Err(RackdError::TopologyMissing {
                kind: ResourceKind::EthernetSwitch,
                parent: id,
            })
        }
        [key] => *key,
        _ => {
            return Err(RackdError::TopologyAmbiguous {
                kind: ResourceKind::EthernetSwitch,
                parent: id,
            })
        }
    };
    let eth_switch = ctx.switches.get(switch_key)?;
    if !eth_switch.persistent {
        return Err(RackdError::ParentNotPersistent {
            kind: ResourceKind::Manager,
            id,
            parent: eth_switch.id,
        });
    }
    Ok(SeedOutcome::Ready(
        StabilityKey::new(MANAGER_KEY_BASE).id_field(eth_switch.id),
    ))
}

/// The chassis has no hardware identity of its own; it is identified by the
/// switch mounted in it.
fn chassis_seed(ctx: &NetworkContext, id: ResourceId) -> RackdResult<SeedOutcome> {
    let switch_keys = ctx.switches.get_keys_filtered(|s| s.chassis == Some(id));
    let switch_key = *switch_keys
        .first()
        .ok_or(RackdError::TopologyMissing {
            kind: ResourceKind::EthernetSwitch,
            parent: id,
        })?;
    let eth_switch = ctx.switches.get(switch_key)?;
    if !eth_switch.persistent {
        return Err(RackdError::ParentNotPersistent {
            kind: ResourceKind::Chassis,
            id,
            parent: eth_switch.id,
        });
    }
    Ok(SeedOutcome::Ready(
        StabilityKey::new(CHASSIS_KEY_BASE).id_field(eth_switch.id),
    ))
}

/// The switch identifier is hardware-reported and globally unique, so the
/// seed needs no parent term. This is what allows the switch to stabilize
/// before its (not yet persistent) manager.
fn switch_seed(ctx: &NetworkContext, id: ResourceId) -> RackdResult<SeedOutcome> {
    let eth_switch = ctx.switches.get(id)?;
    let Some(identifier) = eth_switch.switch_identifier else {
        return Ok(SeedOutcome::Pending);
    };
    Ok(SeedOutcome::Ready(
        StabilityKey::new(SWITCH_KEY_BASE).field(identifier),
    ))
}

fn port_seed(ctx: &NetworkContext, id: ResourceId) -> RackdResult<SeedOutcome> {
    let port = ctx.ports.get(id)?;
    let parent = require_parent(ResourceKind::SwitchPort, id, port.parent)?;
    let eth_switch = ctx.switches.get(parent)?;
    if !eth_switch.persistent {
        return Err(RackdError::ParentNotPersistent {
            kind: ResourceKind::SwitchPort,
            id,
            parent,
        });
    }
    let Some(identifier) = port.port_identifier else {
        return Ok(SeedOutcome::Pending);
    };
    Ok(SeedOutcome::Ready(
        StabilityKey::new(PORT_KEY_BASE)
            .id_field(eth_switch.id)
            .field(identifier),
    ))
}

fn port_vlan_seed(ctx: &NetworkContext, id: ResourceId) -> RackdResult<SeedOutcome> {
    let port_vlan = ctx.port_vlans.get(id)?;
    let parent = require_parent(ResourceKind::PortVlan, id, port_vlan.parent)?;
    let port = ctx.ports.get(parent)?;
    if !port.persistent {
        return Err(RackdError::ParentNotPersistent {
            kind: ResourceKind::PortVlan,
            id,
            parent,
        });
    }
    let (Some(vlan_id), Some(tagged)) = (port_vlan.vlan_id, port_vlan.tagged) else {
        return Ok(SeedOutcome::Pending);
    };
    Ok(SeedOutcome::Ready(
        StabilityKey::new(PORT_VLAN_KEY_BASE)
            .id_field(port.id)
            .field(vlan_id.to_string())
            .field(tagged.to_string()),
    ))
}

fn static_mac_seed(ctx: &NetworkContext, id: ResourceId) -> RackdResult<SeedOutcome> {
    let static_mac = ctx.static_macs.get(id)?;
    let parent = require_parent(ResourceKind::StaticMac, id, static_mac.parent)?;
    let port = ctx.ports.get(parent)?;
    if !port.persistent {
        return Err(RackdError::ParentNotPersistent {
            kind: ResourceKind::StaticMac,
            id,
            parent,
        });
    }
    let (Some(address), Some(vlan_id)) = (static_mac.address, static_mac.vlan_id) else {
        return Ok(SeedOutcome::Pending);
    };
    Ok(SeedOutcome::Ready(
        StabilityKey::new(STATIC_MAC_KEY_BASE)
            .id_field(port.id)
            .field(address)
            .field(vlan_id.to_string()),
    ))
}

fn acl_seed(ctx: &NetworkContext, id: ResourceId) -> RackdResult<SeedOutcome> {
    let acl = ctx.acls.get(id)?;
    let parent = require_parent(ResourceKind::Acl, id, acl.parent)?;
    let eth_switch = ctx.switches.get(parent)?;
    if !eth_switch.persistent {
        return Err(RackdError::ParentNotPersistent {
            kind: ResourceKind::Acl,
            id,
            parent,
        });
    }
    let Some(name) = acl.name else {
        return Ok(SeedOutcome::Pending);
    };
    Ok(SeedOutcome::Ready(
        StabilityKey::new(ACL_KEY_BASE)
            .id_field(eth_switch.id)
            .field(name),
    ))
}

fn acl_rule_seed(ctx: &NetworkContext, id: ResourceId) -> RackdResult<SeedOutcome> {
    let rule = ctx.acl_rules.get(id)?;
    let parent = require_parent(ResourceKind::AclRule, id, rule.parent)?;
    let acl = ctx.acls.get(parent)?;
    if !acl.persistent {
        return Err(RackdError::ParentNotPersistent {
            kind: ResourceKind::AclRule,
            id,
            parent,
        });
    }
    let Some(rule_id) = rule.rule_id else {
        return Ok(SeedOutcome::Pending);
    };
    Ok(SeedOutcome::Ready(
        StabilityKey::new(ACL_RULE_KEY_BASE)
            .id_field(acl.id)
            .field(rule_id.to_string()),
    ))
}

fn persist_manager(ctx: &NetworkContext, old: ResourceId, new: ResourceId) -> RackdResult<()> {
    ctx.managers.persist(old, new)
}

fn persist_chassis(ctx: &NetworkContext, old: ResourceId, new: ResourceId) -> RackdResult<()> {
    ctx.chassis.persist(old, new)
}

fn persist_switch(ctx: &NetworkContext, old: ResourceId, new: ResourceId) -> RackdResult<()> {
    ctx.switches.persist(old, new)
}

fn persist_port(ctx: &NetworkContext, old: ResourceId, new: ResourceId) -> RackdResult<()> {
    ctx.ports.persist(old, new)
}

fn persist_port_vlan(ctx: &NetworkContext, old: ResourceId, new: ResourceId) -> RackdResult<()> {
    ctx.port_vlans.persist(old, new)
}

fn persist_static_mac(ctx: &NetworkContext, old: ResourceId, new: ResourceId) -> RackdResult<()> {
    ctx.static_macs.persist(old, new)
}

fn persist_acl(ctx: &NetworkContext, old: ResourceId, new: ResourceId) -> RackdResult<()> {
    ctx.acls.persist(old, new)
}

fn persist_acl_rule(ctx: &NetworkContext, old: ResourceId, new: ResourceId) -> RackdResult<()> {
    ctx.acl_rules.persist(old, new)
}

fn set_manager_parent(ctx: &NetworkContext, id: ResourceId, parent: ResourceId) -> RackdResult<()> {
    ctx.managers.set_parent(id, parent)
}

fn set_chassis_parent(ctx: &NetworkContext, id: ResourceId, parent: ResourceId) -> RackdResult<()> {
    ctx.chassis.set_parent(id, parent)
}

fn set_switch_parent(ctx: &NetworkContext, id: ResourceId, parent: ResourceId) -> RackdResult<()> {
    ctx.switches.set_parent(id, parent)
}

fn set_port_parent(ctx: &NetworkContext, id: ResourceId, parent: ResourceId) -> RackdResult<()> {
    ctx.ports.set_parent(id, parent)
}

fn set_port_vlan_parent(ctx: &NetworkContext, id: ResourceId, parent: ResourceId) -> RackdResult<()> {
    ctx.port_vlans.set_parent(id, parent)
}

fn set_static_mac_parent(
    ctx: &NetworkContext,
    id: ResourceId,
    parent: ResourceId,
) -> RackdResult<()> {
    ctx.static_macs.set_parent(id, parent)
}

fn set_acl_parent(ctx: &NetworkContext, id: ResourceId, parent: ResourceId) -> RackdResult<()> {
    ctx.acls.set_parent(id, parent)
}

fn set_acl_rule_parent(ctx: &NetworkContext, id: ResourceId, parent: ResourceId) -> RackdResult<()> {
    ctx.acl_rules.set_parent(id, parent)
}

fn list_switch_ports(ctx: &NetworkContext, parent: ResourceId) -> Vec<ResourceId> {
    ctx.ports.get_keys_by_parent(parent)
}

fn list_switch_acls(ctx: &NetworkContext, parent: ResourceId) -> Vec<ResourceId> {
    ctx.acls.get_keys_by_parent(parent)
}

fn list_port_static_macs(ctx: &NetworkContext, parent: ResourceId) -> Vec<ResourceId> {
    ctx.static_macs.get_keys_by_parent(parent)
}

fn list_port_vlans(ctx: &NetworkContext, parent: ResourceId) -> Vec<ResourceId> {
    ctx.port_vlans.get_keys_by_parent(parent)
}

fn list_acl_rules(ctx: &NetworkContext, parent: ResourceId) -> Vec<ResourceId> {
    ctx.acl_rules.get_keys_by_parent(parent)
}
