//! Relation fixers: repair references to a re-keyed resource in collections
//! other than its own table.
//!
//! A fixer only ever rewrites fields literally equal to the old identifier,
//! so running one is idempotent and cannot disturb unrelated resources.

use crate::context::NetworkContext;
use crate::error::RackdResult;
use crate::types::ResourceId;

/// A port is the child side of the ACL/port binding, and ACL rules embed
/// forward/mirror references to it.
pub(super) fn update_port_in_relations(
    ctx: &NetworkContext,
    old: ResourceId,
    new: ResourceId,
) -> RackdResult<()> {
    ctx.acl_ports.update_child(old, new);

    ctx.acl_rules.update_where(
        |rule| {
            rule.forward_mirror_port == Some(old) || rule.mirrored_ports.contains(&old)
        },
        |rule| {
            if rule.forward_mirror_port == Some(old) {
                rule.forward_mirror_port = Some(new);
            }
            for port in rule.mirrored_ports.iter_mut() {
                if *port == old {
                    *port = new;
                }
            }
        },
    );
    Ok(())
}

/// An ACL is the parent side of the ACL/port binding.
pub(super) fn update_acl_in_relations(
    ctx: &NetworkContext,
    old: ResourceId,
    new: ResourceId,
) -> RackdResult<()> {
    ctx.acl_ports.update_parent(old, new);
    Ok(())
}

/// The chassis identifier is embedded in the switch mounted in it and in the
/// owning manager's location field.
pub(super) fn update_chassis_in_relations(
    ctx: &NetworkContext,
    old: ResourceId,
    new: ResourceId,
) -> RackdResult<()> {
    ctx.switches
        .update_where(|s| s.chassis == Some(old), |s| s.chassis = Some(new));
    ctx.managers
        .update_where(|m| m.location == Some(old), |m| m.location = Some(new));
    Ok(())
}
