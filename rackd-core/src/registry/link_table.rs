use parking_lot::RwLock;

use crate::types::ResourceId;

/// A single many-to-many association.
///
/// "Parent" and "child" follow the owning side of the relation (e.g. the ACL
/// owns its port bindings); the storage itself is symmetric. The optional
/// agent id records which agent created the pair.
#[derive(Debug, Clone)]
struct LinkEntry {
    parent: ResourceId,
    child: ResourceId,
    agent_id: Option<String>,
}

/// Unordered collection of (parent, child) pairs with both sides
/// independently re-keyable.
///
/// Backed by a flat list scanned linearly, which is fine at the expected
/// scale of the relations stored here.
pub struct LinkTable {
    entries: RwLock<Vec<LinkEntry>>,
}

impl LinkTable {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    pub fn add(&self, parent: ResourceId, child: ResourceId) {
        self.entries.write().push(LinkEntry {
            parent,
            child,
            agent_id: None,
        });
    }

    pub fn add_for_agent(&self, parent: ResourceId, child: ResourceId, agent_id: &str) {
        self.entries.write().push(LinkEntry {
            parent,
            child,
            agent_id: Some(agent_id.to_string()),
        });
    }

    pub fn entry_exists(&self, parent: ResourceId, child: ResourceId) -> bool {
        self.entries
            .read()
            .iter()
            .any(|e| e.parent == parent && e.child == child)
    }

    pub fn get_children(&self, parent: ResourceId) -> Vec<ResourceId> {
        self.entries
            .read()
            .iter()
            .filter(|e| e.parent == parent)
            .map(|e| e.child)
            .collect()
    }

    pub fn get_parents(&self, child: ResourceId) -> Vec<ResourceId> {
        self.entries
            .read()
            .iter()
            .filter(|e| e.child == child)
            .map(|e| e.parent)
            .collect()
    }

    /// Rewrite the parent side of every pair matching `old`.
    pub fn update_parent(&self, old: ResourceId, new: ResourceId) {
        for entry in self.entries.write().iter_mut() {
            if entry.parent == old {
                entry.parent = new;
            }
        }
    }

    /// Rewrite the child side of every pair matching `old`.
    pub fn update_child(&self, old: ResourceId, new: ResourceId) {
        for entry in self.entries.write().iter_mut() {
            if entry.child == old {
                entry.child = new;
            }
        }
    }

    pub fn remove_entry(&self, parent: ResourceId, child: ResourceId) {
        self.entries
            .write()
            .retain(|e| !(e.parent == parent && e.child == child));
    }

    /// Drop every pair owned by `parent`; used when the owning resource is
    /// deleted.
    pub fn remove_parent(&self, parent: ResourceId) {
        self.entries.write().retain(|e| e.parent != parent);
    }

    pub fn remove_child(&self, child: ResourceId) {
        self.entries.write().retain(|e| e.child != child);
    }

    /// Drop every pair recorded by `agent_id`.
    pub fn remove_for_agent(&self, agent_id: &str) {
        self.entries
            .write()
            .retain(|e| e.agent_id.as_deref() != Some(agent_id));
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for LinkTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_lookup() {
        let table = LinkTable::new();
        let acl = ResourceId::ephemeral();
        let port_1 = ResourceId::ephemeral();
        let port_2 = ResourceId::ephemeral();

        table.add(acl, port_1);
        table.add(acl, port_2);

        assert_eq!(table.get_children(acl), vec![port_1, port_2]);
        assert_eq!(table.get_parents(port_1), vec![acl]);
        assert!(table.entry_exists(acl, port_2));
    }

    #[test]
    fn test_update_parent_rewrites_all_pairs() {
        let table = LinkTable::new();
        let old_acl = ResourceId::ephemeral();
        let other_acl = ResourceId::ephemeral();
        let new_acl = ResourceId::ephemeral();
        let port = ResourceId::ephemeral();

        table.add(old_acl, port);
        table.add(other_acl, port);

        table.update_parent(old_acl, new_acl);

        assert_eq!(table.get_parents(port), vec![new_acl, other_acl]);
        assert!(table.get_children(old_acl).is_empty());
    }

    #[test]
    fn test_update_child_leaves_unrelated_pairs_alone() {
        let table = LinkTable::new();
        let acl = ResourceId::ephemeral();
        let old_port = ResourceId::ephemeral();
        let other_port = ResourceId::ephemeral();
        let new_port = ResourceId::ephemeral();

        table.add(acl, old_port);
        table.add(acl, other_port);

        table.update_child(old_port, new_port);

        assert_eq!(table.get_children(acl), vec![new_port, other_port]);
    }

    #[test]
    fn test_remove_parent_drops_all_pairs() {
        let table = LinkTable::new();
        let acl = ResourceId::ephemeral();
        let other_acl = ResourceId::ephemeral();
        let port = ResourceId::ephemeral();

        table.add(acl, port);
        table.add(other_acl, port);

        table.remove_parent(acl);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get_parents(port), vec![other_acl]);
    }

    #[test]
    fn test_remove_for_agent() {
        let table = LinkTable::new();
        let acl = ResourceId::ephemeral();
        let port = ResourceId::ephemeral();

        table.add_for_agent(acl, port, "agent-1");
        table.add(acl, port);

        table.remove_for_agent("agent-1");

        assert_eq!(table.len(), 1);
    }
}
