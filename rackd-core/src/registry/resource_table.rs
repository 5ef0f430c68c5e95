use parking_lot::RwLock;

use crate::error::{RackdError, RackdResult};
use crate::model::Resource;
use crate::types::ResourceId;

/// Keyed in-memory store for resources of a single type.
///
/// Entries are kept in insertion order so that key listings are stable across
/// otherwise identical runs. Lookups are linear scans, which is acceptable at
/// the expected scale (tens to low hundreds of entries per agent). All
/// operations take `&self`; the table carries its own lock.
pub struct ResourceTable<R: Resource> {
    entries: RwLock<Vec<R>>,
}

impl<R: Resource> ResourceTable<R> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Insert a resource under its current identifier.
    ///
    /// Identifiers are freshly generated on construction, so uniqueness is the
    /// caller's responsibility; inserting a duplicate id is a discovery bug.
    pub fn add(&self, resource: R) {
        self.entries.write().push(resource);
    }

    pub fn get(&self, id: ResourceId) -> RackdResult<R> {
        self.entries
            .read()
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or(RackdError::NotFound { kind: R::KIND, id })
    }

    pub fn entry_exists(&self, id: ResourceId) -> bool {
        self.entries.read().iter().any(|r| r.id() == id)
    }

    /// All keys, in insertion order.
    pub fn get_keys(&self) -> Vec<ResourceId> {
        self.entries.read().iter().map(|r| r.id()).collect()
    }

    /// Keys of all direct children of `parent`, in insertion order.
    pub fn get_keys_by_parent(&self, parent: ResourceId) -> Vec<ResourceId> {
        self.entries
            .read()
            .iter()
            .filter(|r| r.parent_id() == Some(parent))
            .map(|r| r.id())
            .collect()
    }

    /// Keys of all entries matching `predicate`, in insertion order.
    pub fn get_keys_filtered(&self, predicate: impl Fn(&R) -> bool) -> Vec<ResourceId> {
        self.entries
            .read()
            .iter()
            .filter(|r| predicate(r))
            .map(|r| r.id())
            .collect()
    }

    /// Replace `old` with `new` as the entry's primary key.
    ///
    /// A no-op when the identifiers are equal (re-stabilization). Fails when
    /// `old` is absent, or when `new` already keys a different entry. The
    /// latter means two distinct resources derived the same identity, which
    /// must surface instead of silently merging them.
    pub fn rekey(&self, old: ResourceId, new: ResourceId) -> RackdResult<()> {
        if old == new {
            return Ok(());
        }
        let mut entries = self.entries.write();
        if entries.iter().any(|r| r.id() == new) {
            return Err(RackdError::IdentifierCollision {
                kind: R::KIND,
                old,
                new,
            });
        }
        let entry = entries
            .iter_mut()
            .find(|r| r.id() == old)
            .ok_or(RackdError::NotFound { kind: R::KIND, id: old })?;
        entry.set_id(new);
        Ok(())
    }

    /// Rekey `old` to `new` and flag the entry as persistent.
    pub fn persist(&self, old: ResourceId, new: ResourceId) -> RackdResult<()> {
        self.rekey(old, new)?;
        self.update(new, |r| r.mark_persistent())
    }

    /// Update the stored parent reference without touching the entry's key.
    pub fn set_parent(&self, id: ResourceId, parent: ResourceId) -> RackdResult<()> {
        self.update(id, |r| r.set_parent_id(parent))
    }

    /// Apply `apply` to the entry keyed by `id`.
    pub fn update(&self, id: ResourceId, apply: impl FnOnce(&mut R)) -> RackdResult<()> {
        let mut entries = self.entries.write();
        let entry = entries
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(RackdError::NotFound { kind: R::KIND, id })?;
        apply(entry);
        Ok(())
    }

    /// Apply `apply` to every entry matching `predicate`.
    pub fn update_where(&self, predicate: impl Fn(&R) -> bool, apply: impl Fn(&mut R)) {
        let mut entries = self.entries.write();
        for entry in entries.iter_mut() {
            if predicate(entry) {
                apply(entry);
            }
        }
    }

    /// Remove and return the entry keyed by `id`.
    pub fn remove(&self, id: ResourceId) -> RackdResult<R> {
        let mut entries = self.entries.write();
        let position = entries
            .iter()
            .position(|r| r.id() == id)
            .ok_or(RackdError::NotFound { kind: R::KIND, id })?;
        Ok(entries.remove(position))
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

impl<R: Resource> Default for ResourceTable<R> {
    fn default() -> Self {
        Self::new()
    }
}
