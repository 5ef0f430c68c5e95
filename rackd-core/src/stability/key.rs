use uuid::Uuid;

use crate::types::ResourceId;

/// Builder for the seed string a persistent identifier is derived from.
///
/// The seed starts with a per-type prefix (so two types can never collide
/// even with identical attributes) followed by the identity fields in a fixed
/// order. Every field is length-prefixed, which keeps the encoding injective
/// for arbitrary field contents; plain concatenation would let e.g.
/// (vlan "1", tag "1true") and (vlan "11", tag "true") produce the same seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StabilityKey {
    seed: String,
}

impl StabilityKey {
    pub fn new(type_prefix: &str) -> Self {
        Self {
            seed: type_prefix.to_string(),
        }
    }

    /// Append an identity field.
    pub fn field(mut self, value: impl AsRef<str>) -> Self {
        let value = value.as_ref();
        self.seed.push('|');
        self.seed.push_str(&value.len().to_string());
        self.seed.push(':');
        self.seed.push_str(value);
        self
    }

    /// Append another resource's (persistent) identifier as a field.
    pub fn id_field(self, id: ResourceId) -> Self {
        self.field(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.seed
    }
}

/// Derive a persistent identifier from a namespace and a stability key.
///
/// Pure and total: the same (namespace, key) pair always yields the same
/// UUID (name-based, version 5). This is the single source of truth for
/// "is this the same resource as last run".
pub fn derive_persistent_id(namespace: Uuid, key: &StabilityKey) -> ResourceId {
    ResourceId(Uuid::new_v5(&namespace, key.as_str().as_bytes()))
}
