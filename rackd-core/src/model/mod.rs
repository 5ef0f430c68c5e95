//! Resource model for the hardware tree.
//!
//! Every discoverable entity implements [`Resource`]: it carries its current
//! identifier, an optional parent reference and a flag telling whether the
//! identifier is still ephemeral or already persistent. The type-specific
//! identity attributes live on the concrete structs in [`network`].

mod network;

pub use network::{
    Acl, AclRule, Chassis, EthernetSwitch, Manager, PortVlan, StaticMac, SwitchPort,
};

use crate::types::{ResourceId, ResourceKind};

/// Common surface of every entry stored in a resource table.
pub trait Resource: Clone + Send + Sync + 'static {
    const KIND: ResourceKind;

    fn id(&self) -> ResourceId;
    fn set_id(&mut self, id: ResourceId);

    /// Identifier of the owning resource. `None` only for tree roots.
    fn parent_id(&self) -> Option<ResourceId>;
    fn set_parent_id(&mut self, parent: ResourceId);

    /// Whether the identifier has already been made persistent this pass.
    fn is_persistent(&self) -> bool;
    fn mark_persistent(&mut self);
}

macro_rules! impl_resource {
    ($type:ty, $kind:expr) => {
        impl crate::model::Resource for $type {
            const KIND: crate::types::ResourceKind = $kind;

            fn id(&self) -> crate::types::ResourceId {
                self.id
            }

            fn set_id(&mut self, id: crate::types::ResourceId) {
                self.id = id;
            }

            fn parent_id(&self) -> Option<crate::types::ResourceId> {
                self.parent
            }

            fn set_parent_id(&mut self, parent: crate::types::ResourceId) {
                self.parent = Some(parent);
            }

            fn is_persistent(&self) -> bool {
                self.persistent
            }

            fn mark_persistent(&mut self) {
                self.persistent = true;
            }
        }
    };
}

pub(crate) use impl_resource;
