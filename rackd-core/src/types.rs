use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a discovered resource.
///
/// Fresh resources carry a random (ephemeral) identifier which is replaced by
/// a deterministic one during stabilization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId(pub Uuid);

impl ResourceId {
    /// Create a new random identifier, valid only for the current process
    /// lifetime.
    pub fn ephemeral() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ResourceId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Tag identifying a concrete resource type in the hardware tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Manager,
    Chassis,
    EthernetSwitch,
    SwitchPort,
    PortVlan,
    StaticMac,
    Acl,
    AclRule,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Manager => "Manager",
            ResourceKind::Chassis => "Chassis",
            ResourceKind::EthernetSwitch => "EthernetSwitch",
            ResourceKind::SwitchPort => "SwitchPort",
            ResourceKind::PortVlan => "PortVlan",
            ResourceKind::StaticMac => "StaticMac",
            ResourceKind::Acl => "Acl",
            ResourceKind::AclRule => "AclRule",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
