//! Concrete resource types managed by the network agent.
//!
//! The `Option` identity attributes start out unset; discovery fills them in
//! before stabilization runs. A resource whose identity attributes are still
//! missing cannot be stabilized and keeps its ephemeral identifier for the
//! pass.

use serde::{Deserialize, Serialize};

use crate::model::impl_resource;
use crate::types::{ResourceId, ResourceKind};

/// Management module owning one switch and one chassis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manager {
    pub id: ResourceId,
    pub parent: Option<ResourceId>,
    pub persistent: bool,
    /// Chassis the manager is located in.
    pub location: Option<ResourceId>,
}

impl Manager {
    pub fn new() -> Self {
        Self {
            id: ResourceId::ephemeral(),
            parent: None,
            persistent: false,
            location: None,
        }
    }
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}

/// Physical enclosure hosting the switch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chassis {
    pub id: ResourceId,
    pub parent: Option<ResourceId>,
    pub persistent: bool,
}

impl Chassis {
    pub fn new(parent: ResourceId) -> Self {
        Self {
            id: ResourceId::ephemeral(),
            parent: Some(parent),
            persistent: false,
        }
    }
}

/// Ethernet switch, the root of the network resource subtree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EthernetSwitch {
    pub id: ResourceId,
    pub parent: Option<ResourceId>,
    pub persistent: bool,
    /// Hardware-reported switch identifier, globally unique.
    pub switch_identifier: Option<String>,
    /// Chassis the switch is mounted in.
    pub chassis: Option<ResourceId>,
}

impl EthernetSwitch {
    pub fn new(parent: ResourceId) -> Self {
        Self {
            id: ResourceId::ephemeral(),
            parent: Some(parent),
            persistent: false,
            switch_identifier: None,
            chassis: None,
        }
    }
}

/// Physical or logical switch port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchPort {
    pub id: ResourceId,
    pub parent: Option<ResourceId>,
    pub persistent: bool,
    /// Hardware port name, unique within the switch.
    pub port_identifier: Option<String>,
}

impl SwitchPort {
    pub fn new(parent: ResourceId) -> Self {
        Self {
            id: ResourceId::ephemeral(),
            parent: Some(parent),
            persistent: false,
            port_identifier: None,
        }
    }
}

/// VLAN configured on a port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortVlan {
    pub id: ResourceId,
    pub parent: Option<ResourceId>,
    pub persistent: bool,
    pub vlan_id: Option<u32>,
    pub tagged: Option<bool>,
}

impl PortVlan {
    pub fn new(parent: ResourceId) -> Self {
        Self {
            id: ResourceId::ephemeral(),
            parent: Some(parent),
            persistent: false,
            vlan_id: None,
            tagged: None,
        }
    }
}

/// Static MAC forwarding entry on a port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticMac {
    pub id: ResourceId,
    pub parent: Option<ResourceId>,
    pub persistent: bool,
    pub address: Option<String>,
    pub vlan_id: Option<u32>,
}

impl StaticMac {
    pub fn new(parent: ResourceId) -> Self {
        Self {
            id: ResourceId::ephemeral(),
            parent: Some(parent),
            persistent: false,
            address: None,
            vlan_id: None,
        }
    }
}

/// Access control list bound to ports through the ACL/port link table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Acl {
    pub id: ResourceId,
    pub parent: Option<ResourceId>,
    pub persistent: bool,
    pub name: Option<String>,
}

impl Acl {
    pub fn new(parent: ResourceId) -> Self {
        Self {
            id: ResourceId::ephemeral(),
            parent: Some(parent),
            persistent: false,
            name: None,
        }
    }
}

/// Single rule within an ACL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AclRule {
    pub id: ResourceId,
    pub parent: Option<ResourceId>,
    pub persistent: bool,
    /// Rule number, unique within the owning ACL.
    pub rule_id: Option<u32>,
    /// Port traffic is forwarded or mirrored to.
    pub forward_mirror_port: Option<ResourceId>,
    /// Ports whose traffic is mirrored by this rule.
    pub mirrored_ports: Vec<ResourceId>,
}

impl AclRule {
    pub fn new(parent: ResourceId) -> Self {
        Self {
            id: ResourceId::ephemeral(),
            parent: Some(parent),
            persistent: false,
            rule_id: None,
            forward_mirror_port: None,
            mirrored_ports: Vec::new(),
        }
    }
}

impl_resource!(Manager, ResourceKind::Manager);
impl_resource!(Chassis, ResourceKind::Chassis);
impl_resource!(EthernetSwitch, ResourceKind::EthernetSwitch);
impl_resource!(SwitchPort, ResourceKind::SwitchPort);
impl_resource!(PortVlan, ResourceKind::PortVlan);
impl_resource!(StaticMac, ResourceKind::StaticMac);
impl_resource!(Acl, ResourceKind::Acl);
impl_resource!(AclRule, ResourceKind::AclRule);
