//! Explicit dependency container for the network agent's shared state.
//!
//! Replaces singleton component registries: discovery, stabilization and the
//! command layer all receive a reference to the same [`NetworkContext`], so
//! tests can run against an isolated in-memory fixture.

use uuid::Uuid;

use crate::model::{Acl, AclRule, Chassis, EthernetSwitch, Manager, PortVlan, StaticMac, SwitchPort};
use crate::registry::{LinkTable, ResourceTable};

/// All resource and link tables of one network agent instance, plus the
/// service UUID used as the namespace for persistent identifier derivation.
pub struct NetworkContext {
    service_uuid: Uuid,
    pub managers: ResourceTable<Manager>,
    pub chassis: ResourceTable<Chassis>,
    pub switches: ResourceTable<EthernetSwitch>,
    pub ports: ResourceTable<SwitchPort>,
    pub port_vlans: ResourceTable<PortVlan>,
    pub static_macs: ResourceTable<StaticMac>,
    pub acls: ResourceTable<Acl>,
    pub acl_rules: ResourceTable<AclRule>,
    /// ACL to port bindings (many-to-many).
    pub acl_ports: LinkTable,
}

impl NetworkContext {
    pub fn new(service_uuid: Uuid) -> Self {
        Self {
            service_uuid,
            managers: ResourceTable::new(),
            chassis: ResourceTable::new(),
            switches: ResourceTable::new(),
            ports: ResourceTable::new(),
            port_vlans: ResourceTable::new(),
            static_macs: ResourceTable::new(),
            acls: ResourceTable::new(),
            acl_rules: ResourceTable::new(),
            acl_ports: LinkTable::new(),
        }
    }

    /// Namespace for name-based persistent identifiers. Stable per installed
    /// service, so identifiers are reproducible across process restarts.
    pub fn service_uuid(&self) -> Uuid {
        self.service_uuid
    }
}
