//! In-memory collections shared by discovery, stabilization and the command
//! layer: one [`ResourceTable`] per resource type, plus [`LinkTable`] for
//! non-hierarchical many-to-many relations.

mod link_table;
mod resource_table;

pub use link_table::LinkTable;
pub use resource_table::ResourceTable;
