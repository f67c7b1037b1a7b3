pub mod topology;

pub use topology::{provide_topology_context, use_topology, TopologyContext};
