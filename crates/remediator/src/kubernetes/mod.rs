pub mod client;

pub use client::{ClusterControl, KubeCluster};

#[cfg(test)]
pub use client::MockClusterControl;
