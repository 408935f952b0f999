//! Static alert-to-remediation mapping.

pub mod registry;
pub mod spec;

pub use registry::RemediationRegistry;
pub use spec::{Action, ActionKind, RemediationSpec, AUTO_DETECT_NODE};
