//! Installation of the arcbranch executable into the per-platform cache

pub mod extract;
pub mod location;
pub mod permissions;
pub mod provision;

pub use extract::{ExtractError, extract_archive, locate_executable};
pub use location::ArtifactLocation;
pub use permissions::{EXECUTABLE_MODE, normalize_permissions};
pub use provision::{ProvisionError, ProvisionOptions, provision};
