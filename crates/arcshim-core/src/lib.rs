//! Shared building blocks for the arcbranch launcher and installer.
//!
//! - [`platform`]: raw host identifiers to canonical release labels
//! - [`layout`]: cache directory and artifact naming
//! - [`config`]: settings from CLI, environment, arcshim.toml and package.json
//! - [`logging`]: env_logger setup for the binaries

// Core modules
pub mod config;
pub mod error;
pub mod layout;
pub mod logging;
pub mod platform;

// Re-export commonly used types
pub use error::{ArcshimError, Result};
pub use platform::{PlatformArch, resolve};
