//! Provisioning and launching of the arcbranch executable
//!
//! # Modules
//!
//! - [`github`]: HTTP client, release asset URLs, streaming download
//! - [`install`]: artifact location, extraction, permissions, provisioning
//! - [`exec`]: spawning the cached executable and propagating its exit code
//! - [`info`]: metadata about an installed executable
//!
//! # Install Flow
//!
//! ```text
//! provision()
//!     ↓
//! GET <base>/<owner>/<repo>/releases/download/v<version>/arcbranch_<OS>_<Arch>.<ext>
//!     ↓
//! <install-root>/bin/<os_raw>-<arch_raw>/arcbranch[.exe]
//! ```
//!
//! # Launch Flow
//!
//! ```text
//! launch_installed()
//!     ↓
//! spawn <install-root>/bin/<os_raw>-<arch_raw>/arcbranch[.exe] with inherited stdio
//!     ↓
//! Termination::exit_code()  (127 when the spawn itself fails)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use arcshim_binary::{ProvisionOptions, provision};
//! use arcshim_core::config::{Settings, SettingsOverrides};
//! use arcshim_core::platform::PlatformArch;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::from_env(SettingsOverrides::default())?;
//! let options = ProvisionOptions::from_settings(&settings, PlatformArch::host());
//! let cached = provision(&options)?;
//! println!("{}", cached);
//! # Ok(())
//! # }
//! ```

pub mod exec;
pub mod github;
pub mod info;
pub mod install;

pub use exec::{SPAWN_FAILED_EXIT_CODE, SpawnError, Termination, launch, launch_installed};
pub use info::CachedBinary;
pub use install::{ArtifactLocation, ProvisionError, ProvisionOptions, provision};
