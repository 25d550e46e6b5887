pub mod consts;
pub mod model;
pub mod settings;

pub use model::{Config, NetworkPolicy, PackageManifest};
pub use settings::{ReleaseSource, Settings, SettingsOverrides, normalize_version, resolve_install_root};
