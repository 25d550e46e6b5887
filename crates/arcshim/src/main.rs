//! `arcbranch`: runs the cached arcbranch executable for this host
//!
//! Every argument is forwarded untouched, so this binary has no flags of its
//! own. The exit code is the child's, or 127 when it could not be started.

use arcshim_binary::{SPAWN_FAILED_EXIT_CODE, launch_installed};
use arcshim_core::config::resolve_install_root;
use arcshim_core::platform::PlatformArch;
use std::process;

fn main() {
    arcshim_core::logging::init("warn");

    let install_root = match resolve_install_root(None, |key| std::env::var(key).ok()) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(SPAWN_FAILED_EXIT_CODE);
        }
    };

    let platform = PlatformArch::host();
    log::debug!(
        "Install root {}, platform {}",
        install_root.display(),
        platform
    );

    match launch_installed(&install_root, &platform, std::env::args_os().skip(1)) {
        Ok(termination) => process::exit(termination.exit_code()),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(SPAWN_FAILED_EXIT_CODE);
        }
    }
}
