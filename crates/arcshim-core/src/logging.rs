//! Logger initialisation shared by the binaries
//!
//! Logs go to stderr. The filter comes from `ARCSHIM_LOG` (env_logger syntax),
//! falling back to the level chosen by the binary.

use crate::config::consts::env;
use env_logger::{Builder, Env};

/// Installs the global logger; call once, at the start of `main`
pub fn init(default_filter: &str) {
    builder(Env::default().filter_or(env::LOG, default_filter)).init();
}

fn builder(env: Env<'_>) -> Builder {
    let mut builder = Builder::from_env(env);
    builder.format_timestamp(None).format_target(false);
    builder
}
