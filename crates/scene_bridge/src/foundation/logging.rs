//! Logging utilities
//!
//! The bridge reports every diagnostic through the `log` facade; binaries pick
//! the sink. These helpers install `env_logger` for the common case.

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system with an explicit filter such as
/// `"scene_bridge=debug"`, falling back to `RUST_LOG` when `None`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_with_filter(filter: Option<&str>) {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(filter) = filter {
        builder.parse_filters(filter);
    }
    let _ = builder.try_init();
}
