//! Logging utilities and structured logging support
//!
//! The library only emits records through the `log` facade. Binaries pick the
//! backend; [`init_with_level`] wires up `env_logger`.

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system, falling back to `default_level` when
/// `RUST_LOG` is unset.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_with_level(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized; keeping existing configuration");
    }
}
