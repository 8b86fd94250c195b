#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
//! Configuration for the Tidings demo and its logging.
//!
//! # Usage
//!
//! ```rust,no_run
//! use tidings_config::Config;
//!
//! // Defaults → ~/.tidings/config.toml → explicit file → TIDINGS_* env.
//! let resolved = Config::load(None).unwrap();
//! println!("Serving breakfast to: {:?}", resolved.config.demo.people);
//! ```
//!
//! # Configuration Precedence
//!
//! From highest to lowest priority:
//!
//! 1. **Environment variables** (`TIDINGS_LOG_LEVEL`, `TIDINGS_LOG_FORMAT`)
//! 2. **Explicit file** passed with `--config`
//! 3. **User** (`~/.tidings/config.toml`)
//! 4. **Embedded defaults** (`defaults.toml` compiled into binary)
//!
//! This crate has no dependencies on other internal tidings crates.
//! Conversion to domain types (such as the telemetry `LogConfig`) happens in
//! the CLI.

/// Configuration error types.
pub mod error;
/// Configuration file discovery and loading.
pub mod loader;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::ResolvedConfig;
pub use types::*;

impl Config {
    /// Load configuration with the full precedence chain.
    ///
    /// See [`loader::load`] for the full algorithm.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any config file is malformed or the final
    /// configuration fails validation.
    pub fn load(explicit: Option<&std::path::Path>) -> ConfigResult<ResolvedConfig> {
        loader::load(explicit, None)
    }

    /// Load configuration with an explicit `~/.tidings` directory override.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any config file is malformed or the final
    /// configuration fails validation.
    pub fn load_with_home(
        explicit: Option<&std::path::Path>,
        tidings_home: &std::path::Path,
    ) -> ConfigResult<ResolvedConfig> {
        loader::load(explicit, Some(tidings_home))
    }
}
