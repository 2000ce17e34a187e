//! Configuration loading and management for the PayTrack engine.
//!
//! This module loads server settings, the payroll policy, and the seed
//! employee roster from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use paytrack_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Listening on {}", config.server().bind_address);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, PayrollConfig, RosterFile, ServerConfig, SettingsFile};
