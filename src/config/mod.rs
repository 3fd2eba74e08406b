//! Configuration Module
//!
//! Backend connection settings loaded from TOML files, so tooling and host
//! applications point at the right collections backend without recompiling.
//!
//! ## Loading Order
//!
//! 1. `FEEDBACK_CONFIG` environment variable (path to TOML file)
//! 2. `feedback_config.toml` in the current working directory
//! 3. Built-in defaults (local development backend)
//!
//! There is no process-global config: the engine is a library, and the
//! clients take the config they are handed.

mod backend_config;
pub mod validation;

pub use backend_config::*;
