//! `edudash-app` — process wiring for the access-control core.
//!
//! Reads configuration, loads the protected-subject data set and builds the
//! [`AccessContext`] that display collaborators receive by reference.

pub mod config;
pub mod context;

pub use config::{AppConfig, ConfigError};
pub use context::AccessContext;
