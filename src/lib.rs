//! # notnull
//!
//! The `data_notnull` resource: a result string that is never null and
//! sticks to its last good value when the input goes away.
//!
//! The resource is served through a [`lifecycle::Provider`] built by
//! [`provider::new_provider`]. The `notnull` binary drives it against a
//! TOML config file and a JSON state file.

pub mod config;
pub mod paths;
pub mod provider;
pub mod resource;
pub mod state;
