//! Desired-state configuration
//!
//! ```toml
//! [resource.data_notnull.test]
//! value = "test_value"
//! default_value = "default_value"
//!
//! [resource.data_notnull.pending]
//! value = { unknown = true }
//! ```

use anyhow::{Context, Result};
use lifecycle::{Address, Attributes, Records};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Resource blocks: type -> name -> attributes
    #[serde(default)]
    pub resource: BTreeMap<String, BTreeMap<String, Attributes>>,
}

impl Config {
    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        log::debug!(
            "Loaded {} resource block(s) from {}",
            config.records().len(),
            path.display()
        );
        Ok(config)
    }

    /// Parse config from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Desired records keyed by address
    pub fn records(&self) -> Records {
        self.resource
            .iter()
            .flat_map(|(ty, instances)| {
                instances.iter().map(move |(name, attrs)| {
                    (Address::new(ty.as_str(), name.as_str()), attrs.clone())
                })
            })
            .collect()
    }
}
