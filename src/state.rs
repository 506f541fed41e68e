use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use lifecycle::{Address, Attributes, Records};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Current state file format version
pub const STATE_VERSION: u32 = 1;

// ============================================================================
// State Structures
// ============================================================================

/// Persisted records for every tracked resource instance
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StateFile {
    /// Format version
    pub version: u32,

    /// Incremented on every save that changed the records
    #[serde(default)]
    pub serial: u64,

    /// Last time the state was updated
    pub last_updated: DateTime<Utc>,

    /// Records keyed by `<type>.<name>`
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceInstance>,
}

/// A single persisted record
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ResourceInstance {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub name: String,
    /// Attribute values; `null` is an absent value
    pub attributes: BTreeMap<String, Option<String>>,
}

// ============================================================================
// StateFile Implementation
// ============================================================================

impl StateFile {
    /// Load state from disk, or return default if file doesn't exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("State file does not exist, using empty state");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file: {}", path.display()))?;

        let state: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse state file: {}", path.display()))?;

        if state.version != STATE_VERSION {
            bail!(
                "Unsupported state version {} in {} (expected {})",
                state.version,
                path.display(),
                STATE_VERSION
            );
        }

        log::debug!("Loaded state from {}", path.display());
        Ok(state)
    }

    /// Save state to disk
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create state directory: {}", dir.display()))?;
        }

        let content =
            serde_json::to_string_pretty(&self).context("Failed to serialize state to JSON")?;

        fs::write(path, &content)
            .with_context(|| format!("Failed to write state file: {}", path.display()))?;

        log::debug!("Saved state to {}", path.display());
        Ok(())
    }

    /// Tracked records keyed by address
    pub fn records(&self) -> Result<Records> {
        self.resources
            .iter()
            .map(|(key, instance)| {
                let address = Address::new(&instance.resource_type, &instance.name);
                if address.to_string() != *key {
                    bail!("State entry `{key}` does not match its address `{address}`");
                }
                Ok((address, Attributes::from_persisted(&instance.attributes)))
            })
            .collect()
    }

    /// Replace the tracked records
    ///
    /// Bumps `serial` and `last_updated` only when something changed.
    /// Fails if a record still holds an unknown value.
    pub fn set_records(&mut self, records: &Records) -> Result<bool> {
        let resources = records
            .iter()
            .map(|(address, attrs)| {
                let attributes = attrs
                    .to_persisted()
                    .with_context(|| format!("Cannot store {address}"))?;
                Ok((
                    address.to_string(),
                    ResourceInstance {
                        resource_type: address.resource_type.clone(),
                        name: address.name.clone(),
                        attributes,
                    },
                ))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        if resources == self.resources {
            return Ok(false);
        }

        self.resources = resources;
        self.serial += 1;
        self.last_updated = Utc::now();
        Ok(true)
    }
}

impl Default for StateFile {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            serial: 0,
            last_updated: Utc::now(),
            resources: BTreeMap::new(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
