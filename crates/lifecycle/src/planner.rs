//! Planner - compares configuration with prior state

use crate::attributes::Attributes;
use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::provider::Provider;
use crate::schema::Schema;
use crate::types::{Address, PlannedAction};
use crate::value::StringValue;
use std::collections::{BTreeMap, BTreeSet};

/// Resource records keyed by address
pub type Records = BTreeMap<Address, Attributes>;

/// A change to one attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDiff {
    pub name: String,
    pub before: StringValue,
    pub after: StringValue,
}

/// The planned change for one resource instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceChange {
    pub address: Address,
    pub action: PlannedAction,
    /// Persisted record before the change
    pub prior: Option<Attributes>,
    /// Record handed to create/update; computed attributes are unknown
    pub planned: Option<Attributes>,
}

impl ResourceChange {
    /// Attributes whose value differs between prior and planned
    pub fn attribute_diffs(&self) -> Vec<AttributeDiff> {
        let empty = Attributes::new();
        let before = self.prior.as_ref().unwrap_or(&empty);
        let after = self.planned.as_ref().unwrap_or(&empty);

        let names: BTreeSet<&str> = before.names().chain(after.names()).collect();
        names
            .into_iter()
            .filter(|name| before.get(name) != after.get(name))
            .map(|name| AttributeDiff {
                name: name.to_string(),
                before: before.get(name).clone(),
                after: after.get(name).clone(),
            })
            .collect()
    }
}

/// Plan summary statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanSummary {
    pub create: usize,
    pub update: usize,
    pub delete: usize,
}

impl PlanSummary {
    pub fn total(&self) -> usize {
        self.create + self.update + self.delete
    }
}

/// A set of planned changes, sorted by address
#[derive(Debug, Clone, Default)]
pub struct Plan {
    pub changes: Vec<ResourceChange>,
    /// Non-fatal validation diagnostics
    pub warnings: Diagnostics,
}

impl Plan {
    /// Changes that actually do something
    pub fn pending(&self) -> impl Iterator<Item = &ResourceChange> {
        self.changes.iter().filter(|c| c.action.is_change())
    }

    pub fn has_changes(&self) -> bool {
        self.pending().next().is_some()
    }

    pub fn summary(&self) -> PlanSummary {
        let mut summary = PlanSummary::default();
        for change in &self.changes {
            match change.action {
                PlannedAction::Create => summary.create += 1,
                PlannedAction::Update => summary.update += 1,
                PlannedAction::Delete => summary.delete += 1,
                PlannedAction::NoChange => {}
            }
        }
        summary
    }

    /// Filter plan to only include changes matching a target pattern
    ///
    /// Target format: "type" or "type.name"
    pub fn filter_by_target(self, target: Option<&str>) -> Self {
        match target {
            None => self,
            Some(t) => Self {
                changes: self
                    .changes
                    .into_iter()
                    .filter(|c| matches_target(&c.address, t))
                    .collect(),
                warnings: self.warnings,
            },
        }
    }
}

/// Plan the changes needed to bring `prior` in line with `desired`
///
/// Every configured record is validated against its schema first; an
/// invalid configuration aborts planning.
pub fn plan_changes(provider: &Provider, desired: &Records, prior: &Records) -> Result<Plan> {
    let mut plan = Plan::default();
    let addresses: BTreeSet<&Address> = desired.keys().chain(prior.keys()).collect();

    for address in addresses {
        let schema = provider.resource(&address.resource_type)?.schema();
        let prior_state = prior.get(address);

        let change = match desired.get(address) {
            Some(config) => {
                let diagnostics = schema.validate_config(config);
                if diagnostics.has_error() {
                    return Err(Error::Diagnostics {
                        address: address.to_string(),
                        diagnostics,
                    });
                }
                plan.warnings.extend(diagnostics);
                plan_configured(address, &schema, config, prior_state)
            }
            None => ResourceChange {
                address: address.clone(),
                action: PlannedAction::Delete,
                prior: prior_state.cloned(),
                planned: None,
            },
        };

        log::debug!("Planned {:?} for {}", change.action, address);
        plan.changes.push(change);
    }

    Ok(plan)
}

fn plan_configured(
    address: &Address,
    schema: &Schema,
    config: &Attributes,
    prior: Option<&Attributes>,
) -> ResourceChange {
    let config = schema.config_view(config);

    let (action, planned) = match prior {
        None => (PlannedAction::Create, with_unknown_computed(schema, config)),
        Some(p) if schema.config_view(p) == config => (PlannedAction::NoChange, p.clone()),
        Some(_) => (PlannedAction::Update, with_unknown_computed(schema, config)),
    };

    ResourceChange {
        address: address.clone(),
        action,
        prior: prior.cloned(),
        planned: Some(planned),
    }
}

/// Mark every computed attribute as known after apply
fn with_unknown_computed(schema: &Schema, mut attrs: Attributes) -> Attributes {
    for name in schema.computed_names() {
        attrs.set(name, StringValue::Unknown);
    }
    attrs
}

/// Parse a target string like "type.name" into (type, name)
fn parse_target(target: &str) -> (&str, Option<&str>) {
    match target.split_once('.') {
        Some((resource_type, name)) => (resource_type, Some(name)),
        None => (target, None),
    }
}

/// Check if an address matches a target: `type` or `type.name`
pub fn matches_target(address: &Address, target: &str) -> bool {
    let (resource_type, name) = parse_target(target);
    address.resource_type == resource_type && name.is_none_or(|n| address.name == n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("data_notnull"), ("data_notnull", None));
        assert_eq!(
            parse_target("data_notnull.test"),
            ("data_notnull", Some("test"))
        );
        assert_eq!(parse_target("a.b.c"), ("a", Some("b.c")));
    }

    #[test]
    fn test_matches_target() {
        let addr = Address::new("data_notnull", "test");
        assert!(matches_target(&addr, "data_notnull"));
        assert!(matches_target(&addr, "data_notnull.test"));
        assert!(!matches_target(&addr, "data_notnull.other"));
        assert!(!matches_target(&addr, "data_other"));
        assert!(!matches_target(&addr, "data_notnull.test.extra"));
    }

    #[test]
    fn test_filter_by_target() {
        let change = |name: &str| ResourceChange {
            address: Address::new("data_notnull", name),
            action: PlannedAction::Create,
            prior: None,
            planned: Some(Attributes::new()),
        };
        let plan = Plan {
            changes: vec![change("a"), change("b")],
            warnings: Diagnostics::new(),
        };

        let filtered = plan.clone().filter_by_target(Some("data_notnull.b"));
        assert_eq!(filtered.changes.len(), 1);
        assert_eq!(filtered.changes[0].address.name, "b");
        let by_type = plan.clone().filter_by_target(Some("data_notnull"));
        assert_eq!(by_type.changes.len(), 2);
        assert!(plan.filter_by_target(Some("a.b.c")).changes.is_empty());
    }

    #[test]
    fn test_attribute_diffs() {
        let change = ResourceChange {
            address: Address::new("data_notnull", "test"),
            action: PlannedAction::Update,
            prior: Some(Attributes::new().with("value", "a").with("id", "notnull")),
            planned: Some(
                Attributes::new()
                    .with("value", StringValue::Null)
                    .with("id", StringValue::Unknown),
            ),
        };
        let diffs = change.attribute_diffs();
        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].name, "id");
        assert!(diffs[0].after.is_unknown());
        assert_eq!(diffs[1].name, "value");
        assert!(diffs[1].after.is_null());
    }
}
