//! Execution engine - applies planned changes through resource callbacks

use crate::attributes::Attributes;
use crate::context::{ConfirmCallback, ProgressCallback};
use crate::error::{Error, Result};
use crate::planner::{Plan, Records, ResourceChange};
use crate::provider::Provider;
use crate::types::{ApplyResult, ExecuteOptions, ExecuteSummary, PlannedAction};

/// Apply a plan, updating `state` in place
///
/// Changes are applied one at a time in address order. A failing change
/// is recorded as [`ApplyResult::Failed`] and leaves its record untouched;
/// the remaining changes still run.
pub fn execute<P, C>(
    provider: &Provider,
    plan: &Plan,
    state: &mut Records,
    opts: &ExecuteOptions,
    progress: &mut P,
    confirm: &mut C,
) -> Result<ExecuteSummary>
where
    P: ProgressCallback,
    C: ConfirmCallback,
{
    let pending: Vec<&ResourceChange> = plan.pending().collect();
    let unchanged = plan.changes.len() - pending.len();

    if pending.is_empty() {
        return Ok(ExecuteSummary {
            no_change: unchanged,
            ..Default::default()
        });
    }

    if opts.dry_run {
        log::info!("Dry run, {} change(s) not applied", pending.len());
        return Ok(ExecuteSummary {
            no_change: unchanged,
            ..Default::default()
        });
    }

    let confirmed = confirm
        .confirm("Apply changes?")
        .map_err(|source| Error::Resource {
            operation: "confirm",
            address: "plan".to_string(),
            source,
        })?;

    let mut summary = ExecuteSummary {
        no_change: unchanged,
        ..Default::default()
    };

    if !confirmed {
        let skipped = ApplyResult::Skipped {
            reason: "declined".to_string(),
        };
        for change in pending {
            progress.on_resource_complete(&change.address, &skipped);
            summary.add_result(&skipped);
        }
        return Ok(summary);
    }

    progress.on_start(pending.len());
    for change in pending {
        progress.on_resource_start(&change.address, change.action);
        let result = match apply_change(provider, change, state) {
            Ok(result) => result,
            Err(e) => {
                log::warn!("{e}");
                ApplyResult::Failed {
                    error: e.to_string(),
                }
            }
        };
        progress.on_resource_complete(&change.address, &result);
        summary.add_result(&result);
    }
    progress.on_complete();

    Ok(summary)
}

/// Apply a single change
fn apply_change(
    provider: &Provider,
    change: &ResourceChange,
    state: &mut Records,
) -> Result<ApplyResult> {
    let address = &change.address;
    let resource = provider.resource(&address.resource_type)?;
    let fail = |operation: &'static str| {
        move |source: anyhow::Error| Error::Resource {
            operation,
            address: address.to_string(),
            source,
        }
    };

    match change.action {
        PlannedAction::NoChange => Ok(ApplyResult::NoChange),
        PlannedAction::Create => {
            let planned = required(change.planned.as_ref(), "planned")?;
            let new_state = resource.create(planned).map_err(fail("create"))?;
            ensure_known(&new_state)?;
            log::debug!("Created {address}");
            state.insert(address.clone(), new_state);
            Ok(ApplyResult::Created)
        }
        PlannedAction::Update => {
            let planned = required(change.planned.as_ref(), "planned")?;
            let prior = required(change.prior.as_ref(), "prior")?;
            let new_state = resource.update(planned, prior).map_err(fail("update"))?;
            ensure_known(&new_state)?;
            log::debug!("Updated {address}");
            state.insert(address.clone(), new_state);
            Ok(ApplyResult::Updated)
        }
        PlannedAction::Delete => {
            let prior = required(change.prior.as_ref(), "prior")?;
            resource.delete(prior).map_err(fail("delete"))?;
            log::debug!("Deleted {address}");
            state.remove(address);
            Ok(ApplyResult::Deleted)
        }
    }
}

/// Refresh every tracked record through its resource's read callback
pub fn refresh(provider: &Provider, state: &mut Records) -> Result<()> {
    for (address, attrs) in state.iter_mut() {
        let resource = provider.resource(&address.resource_type)?;
        let refreshed = resource.read(attrs).map_err(|source| Error::Resource {
            operation: "read",
            address: address.to_string(),
            source,
        })?;
        ensure_known(&refreshed)?;
        *attrs = refreshed;
    }
    Ok(())
}

fn required<'a>(attrs: Option<&'a Attributes>, what: &str) -> Result<&'a Attributes> {
    attrs.ok_or_else(|| Error::MissingAttribute(format!("<{what} record>")))
}

/// A record returned by a callback must not hold unknown values
fn ensure_known(attrs: &Attributes) -> Result<()> {
    attrs.to_persisted().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{AutoConfirm, AutoDecline, NoProgress};
    use crate::planner::plan_changes;
    use crate::resource::{BoxedResource, Resource};
    use crate::schema::{Attribute, Schema};
    use crate::types::Address;
    use crate::value::StringValue;

    /// Copies `input` into the computed `output`; fails when input is "fail"
    #[derive(Debug)]
    struct Mirror;

    impl Mirror {
        fn compute(plan: &Attributes) -> anyhow::Result<Attributes> {
            let input = plan.get("input").as_known().unwrap_or_default().to_string();
            if input == "fail" {
                anyhow::bail!("refusing to mirror");
            }
            Ok(plan.clone().with("output", input))
        }
    }

    impl Resource for Mirror {
        fn metadata(&self, provider_type_name: &str) -> String {
            format!("{provider_type_name}_mirror")
        }

        fn schema(&self) -> Schema {
            Schema::new("mirror")
                .with_attribute("input", Attribute::optional("input"))
                .with_attribute("output", Attribute::computed("output"))
        }

        fn create(&self, plan: &Attributes) -> anyhow::Result<Attributes> {
            Self::compute(plan)
        }

        fn read(&self, state: &Attributes) -> anyhow::Result<Attributes> {
            Ok(state.clone())
        }

        fn update(&self, plan: &Attributes, _prior: &Attributes) -> anyhow::Result<Attributes> {
            Self::compute(plan)
        }

        fn delete(&self, _state: &Attributes) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn mirror() -> BoxedResource {
        Box::new(Mirror)
    }

    fn provider() -> Provider {
        Provider::new("test").with_resource(mirror)
    }

    fn config(input: &str) -> Records {
        let mut records = Records::new();
        records.insert(
            Address::new("test_mirror", "a"),
            Attributes::new().with("input", input),
        );
        records
    }

    #[test]
    fn test_execute_empty_plan() {
        let provider = provider();
        let plan = plan_changes(&provider, &Records::new(), &Records::new()).unwrap();
        let mut state = Records::new();
        let summary = execute(
            &provider,
            &plan,
            &mut state,
            &ExecuteOptions::default(),
            &mut NoProgress,
            &mut AutoConfirm,
        )
        .unwrap();

        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_execute_create_then_no_change() {
        let provider = provider();
        let desired = config("x");
        let mut state = Records::new();

        let plan = plan_changes(&provider, &desired, &state).unwrap();
        let summary = execute(
            &provider,
            &plan,
            &mut state,
            &ExecuteOptions::default(),
            &mut NoProgress,
            &mut AutoConfirm,
        )
        .unwrap();
        assert_eq!(summary.created, 1);

        let record = &state[&Address::new("test_mirror", "a")];
        assert_eq!(record.get("output"), &StringValue::known("x"));

        let plan = plan_changes(&provider, &desired, &state).unwrap();
        assert!(!plan.has_changes());
    }

    #[test]
    fn test_execute_dry_run_leaves_state() {
        let provider = provider();
        let mut state = Records::new();
        let plan = plan_changes(&provider, &config("x"), &state).unwrap();
        let summary = execute(
            &provider,
            &plan,
            &mut state,
            &ExecuteOptions { dry_run: true },
            &mut NoProgress,
            &mut AutoConfirm,
        )
        .unwrap();

        assert_eq!(summary.total_changes(), 0);
        assert!(state.is_empty());
    }

    /// Records every completed resource
    #[derive(Default)]
    struct Recorder {
        completed: Vec<(Address, ApplyResult)>,
    }

    impl ProgressCallback for Recorder {
        fn on_start(&mut self, _count: usize) {}

        fn on_resource_start(&mut self, _address: &Address, _action: PlannedAction) {}

        fn on_resource_complete(&mut self, address: &Address, result: &ApplyResult) {
            self.completed.push((address.clone(), result.clone()));
        }

        fn on_complete(&mut self) {}
    }

    #[test]
    fn test_execute_declined() {
        let provider = provider();
        let mut state = Records::new();
        let mut desired = config("x");
        desired.insert(
            Address::new("test_mirror", "b"),
            Attributes::new().with("input", "y"),
        );
        let plan = plan_changes(&provider, &desired, &state).unwrap();
        let mut recorder = Recorder::default();
        let summary = execute(
            &provider,
            &plan,
            &mut state,
            &ExecuteOptions::default(),
            &mut recorder,
            &mut AutoDecline,
        )
        .unwrap();

        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.total_changes(), 0);
        assert!(state.is_empty());

        let skipped = ApplyResult::Skipped {
            reason: "declined".to_string(),
        };
        assert_eq!(
            recorder.completed,
            vec![
                (Address::new("test_mirror", "a"), skipped.clone()),
                (Address::new("test_mirror", "b"), skipped),
            ]
        );
    }

    #[test]
    fn test_execute_failure_is_recorded() {
        let provider = provider();
        let mut state = Records::new();
        let plan = plan_changes(&provider, &config("fail"), &state).unwrap();
        let summary = execute(
            &provider,
            &plan,
            &mut state,
            &ExecuteOptions::default(),
            &mut NoProgress,
            &mut AutoConfirm,
        )
        .unwrap();

        assert_eq!(summary.failed, 1);
        assert!(state.is_empty());
    }

    #[test]
    fn test_execute_delete() {
        let provider = provider();
        let mut state = Records::new();
        state.insert(
            Address::new("test_mirror", "a"),
            Attributes::new().with("input", "x").with("output", "x"),
        );

        let plan = plan_changes(&provider, &Records::new(), &state).unwrap();
        let summary = execute(
            &provider,
            &plan,
            &mut state,
            &ExecuteOptions::default(),
            &mut NoProgress,
            &mut AutoConfirm,
        )
        .unwrap();

        assert_eq!(summary.deleted, 1);
        assert!(state.is_empty());
    }
}
