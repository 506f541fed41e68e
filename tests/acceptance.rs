//! Apply sequences through config, planner, executor and the state file

use lifecycle::{
    Address, AutoConfirm, ExecuteOptions, ExecuteSummary, NoProgress, Records, StringValue,
    execute, plan_changes, refresh,
};
use notnull::config::Config;
use notnull::provider::new_provider;
use notnull::state::StateFile;
use std::path::Path;

fn known(s: &str) -> StringValue {
    StringValue::known(s)
}

fn config(value: Option<&str>, default_value: Option<&str>) -> String {
    let mut out = String::from("[resource.data_notnull.test]\n");
    if let Some(v) = value {
        out.push_str(&format!("value = {v:?}\n"));
    }
    if let Some(d) = default_value {
        out.push_str(&format!("default_value = {d:?}\n"));
    }
    out
}

/// One `apply -y` step: load state, refresh, plan, execute, save
fn apply(state_path: &Path, config_text: &str) -> ExecuteSummary {
    let provider = new_provider();
    let config = Config::parse(config_text).unwrap();

    let mut state = StateFile::load(state_path).unwrap();
    let mut records = state.records().unwrap();
    refresh(&provider, &mut records).unwrap();

    let plan = plan_changes(&provider, &config.records(), &records).unwrap();
    let summary = execute(
        &provider,
        &plan,
        &mut records,
        &ExecuteOptions::default(),
        &mut NoProgress,
        &mut AutoConfirm,
    )
    .unwrap();

    if state.set_records(&records).unwrap() {
        state.save(state_path).unwrap();
    }
    summary
}

fn record(state_path: &Path) -> lifecycle::Attributes {
    let records = StateFile::load(state_path).unwrap().records().unwrap();
    records[&Address::new("data_notnull", "test")].clone()
}

#[test]
fn test_value_update_then_removal_keeps_result() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("state.json");

    // Create with value provided
    let summary = apply(
        &state_path,
        &config(Some("test_value"), Some("default_value")),
    );
    assert_eq!(summary.created, 1);
    let rec = record(&state_path);
    assert_eq!(rec.get("value"), &known("test_value"));
    assert_eq!(rec.get("default_value"), &known("default_value"));
    assert_eq!(rec.get("result"), &known("test_value"));
    assert_eq!(rec.get("id"), &known("notnull"));

    // Change value
    let summary = apply(
        &state_path,
        &config(Some("updated_value"), Some("default_value")),
    );
    assert_eq!(summary.updated, 1);
    let rec = record(&state_path);
    assert_eq!(rec.get("value"), &known("updated_value"));
    assert_eq!(rec.get("result"), &known("updated_value"));

    // Remove value: previous result is preserved
    let summary = apply(&state_path, &config(None, Some("default_only")));
    assert_eq!(summary.updated, 1);
    let rec = record(&state_path);
    assert_eq!(rec.get("default_value"), &known("default_only"));
    assert!(rec.get("value").is_null());
    assert_eq!(rec.get("result"), &known("updated_value"));
    assert_eq!(rec.get("id"), &known("notnull"));
}

#[test]
fn test_default_only_create() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("state.json");

    apply(&state_path, &config(None, Some("default_only")));

    let rec = record(&state_path);
    assert_eq!(rec.get("default_value"), &known("default_only"));
    assert_eq!(rec.get("result"), &known("default_only"));
}

#[test]
fn test_nothing_set_creates_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("state.json");

    apply(&state_path, &config(None, None));

    assert_eq!(record(&state_path).get("result"), &known(""));
}

#[test]
fn test_unchanged_config_is_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("state.json");
    let text = config(Some("a"), None);

    apply(&state_path, &text);
    let serial = StateFile::load(&state_path).unwrap().serial;

    let summary = apply(&state_path, &text);
    assert_eq!(summary.total_changes(), 0);
    assert_eq!(summary.no_change, 1);
    assert_eq!(StateFile::load(&state_path).unwrap().serial, serial);
}

#[test]
fn test_unknown_value_keeps_result() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("state.json");

    apply(&state_path, &config(Some("first"), Some("default")));
    let summary = apply(
        &state_path,
        "[resource.data_notnull.test]\nvalue = { unknown = true }\ndefault_value = \"default\"\n",
    );

    assert!(summary.is_success());
    assert_eq!(summary.updated, 1);
    let rec = record(&state_path);
    assert!(rec.get("value").is_null());
    assert_eq!(rec.get("result"), &known("first"));
}

#[test]
fn test_removing_block_deletes_record() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("state.json");

    apply(&state_path, &config(Some("a"), None));
    let summary = apply(&state_path, "");

    assert_eq!(summary.deleted, 1);
    let records: Records = StateFile::load(&state_path).unwrap().records().unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_setting_computed_attribute_is_rejected() {
    let provider = new_provider();
    let config = Config::parse("[resource.data_notnull.test]\nresult = \"forced\"\n").unwrap();

    assert!(plan_changes(&provider, &config.records(), &Records::new()).is_err());
}

#[test]
fn test_refresh_leaves_state_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("state.json");

    let mut sparse = Records::new();
    sparse.insert(
        Address::new("data_notnull", "test"),
        lifecycle::Attributes::new()
            .with("result", "kept")
            .with("id", "notnull"),
    );
    let mut state = StateFile::default();
    state.set_records(&sparse).unwrap();
    state.save(&state_path).unwrap();
    let serial = state.serial;

    let mut state = StateFile::load(&state_path).unwrap();
    let mut records = state.records().unwrap();
    refresh(&new_provider(), &mut records).unwrap();

    assert_eq!(records, sparse);
    assert!(!state.set_records(&records).unwrap());
    assert_eq!(state.serial, serial);
}

#[test]
fn test_pending_computed_attribute_warns() {
    let provider = new_provider();
    let text = "[resource.data_notnull.test]\nvalue = \"a\"\nresult = { unknown = true }\n";
    let config = Config::parse(text).unwrap();

    let plan = plan_changes(&provider, &config.records(), &Records::new()).unwrap();
    let warned: Vec<_> = plan
        .warnings
        .warnings()
        .filter_map(|d| d.attribute.as_deref())
        .collect();
    assert_eq!(warned, vec!["result"]);
    assert_eq!(plan.summary().create, 1);
}
