//! # Lifecycle
//!
//! A small framework for resources that are created, read, updated and
//! deleted against a persisted state record.
//!
//! ## Core Concepts
//!
//! - **StringValue**: a tri-state attribute value (null, unknown, known)
//! - **Attributes**: the untyped record passed to and from resources
//! - **Schema**: declares which attributes are configurable or computed
//! - **Resource**: the four lifecycle callbacks plus metadata and schema
//! - **Provider**: registry of resource factories under a type name
//! - **Plan**: per-address create/update/delete decisions
//! - **Executor**: applies a plan through the resource callbacks
//!
//! ## Example
//!
//! ```ignore
//! use lifecycle::{
//!     plan_changes, execute, Address, Attributes, AutoConfirm, ExecuteOptions,
//!     NoProgress, Provider, Records,
//! };
//!
//! let provider = Provider::new("data").with_resource(my_resource_factory);
//!
//! let mut desired = Records::new();
//! desired.insert(
//!     Address::new("data_example", "one"),
//!     Attributes::new().with("input", "hello"),
//! );
//!
//! let mut state = Records::new();
//! let plan = plan_changes(&provider, &desired, &state)?;
//! let summary = execute(
//!     &provider,
//!     &plan,
//!     &mut state,
//!     &ExecuteOptions::default(),
//!     &mut NoProgress,
//!     &mut AutoConfirm,
//! )?;
//! ```
//!
//! ## Callback Traits
//!
//! - [`ProgressCallback`]: Receives progress updates
//! - [`ConfirmCallback`]: Handles user confirmations
//!
//! This keeps the crate free of any terminal UI dependency.

pub mod attributes;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod executor;
pub mod planner;
pub mod provider;
pub mod resource;
pub mod schema;
pub mod types;
pub mod value;

// Re-export main types at crate root
pub use attributes::Attributes;
pub use context::{AutoConfirm, AutoDecline, ConfirmCallback, NoProgress, ProgressCallback};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{Error, Result};
pub use executor::{execute, refresh};
pub use planner::{
    AttributeDiff, Plan, PlanSummary, Records, ResourceChange, matches_target, plan_changes,
};
pub use provider::{Provider, ResourceFactory};
pub use resource::{BoxedResource, FromAttributes, IntoAttributes, Resource};
pub use schema::{Attribute, AttributeMode, Schema};
pub use types::{Address, ApplyResult, ExecuteOptions, ExecuteSummary, PlannedAction};
pub use value::StringValue;
