//! Progress and confirmation callbacks
//!
//! These traits allow the lifecycle crate to be used without
//! depending on a specific terminal UI.

use crate::types::{Address, ApplyResult, PlannedAction};
use anyhow::Result;

/// Progress callback for execution operations
pub trait ProgressCallback {
    /// Called once before any change is applied
    fn on_start(&mut self, count: usize);

    /// Called when starting to apply a single change
    fn on_resource_start(&mut self, address: &Address, action: PlannedAction);

    /// Called when a change completes
    fn on_resource_complete(&mut self, address: &Address, result: &ApplyResult);

    /// Called after the last change
    fn on_complete(&mut self);
}

/// Confirmation callback for user interaction
pub trait ConfirmCallback {
    /// Ask the user to confirm an action
    ///
    /// Returns `true` if the user confirmed.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// No-op progress callback
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_start(&mut self, _count: usize) {}
    fn on_resource_start(&mut self, _address: &Address, _action: PlannedAction) {}
    fn on_resource_complete(&mut self, _address: &Address, _result: &ApplyResult) {}
    fn on_complete(&mut self) {}
}

/// Auto-confirm callback (always returns true)
pub struct AutoConfirm;

impl ConfirmCallback for AutoConfirm {
    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Auto-decline callback (always returns false)
pub struct AutoDecline;

impl ConfirmCallback for AutoDecline {
    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(false)
    }
}
