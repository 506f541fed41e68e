//! Error types for the lifecycle crate

use crate::diagnostics::Diagnostics;
use thiserror::Error;

/// Errors that can occur while planning or applying resources
#[derive(Error, Debug)]
pub enum Error {
    /// A required attribute was not present in a record
    #[error("missing attribute `{0}`")]
    MissingAttribute(String),

    /// No resource is registered for the type name
    #[error("unknown resource type `{0}`")]
    UnknownResourceType(String),

    /// An unknown value reached the point where it would be persisted
    #[error("attribute `{0}` is still unknown and cannot be stored in state")]
    UnknownValueInState(String),

    /// Configuration failed schema validation
    #[error("invalid configuration for {address}:\n{diagnostics}")]
    Diagnostics {
        address: String,
        diagnostics: Diagnostics,
    },

    /// A resource callback failed
    #[error("{operation} failed for {address}: {source}")]
    Resource {
        operation: &'static str,
        address: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Result type for lifecycle operations
pub type Result<T> = std::result::Result<T, Error>;
