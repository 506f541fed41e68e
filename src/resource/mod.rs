//! Resources served by the notnull provider

pub mod notnull;

pub use notnull::{NotNullModel, NotNullResource, new_resource, resolve};
