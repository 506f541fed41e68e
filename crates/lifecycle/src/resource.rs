//! Resource trait for lifecycle management
//!
//! A Resource is a type the host can create, read, update and delete.
//! The host decodes requests into [`Attributes`], calls the matching
//! callback and persists whatever attributes the callback returns.

use crate::attributes::Attributes;
use crate::schema::Schema;
use anyhow::Result;
use std::fmt;

/// Core trait for lifecycle-managed resources
///
/// The four callbacks receive untyped attribute maps. Implementations
/// usually decode them into a model with [`FromAttributes`] and encode the
/// result back with [`IntoAttributes`].
///
/// # Example
///
/// ```ignore
/// use lifecycle::{Attribute, Attributes, Resource, Schema};
///
/// #[derive(Debug)]
/// struct Echo;
///
/// impl Resource for Echo {
///     fn metadata(&self, provider_type_name: &str) -> String {
///         format!("{provider_type_name}_echo")
///     }
///
///     fn schema(&self) -> Schema {
///         Schema::new("Echoes its input")
///             .with_attribute("input", Attribute::required("Input"))
///     }
///
///     fn create(&self, plan: &Attributes) -> anyhow::Result<Attributes> {
///         Ok(plan.clone())
///     }
///
///     fn read(&self, state: &Attributes) -> anyhow::Result<Attributes> {
///         Ok(state.clone())
///     }
///
///     fn update(&self, plan: &Attributes, _prior: &Attributes) -> anyhow::Result<Attributes> {
///         Ok(plan.clone())
///     }
///
///     fn delete(&self, _state: &Attributes) -> anyhow::Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait Resource: Send + Sync + fmt::Debug {
    /// Full type name of this resource under the given provider
    ///
    /// Conventionally `<provider>_<suffix>`, e.g. `data_notnull`.
    fn metadata(&self, provider_type_name: &str) -> String;

    /// Attribute schema
    fn schema(&self) -> Schema;

    /// Create the resource from a planned record (no prior state)
    fn create(&self, plan: &Attributes) -> Result<Attributes>;

    /// Refresh a persisted record
    fn read(&self, state: &Attributes) -> Result<Attributes>;

    /// Update the resource from a planned record and its prior state
    fn update(&self, plan: &Attributes, prior: &Attributes) -> Result<Attributes>;

    /// Delete the resource; the host drops the record afterwards
    fn delete(&self, state: &Attributes) -> Result<()>;
}

/// A boxed resource for type-erased storage
pub type BoxedResource = Box<dyn Resource>;

/// Decode a typed model from attributes
pub trait FromAttributes: Sized {
    fn from_attributes(attrs: &Attributes) -> crate::Result<Self>;
}

/// Encode a typed model into attributes
pub trait IntoAttributes {
    fn into_attributes(self) -> Attributes;
}
