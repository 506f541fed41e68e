//! NotNull resource - a sticky, never-null result string
//!
//! `result` is taken from `value` when it is set, otherwise the previous
//! `result` is kept, otherwise `default_value` is used. Nothing outside the
//! state record is touched.

use anyhow::Result;
use lifecycle::{
    Attribute, Attributes, BoxedResource, FromAttributes, IntoAttributes, Resource, Schema,
    StringValue,
};

/// Type name suffix under the provider (`data_notnull`)
pub const TYPE_SUFFIX: &str = "notnull";

/// Constant identifier of every notnull record
pub const STATIC_ID: &str = "notnull";

/// Compute the result from the primary value, default value and prior result
///
/// First match wins:
/// 1. `primary` is known and non-empty
/// 2. `prior` is non-empty
/// 3. `default` is known and non-empty
/// 4. the empty string
///
/// An empty `primary` counts as not provided: it falls through to the prior
/// result and the default rather than clearing the result.
pub fn resolve(primary: &StringValue, default: &StringValue, prior: Option<&str>) -> String {
    if let Some(value) = primary.as_non_empty() {
        return value.to_string();
    }

    if let Some(prior) = prior.filter(|p| !p.is_empty()) {
        return prior.to_string();
    }

    if let Some(default) = default.as_non_empty() {
        return default.to_string();
    }

    String::new()
}

/// Typed view of a notnull record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotNullModel {
    pub value: StringValue,
    pub default_value: StringValue,
    pub result: StringValue,
    pub id: StringValue,
}

impl NotNullModel {
    /// Inputs still pending at apply time are stored as null
    fn settled(mut self) -> Self {
        for input in [&mut self.value, &mut self.default_value] {
            if input.is_unknown() {
                *input = StringValue::Null;
            }
        }
        self
    }
}

impl FromAttributes for NotNullModel {
    fn from_attributes(attrs: &Attributes) -> lifecycle::Result<Self> {
        Ok(Self {
            value: attrs.get("value").clone(),
            default_value: attrs.get("default_value").clone(),
            result: attrs.get("result").clone(),
            id: attrs.get("id").clone(),
        })
    }
}

impl IntoAttributes for NotNullModel {
    fn into_attributes(self) -> Attributes {
        Attributes::new()
            .with("value", self.value)
            .with("default_value", self.default_value)
            .with("result", self.result)
            .with("id", self.id)
    }
}

/// The notnull resource
#[derive(Debug, Default, Clone)]
pub struct NotNullResource;

/// Factory used for provider registration
pub fn new_resource() -> BoxedResource {
    Box::new(NotNullResource)
}

impl Resource for NotNullResource {
    fn metadata(&self, provider_type_name: &str) -> String {
        format!("{provider_type_name}_{TYPE_SUFFIX}")
    }

    fn schema(&self) -> Schema {
        Schema::new(
            "NotNull resource that returns a non-null value based on input value and default",
        )
        .with_attribute(
            "value",
            Attribute::optional("The primary value to use for result"),
        )
        .with_attribute(
            "default_value",
            Attribute::optional("The default value to use when value is null"),
        )
        .with_attribute(
            "result",
            Attribute::computed("The computed result - never null"),
        )
        .with_attribute("id", Attribute::computed("Internal identifier"))
    }

    fn create(&self, plan: &Attributes) -> Result<Attributes> {
        let mut data = NotNullModel::from_attributes(plan)?;

        let result = resolve(&data.value, &data.default_value, None);
        log::debug!("notnull create: result = {result:?}");
        data.result = StringValue::Known(result);
        data.id = StringValue::known(STATIC_ID);

        Ok(data.settled().into_attributes())
    }

    fn read(&self, state: &Attributes) -> Result<Attributes> {
        // Nothing external to refresh; the stored record is returned as-is
        let _data = NotNullModel::from_attributes(state)?;
        Ok(state.clone())
    }

    fn update(&self, plan: &Attributes, prior: &Attributes) -> Result<Attributes> {
        let mut data = NotNullModel::from_attributes(plan)?;
        let state = NotNullModel::from_attributes(prior)?;

        let result = resolve(&data.value, &data.default_value, state.result.as_known());
        log::debug!(
            "notnull update: prior result = {}, result = {result:?}",
            state.result
        );
        data.result = StringValue::Known(result);
        data.id = state.id;

        Ok(data.settled().into_attributes())
    }

    fn delete(&self, state: &Attributes) -> Result<()> {
        // Logical resource: decoding the record is all there is to do
        let _data = NotNullModel::from_attributes(state)?;
        log::debug!("notnull delete: nothing to remove");
        Ok(())
    }
}
