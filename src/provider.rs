//! Provider registration

use lifecycle::Provider;

use crate::resource;

/// Provider type name; resource types are prefixed with it
pub const PROVIDER_TYPE_NAME: &str = "data";

/// Build the provider with every resource registered
pub fn new_provider() -> Provider {
    Provider::new(PROVIDER_TYPE_NAME).with_resource(resource::new_resource)
}
