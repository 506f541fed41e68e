// Declarative plan/apply/destroy/show against the state file
pub mod declarative;

// Introspection
pub mod resolve;
pub mod schema;
