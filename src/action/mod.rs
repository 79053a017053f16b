//! Outbound user actions: name matching against a known catalog, context
//! extraction, and submission to the origin.

pub mod catalog;
pub mod dispatcher;

pub use catalog::{context_value, normalize, ActionCatalog};
pub use dispatcher::{ActionDispatcher, INVALID_ACTION, NETWORK_ERROR};
