//! Client-side runtime for the A2UI protocol.
//!
//! Consumes a session's event stream from an origin server, validates each
//! message, folds it into an immutable [`runtime::RuntimeState`] and
//! publishes snapshots for a renderer. Bindings, template children and
//! styles are resolved on demand by the functions in [`resolve`]. User
//! actions go back to the origin through [`action::ActionDispatcher`].

pub mod action;
pub mod args;
pub mod cancel;
pub mod config;
pub mod logging;
pub mod model;
pub mod origin;
pub mod protocol;
pub mod resolve;
pub mod runtime;
pub mod session_id;
pub mod stream;
