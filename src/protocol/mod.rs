//! Wire grammar for the remote UI protocol and its validator.

mod action;
mod message;
mod validator;

pub use action::{Action, ActionResult};
pub use message::{
    entries_to_model, surface_id_hint, A2uiMessage, BeginRendering, DataModelUpdate,
    DataModelUpdateEntry, DecodeError, DeleteSurface, SurfaceUpdate, ValueMap,
};
pub use validator::{validate_action, validate_message, ValidMessage, ValidationResult};
