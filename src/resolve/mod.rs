//! Pure resolvers that turn declarative props into concrete values.
//!
//! Nothing here holds state or does I/O; every function takes immutable
//! inputs and is safe to call from any thread.

mod binding;
mod children;
mod pointer;
mod style;

pub use binding::{resolve_bool, resolve_number, resolve_string, resolve_value, ValueBinding};
pub use children::{resolve_children, resolve_children_in, template_item_data_model, ResolvedChild};
pub use pointer::{escape_segment, resolve_path, unescape_segment, DataPath, TEMPLATE_ITEM_KEY};
pub use style::resolve_style;
