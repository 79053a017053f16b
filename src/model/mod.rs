//! Render-state data types shared by the protocol, resolvers and reducer.

mod component;
mod style;
mod surface;
mod value;

pub use component::{ChildrenSpec, Component};
pub use style::{Emphasis, FontWeight, Style, StyleFields};
pub use surface::SurfaceState;
pub use value::{DataModel, DataValue};
