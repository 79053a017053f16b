use std::collections::BTreeMap;

use super::component::Component;
use super::style::StyleFields;
use super::value::DataModel;

/// One independently addressable UI region.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurfaceState {
    pub surface_id: String,
    pub root_component_id: String,
    pub components: BTreeMap<String, Component>,
    pub data_model: DataModel,
    pub styles: BTreeMap<String, StyleFields>,
}

impl SurfaceState {
    /// A freshly begun surface with nothing in it.
    pub fn new(surface_id: impl Into<String>, root_component_id: impl Into<String>) -> Self {
        Self {
            surface_id: surface_id.into(),
            root_component_id: root_component_id.into(),
            ..Self::default()
        }
    }

    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    pub fn root(&self) -> Option<&Component> {
        self.component(&self.root_component_id)
    }
}
