use serde::{Deserialize, Serialize};

use super::value::DataValue;

/// A node in a surface's component tree.
///
/// `component_type` is opaque to this crate; only the renderer interprets it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub component_type: String,
    #[serde(default)]
    pub props: DataValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<ChildrenSpec>,
}

impl Component {
    /// Look up a top-level prop.
    pub fn prop(&self, name: &str) -> Option<&DataValue> {
        self.props.get(name)
    }
}

/// How a component declares its children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChildrenSpec {
    /// Fixed, ordered child ids.
    #[serde(rename = "explicitList")]
    Explicit(Vec<String>),
    /// Repeat `component_id` once per element of the sequence at `data_binding`.
    #[serde(rename = "template", rename_all = "camelCase")]
    Template {
        #[serde(default)]
        data_binding: String,
        #[serde(default)]
        component_id: String,
    },
}
