//! Outbound user actions and the origin's verdict on them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::DataValue;

/// A user interaction to report to the origin.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub name: String,
    #[serde(default)]
    pub surface_id: Option<String>,
    #[serde(default)]
    pub source_component_id: Option<String>,
    #[serde(default)]
    pub context: BTreeMap<String, DataValue>,
}

impl Action {
    pub fn new(name: impl Into<String>, surface_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            surface_id: Some(surface_id.into()),
            ..Self::default()
        }
    }

    pub fn with_source(mut self, component_id: impl Into<String>) -> Self {
        self.source_component_id = Some(component_id.into());
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<DataValue>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

/// Outcome of submitting an [`Action`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionResult {
    #[serde(default)]
    pub accepted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ActionResult {
    pub fn accepted() -> Self {
        Self {
            accepted: true,
            reason: None,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            accepted: false,
            reason: Some(reason.into()),
        }
    }
}
