//! Inbound server-to-client messages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Component, DataModel, DataValue, StyleFields};

/// Errors turning a raw event payload into an [`A2uiMessage`].
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("payload must be a JSON object, got {kind}")]
    NotAnObject { kind: &'static str },
}

/// One protocol message. Exactly one case must be populated for the message
/// to be valid; that rule is checked by the validator, not here.
///
/// Keys that are not a known case are kept in `other` so that a message
/// mixing a known and an unknown case is still rejected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct A2uiMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_rendering: Option<BeginRendering>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_update: Option<SurfaceUpdate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_model_update: Option<DataModelUpdate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_surface: Option<DeleteSurface>,
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeginRendering {
    #[serde(default)]
    pub surface_id: String,
    #[serde(default)]
    pub root: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<BTreeMap<String, StyleFields>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceUpdate {
    #[serde(default)]
    pub surface_id: String,
    #[serde(default)]
    pub components: Vec<Component>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataModelUpdate {
    #[serde(default)]
    pub surface_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub contents: Vec<DataModelUpdateEntry>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSurface {
    #[serde(default)]
    pub surface_id: String,
}

/// A keyed value inside `dataModelUpdate.contents`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataModelUpdateEntry {
    #[serde(default)]
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_number: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_boolean: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_map: Option<ValueMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_array: Option<Vec<DataValue>>,
}

/// `valueMap` payload: nested entries or a plain object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueMap {
    Entries(Vec<DataModelUpdateEntry>),
    Object(BTreeMap<String, DataValue>),
}

impl DataModelUpdateEntry {
    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value_string: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn number(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            value_number: Some(value),
            ..Self::default()
        }
    }

    /// Names of the value variants that are set.
    pub fn populated_variants(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.value_string.is_some() {
            names.push("valueString");
        }
        if self.value_number.is_some() {
            names.push("valueNumber");
        }
        if self.value_boolean.is_some() {
            names.push("valueBoolean");
        }
        if self.value_map.is_some() {
            names.push("valueMap");
        }
        if self.value_array.is_some() {
            names.push("valueArray");
        }
        names
    }

    /// The literal this entry carries, first variant wins.
    pub fn to_value(&self) -> Option<DataValue> {
        if let Some(s) = &self.value_string {
            return Some(DataValue::String(s.clone()));
        }
        if let Some(n) = self.value_number {
            return Some(DataValue::Number(n));
        }
        if let Some(b) = self.value_boolean {
            return Some(DataValue::Bool(b));
        }
        if let Some(map) = &self.value_map {
            return Some(DataValue::Mapping(map.to_model()));
        }
        self.value_array.clone().map(DataValue::Sequence)
    }
}

impl ValueMap {
    pub fn to_model(&self) -> DataModel {
        match self {
            ValueMap::Entries(entries) => entries_to_model(entries),
            ValueMap::Object(map) => map.clone(),
        }
    }
}

/// Flatten entries into `key -> value`; entries without a value are skipped.
pub fn entries_to_model(entries: &[DataModelUpdateEntry]) -> DataModel {
    entries
        .iter()
        .filter_map(|entry| entry.to_value().map(|value| (entry.key.clone(), value)))
        .collect()
}

impl A2uiMessage {
    /// Parse one event payload.
    pub fn decode(payload: &str) -> Result<Self, DecodeError> {
        let raw: serde_json::Value = serde_json::from_str(payload)?;
        if !raw.is_object() {
            return Err(DecodeError::NotAnObject {
                kind: json_kind(&raw),
            });
        }
        Ok(serde_json::from_value(raw)?)
    }

    /// Wire names of every populated case, known ones first.
    pub fn populated_cases(&self) -> Vec<&str> {
        let mut cases = Vec::new();
        if self.begin_rendering.is_some() {
            cases.push("beginRendering");
        }
        if self.surface_update.is_some() {
            cases.push("surfaceUpdate");
        }
        if self.data_model_update.is_some() {
            cases.push("dataModelUpdate");
        }
        if self.delete_surface.is_some() {
            cases.push("deleteSurface");
        }
        cases.extend(
            self.other
                .iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(key, _)| key.as_str()),
        );
        cases
    }

    /// Surface targeted by the first populated known case.
    pub fn surface_id(&self) -> Option<&str> {
        let id = self
            .begin_rendering
            .as_ref()
            .map(|m| m.surface_id.as_str())
            .or_else(|| self.surface_update.as_ref().map(|m| m.surface_id.as_str()))
            .or_else(|| self.data_model_update.as_ref().map(|m| m.surface_id.as_str()))
            .or_else(|| self.delete_surface.as_ref().map(|m| m.surface_id.as_str()))
            .or_else(|| {
                self.other
                    .values()
                    .find_map(|value| value.get("surfaceId").and_then(|v| v.as_str()))
            })?;
        (!id.trim().is_empty()).then_some(id)
    }
}

/// Best-effort `surfaceId` from a payload that failed to decode.
pub fn surface_id_hint(payload: &str) -> Option<String> {
    let raw: serde_json::Value = serde_json::from_str(payload).ok()?;
    raw.as_object()?
        .values()
        .find_map(|case| case.get("surfaceId").and_then(|v| v.as_str()))
        .filter(|id| !id.trim().is_empty())
        .map(str::to_string)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
