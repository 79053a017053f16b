//! Literal-or-path value bindings.

use serde::{Deserialize, Serialize};

use crate::model::{DataModel, DataValue};

use super::pointer::resolve_path;

/// A declarative value: a data path, literal fallbacks, or both.
///
/// A resolvable `path` always wins over any literal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueBinding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal_number: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal_boolean: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal_array: Option<Vec<DataValue>>,
}

const BINDING_KEYS: [&str; 5] = [
    "path",
    "literalString",
    "literalNumber",
    "literalBoolean",
    "literalArray",
];

impl ValueBinding {
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn literal_string(value: impl Into<String>) -> Self {
        Self {
            literal_string: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn with_literal_string(mut self, value: impl Into<String>) -> Self {
        self.literal_string = Some(value.into());
        self
    }

    /// Read a binding out of a props subtree.
    ///
    /// Returns `None` unless `value` is a mapping carrying at least one
    /// binding key. Keys of the wrong type are ignored.
    pub fn from_value(value: &DataValue) -> Option<Self> {
        let map = value.as_mapping()?;
        if !BINDING_KEYS.iter().any(|key| map.contains_key(*key)) {
            return None;
        }
        Some(Self {
            path: map.get("path").and_then(DataValue::as_str).map(str::to_string),
            literal_string: map
                .get("literalString")
                .and_then(DataValue::as_str)
                .map(str::to_string),
            literal_number: map.get("literalNumber").and_then(DataValue::as_f64),
            literal_boolean: map.get("literalBoolean").and_then(DataValue::as_bool),
            literal_array: map
                .get("literalArray")
                .and_then(DataValue::as_sequence)
                .map(<[DataValue]>::to_vec),
        })
    }

    /// First present literal: string, number, boolean, then array.
    pub fn literal(&self) -> Option<DataValue> {
        if let Some(s) = &self.literal_string {
            return Some(DataValue::String(s.clone()));
        }
        if let Some(n) = self.literal_number {
            return Some(DataValue::Number(n));
        }
        if let Some(b) = self.literal_boolean {
            return Some(DataValue::Bool(b));
        }
        self.literal_array.clone().map(DataValue::Sequence)
    }
}

/// Resolve a binding; `DataValue::Null` when nothing resolves.
pub fn resolve_value(binding: &ValueBinding, model: &DataModel) -> DataValue {
    binding
        .path
        .as_deref()
        .and_then(|path| resolve_path(path, model))
        .cloned()
        .or_else(|| binding.literal())
        .unwrap_or_default()
}

/// Resolve and stringify. `None` only when nothing resolves.
pub fn resolve_string(binding: &ValueBinding, model: &DataModel) -> Option<String> {
    match resolve_value(binding, model) {
        DataValue::Null => None,
        value => Some(value.to_display_string()),
    }
}

/// Resolve as a number, parsing numeric strings.
pub fn resolve_number(binding: &ValueBinding, model: &DataModel) -> Option<f64> {
    match resolve_value(binding, model) {
        DataValue::Number(n) => Some(n),
        DataValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Resolve as a boolean, accepting `"true"`/`"false"` strings.
pub fn resolve_bool(binding: &ValueBinding, model: &DataModel) -> Option<bool> {
    match resolve_value(binding, model) {
        DataValue::Bool(b) => Some(b),
        DataValue::String(s) => match s.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
