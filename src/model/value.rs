//! Dynamically-typed value tree used for data models, props and styles.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A surface's root data model: string keys to values.
pub type DataModel = BTreeMap<String, DataValue>;

/// Closed JSON-like value.
///
/// Deserializes from any JSON document. Integers and decimals both land in
/// [`DataValue::Number`], so `1` and `1.0` are indistinguishable once decoded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Sequence(Vec<DataValue>),
    Mapping(BTreeMap<String, DataValue>),
}

impl DataValue {
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DataValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[DataValue]> {
        match self {
            DataValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&BTreeMap<String, DataValue>> {
        match self {
            DataValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key when this value is a mapping.
    pub fn get(&self, key: &str) -> Option<&DataValue> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Render the value as text for display.
    ///
    /// Integral numbers drop the fractional part (`12.0` -> `"12"`), `Null`
    /// becomes the empty string and containers become compact JSON.
    pub fn to_display_string(&self) -> String {
        match self {
            DataValue::Null => String::new(),
            DataValue::Bool(b) => b.to_string(),
            DataValue::Number(n) => format_number(*n),
            DataValue::String(s) => s.clone(),
            DataValue::Sequence(_) | DataValue::Mapping(_) => {
                serde_json::to_string(self).unwrap_or_default()
            }
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::String(value.to_string())
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        DataValue::String(value)
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        DataValue::Number(value)
    }
}

impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        DataValue::Bool(value)
    }
}

impl From<DataModel> for DataValue {
    fn from(value: DataModel) -> Self {
        DataValue::Mapping(value)
    }
}

impl From<serde_json::Value> for DataValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => DataValue::Null,
            serde_json::Value::Bool(b) => DataValue::Bool(b),
            serde_json::Value::Number(n) => DataValue::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => DataValue::String(s),
            serde_json::Value::Array(items) => {
                DataValue::Sequence(items.into_iter().map(DataValue::from).collect())
            }
            serde_json::Value::Object(map) => DataValue::Mapping(
                map.into_iter().map(|(k, v)| (k, DataValue::from(v))).collect(),
            ),
        }
    }
}
