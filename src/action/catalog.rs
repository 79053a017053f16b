//! Known action identifiers and loose name matching.

use std::collections::BTreeMap;

use crate::model::DataValue;
use crate::protocol::Action;

/// Canonical form of an action name: trimmed, lowercased, `_` and `-` removed.
///
/// `"Submit_Form"`, `" submit-form "` and `"submitform"` all normalize to
/// `"submitform"`.
pub fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// First non-empty context value among `keys`, as a string.
///
/// Numbers and booleans are stringified; containers and nulls are skipped.
pub fn context_value(action: &Action, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| action.context.get(*key))
        .filter_map(|value| match value {
            DataValue::String(s) => Some(s.clone()),
            DataValue::Number(_) | DataValue::Bool(_) => Some(value.to_display_string()),
            _ => None,
        })
        .find(|s| !s.trim().is_empty())
}

/// Static set of action identifiers the host knows how to handle.
#[derive(Debug, Clone, Default)]
pub struct ActionCatalog {
    /// normalized name -> identifier as registered
    entries: BTreeMap<String, String>,
}

impl ActionCatalog {
    pub fn new<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = identifiers
            .into_iter()
            .map(Into::into)
            .map(|id| (normalize(&id), id))
            .collect();
        Self { entries }
    }

    /// Registered identifier matching `name`, ignoring case and `_`/`-`.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries.get(&normalize(name)).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
