//! JSON-Pointer-style addressing into a data model.

use crate::model::{DataModel, DataValue};

/// Reserved data-model key holding the current template item.
pub const TEMPLATE_ITEM_KEY: &str = "$item";

/// A decoded path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPath {
    pub absolute: bool,
    pub segments: Vec<String>,
}

impl DataPath {
    /// Split and unescape a path. Empty and `.` segments are dropped, so
    /// `"/"` is the root and `"."` is the current template item.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let absolute = trimmed.starts_with('/');
        let segments = trimmed
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .map(unescape_segment)
            .collect();
        Self { absolute, segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Decode `~1` to `/` and `~0` to `~`. Any other `~` is kept verbatim.
pub fn unescape_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '~' {
            match chars.peek() {
                Some('0') => {
                    chars.next();
                    out.push('~');
                }
                Some('1') => {
                    chars.next();
                    out.push('/');
                }
                _ => out.push('~'),
            }
        } else {
            out.push(ch);
        }
    }

    out
}

/// Inverse of [`unescape_segment`].
pub fn escape_segment(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

/// Resolve `path` against `model`, honoring an active template scope.
///
/// Absolute paths always start at the root. Relative paths look inside the
/// template item first (when one is set) and fall back to the root.
/// `None` means unresolved; a stored `Null` counts as unresolved too.
/// Keys named `""` or `"."` cannot be addressed, since those segments are dropped.
pub fn resolve_path<'a>(path: &str, model: &'a DataModel) -> Option<&'a DataValue> {
    let path = DataPath::parse(path);

    if !path.absolute {
        if let Some(item) = model.get(TEMPLATE_ITEM_KEY) {
            if let Some(found) = descend(item, &path.segments) {
                return Some(found);
            }
        }
    }

    lookup_root(model, &path.segments)
}

fn lookup_root<'a>(model: &'a DataModel, segments: &[String]) -> Option<&'a DataValue> {
    let (first, rest) = segments.split_first()?;
    descend(model.get(first)?, rest)
}

fn descend<'a>(value: &'a DataValue, segments: &[String]) -> Option<&'a DataValue> {
    let mut current = value;
    for segment in segments {
        current = match current {
            DataValue::Mapping(map) => map.get(segment)?,
            DataValue::Sequence(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    (!current.is_null()).then_some(current)
}
