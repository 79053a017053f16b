//! Folding a component's style references into one effective [`Style`].

use crate::model::{Component, DataValue, Style, SurfaceState};

/// Resolve `component.props.style` against the surface's style table.
///
/// Entries apply left to right. A string names a style in `surface.styles`;
/// an object may name one via `ref` and carries inline overrides that apply
/// right after its named base. Unknown names contribute nothing.
pub fn resolve_style(component: &Component, surface: &SurfaceState) -> Style {
    let mut style = Style::default();

    let entries = match component.prop("style") {
        Some(DataValue::Sequence(items)) => items.as_slice(),
        Some(single @ (DataValue::String(_) | DataValue::Mapping(_))) => std::slice::from_ref(single),
        _ => return style,
    };

    for entry in entries {
        match entry {
            DataValue::String(name) => apply_named(&mut style, name, surface),
            DataValue::Mapping(fields) => {
                if let Some(name) = fields.get("ref").and_then(DataValue::as_str) {
                    apply_named(&mut style, name, surface);
                }
                let overrides = fields
                    .iter()
                    .filter(|(key, _)| key.as_str() != "ref")
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();
                style.apply(&overrides);
            }
            other => tracing::debug!(component = %component.id, entry = %other, "ignoring style entry"),
        }
    }

    style
}

fn apply_named(style: &mut Style, name: &str, surface: &SurfaceState) {
    match surface.styles.get(name) {
        Some(fields) => style.apply(fields),
        None => tracing::debug!(surface = %surface.surface_id, style = name, "unknown style name"),
    }
}
