//! Expansion of a component's children specification.

use std::borrow::Cow;

use crate::model::{ChildrenSpec, DataModel, DataValue, SurfaceState};

use super::pointer::{resolve_path, TEMPLATE_ITEM_KEY};

/// One concrete child: the component to render and the data it sees.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedChild<'a> {
    pub component_id: String,
    pub data_model: Cow<'a, DataModel>,
}

/// Expand `spec` against the surface's root data model.
pub fn resolve_children<'a>(spec: &ChildrenSpec, surface: &'a SurfaceState) -> Vec<ResolvedChild<'a>> {
    resolve_children_in(spec, &surface.data_model)
}

/// Expand `spec` against an arbitrary scope, such as a template item's model
/// when templates nest.
pub fn resolve_children_in<'a>(spec: &ChildrenSpec, model: &'a DataModel) -> Vec<ResolvedChild<'a>> {
    match spec {
        ChildrenSpec::Explicit(ids) => ids
            .iter()
            .map(|id| ResolvedChild {
                component_id: id.clone(),
                data_model: Cow::Borrowed(model),
            })
            .collect(),
        ChildrenSpec::Template {
            data_binding,
            component_id,
        } => {
            let items = resolve_path(data_binding, model)
                .and_then(DataValue::as_sequence)
                .unwrap_or_default();
            items
                .iter()
                .map(|item| ResolvedChild {
                    component_id: component_id.clone(),
                    data_model: Cow::Owned(template_item_data_model(item, model)),
                })
                .collect()
        }
    }
}

/// The parent's model plus the reserved item key set to `item`.
pub fn template_item_data_model(item: &DataValue, parent: &DataModel) -> DataModel {
    let mut model = parent.clone();
    model.insert(TEMPLATE_ITEM_KEY.to_string(), item.clone());
    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::pointer::resolve_path;

    fn surface(json: &str) -> SurfaceState {
        SurfaceState {
            data_model: serde_json::from_str(json).unwrap(),
            ..SurfaceState::new("s1", "root")
        }
    }

    #[test]
    fn explicit_children_share_root_model() {
        let s = surface(r#"{"a": 1}"#);
        let spec = ChildrenSpec::Explicit(vec!["x".into(), "y".into()]);
        let children = resolve_children(&spec, &s);
        let ids: Vec<_> = children.iter().map(|c| c.component_id.as_str()).collect();
        assert_eq!(ids, ["x", "y"]);
        assert!(matches!(children[0].data_model, Cow::Borrowed(_)));
    }

    #[test]
    fn non_sequence_binding_yields_nothing() {
        let s = surface(r#"{"items": {"not": "a list"}}"#);
        let spec = ChildrenSpec::Template {
            data_binding: "/items".into(),
            component_id: "row".into(),
        };
        assert!(resolve_children(&spec, &s).is_empty());

        let spec = ChildrenSpec::Template {
            data_binding: "/missing".into(),
            component_id: "row".into(),
        };
        assert!(resolve_children(&spec, &s).is_empty());
    }

    #[test]
    fn nested_templates_scope_to_inner_item() {
        let s = surface(r#"{"groups": [{"title": "G", "rows": [{"v": 1}, {"v": 2}]}]}"#);
        let outer = ChildrenSpec::Template {
            data_binding: "/groups".into(),
            component_id: "group".into(),
        };
        let groups = resolve_children(&outer, &s);
        assert_eq!(groups.len(), 1);

        let inner = ChildrenSpec::Template {
            data_binding: "rows".into(),
            component_id: "row".into(),
        };
        let rows = resolve_children_in(&inner, &groups[0].data_model);
        let values: Vec<_> = rows
            .iter()
            .map(|row| resolve_path("v", &row.data_model).cloned())
            .collect();
        assert_eq!(
            values,
            vec![Some(DataValue::Number(1.0)), Some(DataValue::Number(2.0))]
        );
        assert!(resolve_path("/groups", &rows[0].data_model).is_some());
    }
}
