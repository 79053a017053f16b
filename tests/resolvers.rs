//! Tests for binding, children and style resolution over decoded surfaces.

use a2ui_runtime::model::{ChildrenSpec, Component, DataModel, DataValue, FontWeight, SurfaceState};
use a2ui_runtime::resolve::{
    escape_segment, resolve_children, resolve_children_in, resolve_path, resolve_string,
    resolve_style, resolve_value, template_item_data_model, ValueBinding,
};

fn model(json: &str) -> DataModel {
    serde_json::from_str(json).unwrap()
}

fn component(json: &str) -> Component {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_data_wins_over_literal() {
    let data = model(r#"{"user": {"name": "Ada"}}"#);
    let binding = ValueBinding::path("/user/name").with_literal_string("fallback");

    assert_eq!(resolve_value(&binding, &data), DataValue::from("Ada"));
}

#[test]
fn test_literal_used_when_path_unresolved() {
    let data = model(r#"{"user": {}}"#);
    let binding = ValueBinding::path("/user/name").with_literal_string("fallback");

    assert_eq!(resolve_string(&binding, &data).as_deref(), Some("fallback"));
}

#[test]
fn test_nothing_resolves_to_null() {
    let binding = ValueBinding::path("/missing");
    assert_eq!(resolve_value(&binding, &DataModel::new()), DataValue::Null);
    assert_eq!(resolve_string(&binding, &DataModel::new()), None);
}

#[test]
fn test_absolute_path_ignores_template_scope() {
    let root = model(r#"{"name": "root-name"}"#);
    let scoped = template_item_data_model(&DataValue::from(model(r#"{"name": "item-name"}"#)), &root);

    assert_eq!(
        resolve_path("/name", &scoped),
        Some(&DataValue::from("root-name"))
    );
    assert_eq!(
        resolve_path("name", &scoped),
        Some(&DataValue::from("item-name"))
    );
}

#[test]
fn test_relative_path_falls_back_to_root() {
    let root = model(r#"{"title": "Inbox"}"#);
    let scoped = template_item_data_model(&DataValue::from(model(r#"{"name": "A"}"#)), &root);

    assert_eq!(
        resolve_path("title", &scoped),
        Some(&DataValue::from("Inbox"))
    );
}

#[test]
fn test_escaped_keys_round_trip() {
    let data = model(r#"{"a/b": {"c~d": 7}}"#);
    let path = format!("/{}/{}", escape_segment("a/b"), escape_segment("c~d"));

    assert_eq!(path, "/a~1b/c~0d");
    assert_eq!(resolve_path(&path, &data), Some(&DataValue::Number(7.0)));
}

#[test]
fn test_template_children_scope_each_item() {
    let surface = SurfaceState {
        data_model: model(r#"{"items": [{"name": "A"}, "B"]}"#),
        ..SurfaceState::new("s1", "root")
    };
    let spec = ChildrenSpec::Template {
        data_binding: "/items".to_string(),
        component_id: "item".to_string(),
    };

    let children = resolve_children(&spec, &surface);

    assert_eq!(children.len(), 2);
    assert!(children.iter().all(|c| c.component_id == "item"));
    assert_eq!(
        resolve_path("name", &children[0].data_model),
        Some(&DataValue::from("A"))
    );
    assert_eq!(
        resolve_path(".", &children[1].data_model),
        Some(&DataValue::from("B"))
    );
}

#[test]
fn test_template_over_non_sequence_is_empty() {
    let data = model(r#"{"items": {"not": "a list"}}"#);
    let spec = ChildrenSpec::Template {
        data_binding: "/items".to_string(),
        component_id: "item".to_string(),
    };
    assert!(resolve_children_in(&spec, &data).is_empty());
}

#[test]
fn test_explicit_children_decoded_from_wire() {
    let list = component(
        r#"{"id": "list", "type": "Column", "children": {"explicitList": ["a", "b"]}}"#,
    );
    let surface = SurfaceState::new("s1", "list");

    let children = resolve_children(list.children.as_ref().unwrap(), &surface);

    let ids: Vec<_> = children.iter().map(|c| c.component_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn test_style_merge_applies_overrides_after_base() {
    let surface = SurfaceState {
        styles: serde_json::from_str(
            r#"{"base": {"fontSize": 12, "spacing": 4}, "accent": {"fontWeight": "bold"}}"#,
        )
        .unwrap(),
        ..SurfaceState::new("s1", "root")
    };
    let text = component(
        r#"{"id": "t", "type": "Text", "props": {"style": ["base", {"ref": "accent", "fontSize": 14}]}}"#,
    );

    let style = resolve_style(&text, &surface);

    assert_eq!(style.font_size, Some(14.0));
    assert_eq!(style.spacing, Some(4.0));
    assert_eq!(style.font_weight, Some(FontWeight::Bold));
    assert!(style.extra.is_empty());
}

#[test]
fn test_unknown_style_names_contribute_nothing() {
    let surface = SurfaceState::new("s1", "root");
    let text = component(r#"{"id": "t", "type": "Text", "props": {"style": ["ghost"]}}"#);

    assert!(resolve_style(&text, &surface).is_empty());
}

#[test]
fn test_later_unparseable_override_wins() {
    let surface = SurfaceState {
        styles: serde_json::from_str(r#"{"base": {"fontSize": 12}}"#).unwrap(),
        ..SurfaceState::new("s1", "root")
    };
    let text = component(
        r#"{"id": "t", "type": "Text", "props": {"style": ["base", {"fontSize": "large"}]}}"#,
    );

    let style = resolve_style(&text, &surface);

    assert_eq!(style.font_size, None);
    assert_eq!(style.to_fields()["fontSize"], DataValue::from("large"));
}
