#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn sticky_json() -> Value {
    json!({
        "id": "el-1",
        "type": "sticky-note",
        "content": { "text": "hello" },
        "position": { "x": 10.0, "y": 20.0 },
        "size": { "width": 200.0, "height": 150.0 },
        "style": { "fill": "#fff" },
        "zIndex": 3,
        "boardId": "b-1",
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    })
}

// =============================================================
// Board
// =============================================================

#[test]
fn board_uses_camel_case_fields() {
    let board: Board = serde_json::from_value(json!({
        "id": "b-1",
        "title": "Roadmap",
        "createdAt": "c",
        "updatedAt": "u",
        "userId": "user-9"
    }))
    .unwrap();
    assert_eq!(board.user_id, "user-9");
    assert!(board.description.is_none());

    let back = serde_json::to_value(&board).unwrap();
    assert!(back.get("description").is_none());
    assert_eq!(back["createdAt"], "c");
}

#[test]
fn board_patch_skips_absent_fields() {
    let patch = BoardPatch { title: Some("New".into()), description: None };
    assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "title": "New" }));
    assert!(BoardPatch::default().is_empty());
}

// =============================================================
// ElementType / ShapeKind
// =============================================================

#[test]
fn element_type_is_kebab_case_on_the_wire() {
    assert_eq!(serde_json::to_value(ElementType::StickyNote).unwrap(), json!("sticky-note"));
    let back: ElementType = serde_json::from_value(json!("connector")).unwrap();
    assert_eq!(back, ElementType::Connector);
    assert_eq!(ElementType::Image.to_string(), "image");
}

#[test]
fn shape_kind_parse_accepts_circle_alias() {
    assert_eq!(ShapeKind::parse("circle"), Some(ShapeKind::Ellipse));
    assert_eq!(ShapeKind::parse(" Star "), Some(ShapeKind::Star));
    assert_eq!(ShapeKind::parse("hexagon"), None);
    for kind in ShapeKind::ALL {
        assert_eq!(ShapeKind::parse(kind.as_str()), Some(kind));
    }
}

// =============================================================
// BoardElement decoding
// =============================================================

#[test]
fn element_decodes_full_payload() {
    let el: BoardElement = serde_json::from_value(sticky_json()).unwrap();
    assert_eq!(el.kind, ElementType::StickyNote);
    assert_eq!(el.text(), Some("hello"));
    assert_eq!(el.z_index, 3);
    assert_eq!(el.position, Position::new(10.0, 20.0));
    assert!(!el.is_temporary());
}

#[test]
fn element_tolerates_null_style_and_missing_optionals() {
    let el: BoardElement = serde_json::from_value(json!({
        "id": "el-2",
        "type": "shape",
        "content": { "shapeType": "star", "points": 5 },
        "position": null,
        "style": null,
        "boardId": "b-1"
    }))
    .unwrap();
    assert!(el.style.is_empty());
    assert_eq!(el.position, Position::default());
    assert_eq!(el.z_index, 0);
    assert_eq!(el.effective_size(), Size::new(100.0, 100.0));
}

#[test]
fn typed_content_decodes_per_type() {
    let el: BoardElement = serde_json::from_value(json!({
        "id": "el-3",
        "type": "shape",
        "content": { "shapeType": "arrow", "points": [0.0, 0.0, 10.0, 10.0] },
        "position": { "x": 0.0, "y": 0.0 },
        "boardId": "b-1"
    }))
    .unwrap();
    match el.typed_content().unwrap() {
        ElementContent::Shape(shape) => {
            assert_eq!(shape.shape_type, ShapeKind::Arrow);
            assert_eq!(shape.points, Some(ShapePoints::Polygon(vec![0.0, 0.0, 10.0, 10.0])));
        }
        other => panic!("unexpected content {other:?}"),
    }
}

#[test]
fn typed_content_reports_type_mismatch() {
    let mut el: BoardElement = serde_json::from_value(sticky_json()).unwrap();
    el.kind = ElementType::Connector;
    let err = el.typed_content().unwrap_err();
    assert_eq!(err.element_type, ElementType::Connector);
    assert!(err.to_string().starts_with("connector content is malformed"));
}

#[test]
fn connector_content_uses_camel_case_ids() {
    let content = ElementContent::Connector(ConnectorContent {
        from_element_id: "a".into(),
        to_element_id: "b".into(),
        label: None,
    });
    assert_eq!(content.to_value(), json!({ "fromElementId": "a", "toElementId": "b" }));
    assert_eq!(content.element_type(), ElementType::Connector);
    assert!(content.text().is_none());
}

#[test]
fn text_is_only_exposed_for_text_bearing_types() {
    let mut el: BoardElement = serde_json::from_value(sticky_json()).unwrap();
    el.kind = ElementType::Image;
    assert!(el.text().is_none());
}

// =============================================================
// NewElement / ElementPatch
// =============================================================

#[test]
fn new_element_omits_empty_style_and_size() {
    let content = ElementContent::Image(ImageContent { url: "https://x/y.png".into(), alt: None });
    let new = NewElement::new("b-1", &content, Position::new(1.0, 2.0));
    let body = serde_json::to_value(&new).unwrap();
    assert_eq!(body["type"], "image");
    assert_eq!(body["zIndex"], 0);
    assert!(body.get("style").is_none());
    assert!(body.get("size").is_none());
}

#[test]
fn to_new_element_round_trips_through_temporary() {
    let el: BoardElement = serde_json::from_value(sticky_json()).unwrap();
    let new = el.to_new_element().offset(20.0, 20.0);
    assert_eq!(new.position, Position::new(30.0, 40.0));

    let temp = new.to_temporary();
    assert!(temp.is_temporary());
    assert_eq!(temp.content, el.content);
    assert_eq!(temp.z_index, el.z_index);
    assert!(!temp.created_at.is_empty());
}

#[test]
fn temporary_ids_are_unique() {
    assert_ne!(temporary_id(), temporary_id());
}

#[test]
fn element_patch_applies_only_present_fields() {
    let mut el: BoardElement = serde_json::from_value(sticky_json()).unwrap();
    ElementPatch::position(Position::new(5.0, 6.0)).apply_to(&mut el);
    assert_eq!(el.position, Position::new(5.0, 6.0));
    assert_eq!(el.text(), Some("hello"));

    let body = serde_json::to_value(ElementPatch::position(Position::new(5.0, 6.0))).unwrap();
    assert_eq!(body, json!({ "position": { "x": 5.0, "y": 6.0 } }));
}

#[test]
fn element_patch_emptiness() {
    assert!(ElementPatch::default().is_empty());
    assert!(!ElementPatch::content(json!({ "text": "x" })).is_empty());
}

// =============================================================
// StyleView
// =============================================================

#[test]
fn style_view_reads_keys_and_falls_back_per_type() {
    let el: BoardElement = serde_json::from_value(sticky_json()).unwrap();
    let view = el.style_view();
    assert_eq!(view.fill(), "#fff");
    assert_eq!(view.stroke(), "#f59e0b");
    assert_eq!(view.stroke_width(), 1.0);
    assert_eq!(view.corner_radius(), 8.0);

    let empty = Style::new();
    assert_eq!(StyleView::new(&empty, ElementType::Connector).stroke(), "#94a3b8");
}

#[test]
fn analysis_defaults_missing_fields() {
    let analysis: BoardAnalysis = serde_json::from_value(json!({ "summary": "ok" })).unwrap();
    assert!(analysis.suggestions.is_empty());
}
