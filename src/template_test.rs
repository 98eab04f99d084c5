#![allow(clippy::float_cmp)]

use super::*;
use crate::model::ElementType;
use crate::tool::Tool;

const BOARD: &str = "board-1";

#[test]
fn sticky_note_defaults() {
    let el = sticky_note(BOARD, Position::new(10.0, 20.0), 4);
    assert_eq!(el.kind, ElementType::StickyNote);
    assert_eq!(el.content["text"], STICKY_NOTE_TEXT);
    assert_eq!(el.size, Some(DEFAULT_SIZE));
    assert_eq!(el.style["fill"], "#fbbf24");
    assert_eq!(el.z_index, 4);
    assert_eq!(el.board_id, BOARD);
    assert_eq!(el.position, Position::new(10.0, 20.0));
}

#[test]
fn star_carries_point_count() {
    let el = shape(BOARD, ShapeKind::Star, Position::default(), 0);
    assert_eq!(el.content["shapeType"], "star");
    assert_eq!(el.content["points"], 5);
}

#[test]
fn non_star_shapes_omit_points() {
    for kind in ShapeKind::ALL.into_iter().filter(|k| *k != ShapeKind::Star) {
        let el = shape(BOARD, kind, Position::default(), 0);
        assert!(el.content.get("points").is_none(), "{kind}");
        assert_eq!(el.content["shapeType"], kind.as_str());
        assert!(el.style.contains_key("fill"), "{kind}");
    }
}

#[test]
fn arrow_is_wide_and_has_pointer_style() {
    let el = shape(BOARD, ShapeKind::Arrow, Position::default(), 0);
    assert_eq!(el.size, Some(Size::new(150.0, 50.0)));
    assert_eq!(el.style["pointerLength"], 12);
}

#[test]
fn text_defaults() {
    let el = text(BOARD, Position::default(), 1);
    assert_eq!(el.kind, ElementType::Text);
    assert_eq!(el.content["text"], TEXT_PLACEHOLDER);
    assert_eq!(el.style["fontSize"], 18);
}

#[test]
fn connector_references_both_ends() {
    let el = connector(BOARD, "a", "b", Position::default(), 2);
    assert_eq!(el.kind, ElementType::Connector);
    assert_eq!(el.content["fromElementId"], "a");
    assert_eq!(el.content["toElementId"], "b");
    assert!(el.size.is_none());
}

#[test]
fn image_has_url_and_no_style() {
    let el = image(BOARD, "https://img/x.png", Position::default(), 0);
    assert_eq!(el.content["url"], "https://img/x.png");
    assert!(el.style.is_empty());
}

#[test]
fn for_tool_follows_active_tool_and_shape() {
    let mut tools = ToolState::default();
    assert!(for_tool(&tools, BOARD, Position::default(), 0).is_none());

    tools.pick_shape(ShapeKind::Diamond);
    let el = for_tool(&tools, BOARD, Position::default(), 0).unwrap();
    assert_eq!(el.content["shapeType"], "diamond");

    tools.activate(Tool::Sticky);
    assert_eq!(for_tool(&tools, BOARD, Position::default(), 0).unwrap().kind, ElementType::StickyNote);

    tools.activate(Tool::Connector);
    assert!(for_tool(&tools, BOARD, Position::default(), 0).is_none());
}

#[test]
fn templates_decode_as_their_declared_type() {
    let elements = [
        sticky_note(BOARD, Position::default(), 0),
        shape(BOARD, ShapeKind::Triangle, Position::default(), 0),
        text(BOARD, Position::default(), 0),
        connector(BOARD, "a", "b", Position::default(), 0),
        image(BOARD, "u", Position::default(), 0),
    ];
    for el in elements {
        let decoded = ElementContent::decode(el.kind, &el.content).unwrap();
        assert_eq!(decoded.element_type(), el.kind);
    }
}
