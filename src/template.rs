//! Default payloads for newly created elements.
//!
//! Each creating tool places an element of a fixed default size and style at
//! the click point. `z_index` is supplied by the caller (the current element
//! count) so new elements stack on top.

#[cfg(test)]
#[path = "template_test.rs"]
mod template_test;

use serde_json::{Value, json};

use crate::model::{
    ConnectorContent, ElementContent, ElementType, ImageContent, NewElement, Position, ShapeContent, ShapeKind,
    ShapePoints, Size, StickyNoteContent, Style, TextContent,
};
use crate::tool::ToolState;

pub const STICKY_NOTE_TEXT: &str = "New sticky note";
pub const TEXT_PLACEHOLDER: &str = "New text";
pub const DEFAULT_SIZE: Size = Size { width: 200.0, height: 150.0 };
pub const STAR_POINTS: u32 = 5;

fn style(value: Value) -> Style {
    match value {
        Value::Object(map) => map,
        _ => Style::new(),
    }
}

#[must_use]
pub fn sticky_note(board_id: &str, at: Position, z_index: i64) -> NewElement {
    let content = ElementContent::StickyNote(StickyNoteContent { text: STICKY_NOTE_TEXT.to_owned(), color: None });
    NewElement::new(board_id, &content, at)
        .with_size(DEFAULT_SIZE)
        .with_style(style(json!({
            "fill": "#fbbf24",
            "stroke": "#f59e0b",
            "strokeWidth": 1,
            "cornerRadius": 8,
        })))
        .with_z_index(z_index)
}

#[must_use]
pub fn shape(board_id: &str, kind: ShapeKind, at: Position, z_index: i64) -> NewElement {
    let points = (kind == ShapeKind::Star).then_some(ShapePoints::Count(STAR_POINTS));
    let content = ElementContent::Shape(ShapeContent { shape_type: kind, color: None, points });

    let (size, shape_style) = match kind {
        ShapeKind::Rectangle => (
            DEFAULT_SIZE,
            json!({ "fill": "#3b82f6", "stroke": "#2563eb", "strokeWidth": 2, "cornerRadius": 8 }),
        ),
        ShapeKind::Ellipse => (Size::new(100.0, 100.0), json!({ "fill": "#8b5cf6", "stroke": "#7c3aed", "strokeWidth": 2 })),
        ShapeKind::Triangle => (Size::new(100.0, 100.0), json!({ "fill": "#ec4899", "stroke": "#db2777", "strokeWidth": 2 })),
        ShapeKind::Star => (Size::new(100.0, 100.0), json!({ "fill": "#f59e0b", "stroke": "#d97706", "strokeWidth": 2 })),
        ShapeKind::Diamond => (Size::new(100.0, 100.0), json!({ "fill": "#10b981", "stroke": "#059669", "strokeWidth": 2 })),
        ShapeKind::Arrow => (
            Size::new(150.0, 50.0),
            json!({
                "fill": "#6366f1",
                "stroke": "#4f46e5",
                "strokeWidth": 3,
                "pointerLength": 12,
                "pointerWidth": 12,
            }),
        ),
    };

    NewElement::new(board_id, &content, at).with_size(size).with_style(style(shape_style)).with_z_index(z_index)
}

#[must_use]
pub fn text(board_id: &str, at: Position, z_index: i64) -> NewElement {
    let content = ElementContent::Text(TextContent {
        text: TEXT_PLACEHOLDER.to_owned(),
        font_size: None,
        font_family: None,
        color: None,
    });
    NewElement::new(board_id, &content, at)
        .with_size(Size::new(150.0, 50.0))
        .with_style(style(json!({ "fontSize": 18, "fill": "#f8fafc", "fontFamily": "Inter" })))
        .with_z_index(z_index)
}

#[must_use]
pub fn connector(board_id: &str, from: &str, to: &str, at: Position, z_index: i64) -> NewElement {
    let content = ElementContent::Connector(ConnectorContent {
        from_element_id: from.to_owned(),
        to_element_id: to.to_owned(),
        label: None,
    });
    NewElement::new(board_id, &content, at)
        .with_style(style(json!({ "stroke": "#94a3b8", "strokeWidth": 2 })))
        .with_z_index(z_index)
}

#[must_use]
pub fn image(board_id: &str, url: &str, at: Position, z_index: i64) -> NewElement {
    let content = ElementContent::Image(ImageContent { url: url.to_owned(), alt: None });
    NewElement::new(board_id, &content, at).with_size(Size::new(240.0, 180.0)).with_z_index(z_index)
}

/// Template for a click with the active tool, for tools that place an
/// element with a single click.
#[must_use]
pub fn for_tool(tools: &ToolState, board_id: &str, at: Position, z_index: i64) -> Option<NewElement> {
    match tools.active.creates()? {
        ElementType::StickyNote => Some(sticky_note(board_id, at, z_index)),
        ElementType::Shape => Some(shape(board_id, tools.shape, at, z_index)),
        ElementType::Text => Some(text(board_id, at, z_index)),
        ElementType::Connector | ElementType::Image => None,
    }
}
